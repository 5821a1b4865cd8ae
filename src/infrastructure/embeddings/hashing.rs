use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};

pub const DEFAULT_DIMENSION: usize = 384;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Local, deterministic bag-of-words encoder.
///
/// Each lowercase word and each adjacent word pair is hashed (FNV-1a) into a
/// signed bucket, then the vector is L2-normalized. Texts sharing words get
/// close vectors; no model download or network access is needed.
pub struct HashingProvider {
    dim: usize,
}

impl HashingProvider {
    pub fn new(dim: usize) -> Result<Self, DomainError> {
        if dim == 0 {
            return Err(DomainError::Config("hashing dimension must be positive".into()));
        }
        Ok(Self { dim })
    }

    fn fnv1a(bytes: &[u8]) -> u64 {
        bytes.iter().fold(FNV_OFFSET, |hash, b| (hash ^ *b as u64).wrapping_mul(FNV_PRIME))
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let hash = Self::fnv1a(feature.as_bytes());
        let bucket = (hash % self.dim as u64) as usize;
        let sign = if hash >> 63 == 0 { 1.0 } else { -1.0 };
        vector[bucket] += sign * weight;
    }

    pub fn encode(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let mut vector = vec![0.0_f32; self.dim];
        for word in &words {
            self.add_feature(&mut vector, word, 1.0);
        }
        for pair in words.windows(2) {
            self.add_feature(&mut vector, &format!("{} {}", pair[0], pair[1]), 0.5);
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 1e-6 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for HashingProvider {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        Ok(texts.iter().map(|t| self.encode(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::distance::half_cosine_distance;

    #[test]
    fn test_deterministic_and_normalized() {
        let p = HashingProvider::new(64).unwrap();
        let a = p.encode("Burning sensation in the stomach");
        let b = p.encode("burning SENSATION in the stomach!");
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_shared_words_are_closer() {
        let p = HashingProvider::new(DEFAULT_DIMENSION).unwrap();
        let query = p.encode("itchy red skin rash");
        let near = p.encode("red itchy rash on the skin");
        let far = p.encode("difficulty falling asleep at night");
        assert!(half_cosine_distance(&query, &near) < half_cosine_distance(&query, &far));
    }

    #[test]
    fn test_blank_text_is_zero_vector() {
        let p = HashingProvider::new(16).unwrap();
        assert!(p.encode("  ...  ").iter().all(|x| *x == 0.0));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(HashingProvider::new(0).is_err());
    }
}
