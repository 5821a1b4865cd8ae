use crate::domain::entities::indexed_entry::IndexHit;
use crate::domain::entities::recommendation::Match;

/// Ranked matches for one query.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub matches: Vec<Match>,
    /// Mean index distance of the matches. Diagnostics only.
    pub average_distance: Option<f64>,
}

impl Ranking {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Converts index hits into matches. The index already returns hits nearest
/// first, so the order is kept as is.
pub fn rank(hits: Vec<IndexHit>) -> Ranking {
    if hits.is_empty() {
        return Ranking::default();
    }
    let total: f64 = hits.iter().map(|h| h.distance).sum();
    let average_distance = Some(total / hits.len() as f64);
    let matches = hits.into_iter().map(Match::from_hit).collect();
    Ranking { matches, average_distance }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::indexed_entry::EntryMetadata;

    fn hit(disease: &str, dosha: &str, distance: f64) -> IndexHit {
        IndexHit {
            id: disease.to_lowercase(),
            document: format!("{disease} symptoms"),
            distance,
            metadata: EntryMetadata {
                disease: disease.into(),
                dosha: dosha.into(),
                remedy: format!("{disease} remedy"),
            },
        }
    }

    #[test]
    fn test_rank_empty() {
        let ranking = rank(vec![]);
        assert!(ranking.is_empty());
        assert!(ranking.average_distance.is_none());
    }

    #[test]
    fn test_rank_similarity_and_average() {
        let ranking = rank(vec![
            hit("Acne", "Pitta", 0.1),
            hit("Eczema", "Pitta", 0.3),
            hit("Psoriasis", "Kapha", 0.5),
        ]);
        let diseases: Vec<&str> = ranking.matches.iter().map(|m| m.disease.as_str()).collect();
        assert_eq!(diseases, vec!["Acne", "Eczema", "Psoriasis"]);
        let sims: Vec<f64> = ranking.matches.iter().map(|m| m.similarity).collect();
        for (got, want) in sims.iter().zip([0.9, 0.7, 0.5]) {
            assert!((got - want).abs() < 1e-12);
        }
        assert!((ranking.average_distance.unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_rank_trusts_index_order() {
        let ranking = rank(vec![hit("B", "Vata", 0.4), hit("A", "Vata", 0.2)]);
        assert_eq!(ranking.matches[0].disease, "B");
    }
}
