//! Distance metric used by the vector index.
//!
//! The index reports half cosine distance, `(1 - cos(a, b)) / 2`, so every
//! distance lies in `[0, 1]` and `1 - distance` is a similarity in `[0, 1]`.

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 { 0.0 } else { (dot / denom).clamp(-1.0, 1.0) }
}

/// Bounded distance in `[0, 1]`. Zero and non-finite vectors are maximally distant.
pub fn half_cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let is_zero = |v: &[f32]| v.iter().all(|x| *x == 0.0);
    if a.len() != b.len() || a.is_empty() || is_zero(a) || is_zero(b) {
        return 1.0;
    }
    let distance = (1.0 - cosine_similarity(a, b)) / 2.0;
    if distance.is_finite() {
        distance
    } else {
        1.0
    }
}

pub fn similarity_from_distance(distance: f64) -> f64 {
    1.0 - distance
}
