//! Cosine similarity helpers shared by the local providers

/// Normalized score of an orthogonal pair
const NEUTRAL_SCORE: f32 = 0.5;

/// Compute the L2 norm of a vector
pub fn compute_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity with precomputed query norm, normalized to `[0, 1]`
///
/// A zero vector has no direction and scores `0.5`, the same as an
/// orthogonal one.
pub fn cosine_similarity_with_norm(a: &[f32], b: &[f32], norm_a: f32) -> f32 {
    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_b = compute_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        NEUTRAL_SCORE
    } else {
        (dot_product / (norm_a * norm_b) + 1.0) / 2.0
    }
}
