//! Vector distance functions

/// Calculate cosine similarity between two vectors
///
/// Mismatched lengths and zero vectors have similarity 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

/// Cosine distance, `1 - cosine_similarity`; lower is more similar
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    1.0 - cosine_similarity(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        assert!(cosine_distance(&[1.0, 2.0], &[1.0, 2.0]).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_and_opposite() {
        assert!((cosine_distance(&[1.0, 0.0], &[0.0, 1.0]) - 1.0).abs() < 1e-6);
        assert!((cosine_distance(&[1.0, 0.0], &[-1.0, 0.0]) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector() {
        assert_eq!(cosine_distance(&[0.0, 0.0], &[1.0, 0.0]), 1.0);
    }

    proptest::proptest! {
        #[test]
        fn prop_distance_in_range(
            a in proptest::collection::vec(-100.0f32..100.0, 4),
            b in proptest::collection::vec(-100.0f32..100.0, 4),
        ) {
            let d = cosine_distance(&a, &b);
            proptest::prop_assert!((-1e-4..=2.0 + 1e-4).contains(&d));
        }
    }
}
