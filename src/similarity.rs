// Pairwise cosine similarity over term vectors.
//
// The full matrix is dense and quadratic in product count; it is the only
// expensive step in the pipeline. Each unordered pair is computed once and
// mirrored, so the matrix is exactly symmetric.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::text::vectors::TermVector;

/// Cosine similarity between two sparse vectors.
///
/// Returns 0.0 to 1.0. Zero-length vectors score 0.0 against everything.
pub fn cosine_similarity(a: &TermVector, b: &TermVector) -> f64 {
    cosine_with_norms(a, b, a.norm(), b.norm())
}

fn cosine_with_norms(a: &TermVector, b: &TermVector, norm_a: f64, norm_b: f64) -> f64 {
    let denom = norm_a * norm_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (a.dot(b) / denom).clamp(0.0, 1.0)
    }
}

/// Square, symmetric similarity matrix stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn from_vectors(vectors: &[TermVector]) -> Self {
        Self::from_vectors_with_progress(vectors, false)
    }

    /// Compute the matrix, optionally showing a progress bar over rows.
    pub fn from_vectors_with_progress(vectors: &[TermVector], show_progress: bool) -> Self {
        let n = vectors.len();
        let mut values = vec![0.0; n * n];

        let pb = if show_progress {
            let pb = ProgressBar::new(n as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Similarity [{bar:30}] {pos}/{len} ({eta})")
                    .expect("valid template"),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let norms: Vec<f64> = vectors.iter().map(TermVector::norm).collect();

        for i in 0..n {
            values[i * n + i] = 1.0;
            for j in (i + 1)..n {
                let sim = cosine_with_norms(&vectors[i], &vectors[j], norms[i], norms[j]);
                values[i * n + j] = sim;
                values[j * n + i] = sim;
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(products = n, "Computed cosine similarity matrix");

        Self { size: n, values }
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Entry (i, j), or `None` outside the matrix.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.size && j < self.size {
            Some(self.values[i * self.size + j])
        } else {
            None
        }
    }

    /// Row `i`, or `None` outside the matrix.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.size {
            Some(&self.values[i * self.size..(i + 1) * self.size])
        } else {
            None
        }
    }

    /// The top-left `k × k` block as nested rows; `k` is clamped to the size.
    pub fn submatrix(&self, k: usize) -> Vec<Vec<f64>> {
        let k = k.min(self.size);
        (0..k)
            .map(|i| self.values[i * self.size..i * self.size + k].to_vec())
            .collect()
    }

    /// Mean similarity over distinct pairs, 0.0 with fewer than two products.
    pub fn mean_off_diagonal(&self) -> f64 {
        let n = self.size;
        if n < 2 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                sum += self.values[i * n + j];
            }
        }
        sum / (n * (n - 1) / 2) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(usize, f64)]) -> TermVector {
        TermVector::from_entries(entries.to_vec())
    }

    #[test]
    fn test_cosine_identical() {
        let a = vector(&[(0, 1.0), (1, 2.0), (2, 3.0)]);
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let a = vector(&[(0, 1.0)]);
        let b = vector(&[(1, 1.0)]);
        assert!(cosine_similarity(&a, &b).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_proportional() {
        // Same direction, different magnitudes, should be 1.0
        let a = vector(&[(0, 1.0), (1, 2.0), (2, 3.0)]);
        let b = vector(&[(0, 2.0), (1, 4.0), (2, 6.0)]);
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_cosine_zero_vector() {
        let a = vector(&[(0, 1.0)]);
        let zero = TermVector::default();
        assert_eq!(cosine_similarity(&a, &zero), 0.0);
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let vectors = vec![
            vector(&[(0, 1.0), (1, 1.0)]),
            vector(&[(1, 1.0), (2, 1.0)]),
            vector(&[(3, 1.0)]),
            TermVector::default(),
        ];
        let m = SimilarityMatrix::from_vectors(&vectors);

        assert_eq!(m.len(), 4);
        for i in 0..4 {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..4 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        assert!((m.get(0, 1).unwrap() - 0.5).abs() < 1e-10);
        assert_eq!(m.get(0, 2), Some(0.0));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let m = SimilarityMatrix::from_vectors(&[vector(&[(0, 1.0)])]);
        assert_eq!(m.get(0, 1), None);
        assert!(m.row(1).is_none());
    }

    #[test]
    fn test_submatrix_clamped() {
        let vectors: Vec<TermVector> = (0..3).map(|i| vector(&[(i, 1.0)])).collect();
        let m = SimilarityMatrix::from_vectors(&vectors);
        let sub = m.submatrix(10);
        assert_eq!(sub.len(), 3);
        assert!(sub.iter().all(|row| row.len() == 3));
        assert_eq!(m.submatrix(2), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_mean_off_diagonal() {
        let vectors = vec![vector(&[(0, 1.0)]), vector(&[(0, 1.0)]), vector(&[(1, 1.0)])];
        let m = SimilarityMatrix::from_vectors(&vectors);
        // pairs: 1.0, 0.0, 0.0
        assert!((m.mean_off_diagonal() - 1.0 / 3.0).abs() < 1e-10);
    }
}
