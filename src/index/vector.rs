//! Sparse weight vectors and cosine similarity.

use serde::{Deserialize, Serialize};

/// A sparse vector of (dimension, weight) pairs, sorted by dimension.
///
/// Record and query vectors are L2-normalized at construction time, so the
/// dot product of two of them is their cosine similarity directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(u32, f32)>,
}

impl SparseVector {
    /// Build a vector from unsorted (dimension, weight) pairs.
    ///
    /// Entries are sorted by dimension; duplicate dimensions have their
    /// weights summed. Zero weights are dropped.
    pub fn from_entries(mut entries: Vec<(u32, f32)>) -> Self {
        entries.sort_unstable_by_key(|&(dim, _)| dim);
        let mut merged: Vec<(u32, f32)> = Vec::with_capacity(entries.len());
        for (dim, weight) in entries {
            match merged.last_mut() {
                Some((last_dim, last_weight)) if *last_dim == dim => *last_weight += weight,
                _ => merged.push((dim, weight)),
            }
        }
        merged.retain(|&(_, w)| w != 0.0);
        SparseVector { entries: merged }
    }

    /// Whether the vector has no non-zero components.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of non-zero components.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The L2 norm of the vector.
    pub fn norm(&self) -> f32 {
        self.entries
            .iter()
            .map(|&(_, w)| w * w)
            .sum::<f32>()
            .sqrt()
    }

    /// Scale the vector to unit L2 norm. A zero vector is left unchanged.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
    }

    /// Dot product with another sparse vector (merge walk over both).
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let mut sum = 0.0;
        let mut a = self.entries.iter().peekable();
        let mut b = other.entries.iter().peekable();
        while let (Some(&&(dim_a, w_a)), Some(&&(dim_b, w_b))) = (a.peek(), b.peek()) {
            match dim_a.cmp(&dim_b) {
                std::cmp::Ordering::Less => {
                    a.next();
                }
                std::cmp::Ordering::Greater => {
                    b.next();
                }
                std::cmp::Ordering::Equal => {
                    sum += w_a * w_b;
                    a.next();
                    b.next();
                }
            }
        }
        sum
    }

    /// Cosine similarity against another vector, clamped to [0, 1].
    ///
    /// Both vectors are expected to be unit length already (the index
    /// normalizes everything it hands out), so this is the dot product with
    /// a defensive clamp for negative or slightly-over-unit values.
    pub fn cosine(&self, other: &SparseVector) -> f32 {
        self.dot(other).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_sorts_and_merges() {
        let v = SparseVector::from_entries(vec![(3, 1.0), (1, 2.0), (3, 0.5)]);
        assert_eq!(v.len(), 2);
        assert!((v.dot(&SparseVector::from_entries(vec![(3, 1.0)])) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_unit_norm() {
        let mut v = SparseVector::from_entries(vec![(0, 3.0), (1, 4.0)]);
        v.normalize();
        assert!((v.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_is_noop() {
        let mut v = SparseVector::default();
        v.normalize();
        assert!(v.is_empty());
        assert_eq!(v.norm(), 0.0);
    }

    #[test]
    fn test_dot_disjoint_dimensions() {
        let a = SparseVector::from_entries(vec![(0, 1.0), (2, 1.0)]);
        let b = SparseVector::from_entries(vec![(1, 1.0), (3, 1.0)]);
        assert_eq!(a.dot(&b), 0.0);
    }

    #[test]
    fn test_cosine_identical_unit_vectors() {
        let mut a = SparseVector::from_entries(vec![(0, 1.0), (1, 1.0)]);
        a.normalize();
        assert!((a.cosine(&a) - 1.0).abs() < 1e-6);
    }
}
