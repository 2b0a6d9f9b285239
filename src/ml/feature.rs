//! Sparse feature vectors.

use serde::{Deserialize, Serialize};

/// A sparse vector of fixed dimension.
///
/// Entries are `(index, value)` pairs sorted by index with no duplicates;
/// indices not present are zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Create an all-zero vector.
    pub fn zeros(dimension: usize) -> Self {
        FeatureVector {
            dimension,
            entries: Vec::new(),
        }
    }

    /// Create a vector from unordered entries.
    ///
    /// Entries are sorted, duplicates are summed, zeros and indices outside
    /// the dimension are dropped.
    pub fn from_entries<I>(dimension: usize, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut entries: Vec<(usize, f64)> = entries
            .into_iter()
            .filter(|&(index, _)| index < dimension)
            .collect();
        entries.sort_by_key(|&(index, _)| index);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match merged.last_mut() {
                Some((last, sum)) if *last == index => *sum += value,
                _ => merged.push((index, value)),
            }
        }
        merged.retain(|&(_, value)| value != 0.0);

        FeatureVector {
            dimension,
            entries: merged,
        }
    }

    /// Get the dimension of the vector.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get the non-zero entries, sorted by index.
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Get the value at `index` (zero when absent).
    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |&(i, _)| i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Check whether every component is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Euclidean norm.
    pub fn l2_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Sum of absolute values.
    pub fn l1_norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v.abs()).sum()
    }

    /// Dot product with a dense weight vector.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|&(i, v)| weights.get(i).map(|w| w * v))
            .sum()
    }

    /// Divide every component by `divisor`; a zero divisor leaves the vector as is.
    pub fn scale_down(&mut self, divisor: f64) {
        if divisor != 0.0 {
            for (_, value) in &mut self.entries {
                *value /= divisor;
            }
        }
    }

    /// Expand into a dense vector.
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dimension];
        for &(index, value) in &self.entries {
            dense[index] = value;
        }
        dense
    }
}
