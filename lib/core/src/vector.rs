use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Skill vectors are short; keep them inline.
const INLINE_DIM: usize = 16;

/// A player's skill scores in feature-column order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureVector {
    data: SmallVec<[f64; INLINE_DIM]>,
}

impl FeatureVector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self {
            data: SmallVec::from_vec(data),
        }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: SmallVec::from_slice(data),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn dot(&self, other: &FeatureVector) -> f64 {
        self.data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Euclidean norm, accumulated over components divided by the largest one
    #[inline]
    pub fn norm(&self) -> f64 {
        let max = self.max_abs();
        if max == 0.0 || !max.is_finite() {
            return self.dot(self).sqrt();
        }
        max * self.data.iter().map(|v| (v / max) * (v / max)).sum::<f64>().sqrt()
    }

    /// Compute cosine similarity with another vector
    ///
    /// Returns 0.0 when the dimensions differ or either vector has zero
    /// magnitude. The result is clamped to [-1.0, 1.0].
    #[inline]
    pub fn cosine_similarity(&self, other: &FeatureVector) -> f64 {
        match self.cosine_terms(other) {
            Some(terms) => terms.iter().sum::<f64>().clamp(-1.0, 1.0),
            None => 0.0,
        }
    }

    /// Per-component terms of the cosine similarity: `a_i * b_i / (|a| |b|)`.
    ///
    /// They sum to [`cosine_similarity`](Self::cosine_similarity) up to
    /// rounding. All zero when the similarity is undefined.
    pub fn cosine_contributions(&self, other: &FeatureVector) -> Vec<f64> {
        match self.cosine_terms(other) {
            Some(terms) => terms.into_vec(),
            None => vec![0.0; self.dim()],
        }
    }

    fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |m, v| m.max(v.abs()))
    }

    /// Copy divided by the largest absolute component; `None` for a zero or
    /// non-finite vector
    fn rescaled(&self) -> Option<FeatureVector> {
        let max = self.max_abs();
        (max > 0.0 && max.is_finite()).then(|| self.data.iter().map(|v| v / max).collect())
    }

    // both sides rescaled to a largest component of 1
    fn cosine_terms(&self, other: &FeatureVector) -> Option<SmallVec<[f64; INLINE_DIM]>> {
        if self.dim() != other.dim() {
            return None;
        }
        let a = self.rescaled()?;
        let b = other.rescaled()?;
        let denom = a.norm() * b.norm();
        Some(a.data.iter().zip(b.data.iter()).map(|(x, y)| x * y / denom).collect())
    }
}

impl From<Vec<f64>> for FeatureVector {
    fn from(data: Vec<f64>) -> Self {
        FeatureVector::new(data)
    }
}

impl FromIterator<f64> for FeatureVector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}
