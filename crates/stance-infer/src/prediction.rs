use crate::{InferError, LabelSet};
use std::fmt;

/// How far the sum of non-negative scores may drift from 1 and still count as probabilities.
const MASS_TOLERANCE: f32 = 0.05;

/// Turns raw model output into a probability distribution.
///
/// Non-negative scores whose sum is within 5% of 1 are probabilities, possibly drifted by a
/// quantized export; they are only renormalised. Anything else counts as logits and goes through
/// softmax.
pub fn to_distribution(raw: &[f32]) -> Vec<f32> {
    let sum: f32 = raw.iter().sum();
    let is_probability = raw.iter().all(|s| s.is_finite() && *s >= 0.0)
        && (sum - 1.0).abs() <= MASS_TOLERANCE;
    if is_probability {
        return raw.iter().map(|s| s / sum).collect();
    }

    let max = raw.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exp: Vec<f32> = raw.iter().map(|s| (s - max).exp()).collect();
    let total: f32 = exp.iter().sum();
    exp.into_iter().map(|e| e / total).collect()
}

/// One classification result: the full distribution and its top entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    scores: Vec<f32>,
    index: usize,
    label: String,
}

impl Prediction {
    /// Pairs `scores` with `labels`. The first maximum wins ties.
    pub fn new(scores: Vec<f32>, labels: &LabelSet) -> Result<Self, InferError> {
        if scores.len() != labels.len() {
            return Err(InferError::LabelCount {
                labels: labels.len(),
                outputs: scores.len(),
            });
        }
        let index = scores
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, &s)| match best {
                Some((_, top)) if s.total_cmp(&top).is_le() => best,
                _ => Some((i, s)),
            })
            .map(|(i, _)| i)
            .ok_or_else(|| InferError::Labels("empty label set".to_string()))?;
        let label = labels
            .get(index)
            .ok_or_else(|| InferError::Labels(format!("no label at index {index}")))?
            .to_string();

        Ok(Self {
            scores,
            index,
            label,
        })
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn confidence(&self) -> f32 {
        self.scores[self.index]
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2})", self.label, self.confidence())
    }
}
