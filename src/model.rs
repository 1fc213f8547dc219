use tracing::debug;

use crate::accumulator::ClassAccumulator;
use crate::error::{BayesError, Result};
use crate::record::{EmailRecord, Label};

/// Per-class word log-probabilities and the class log-prior ratio, derived once
/// from a finished training pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityModel {
    log_probs: [Vec<f64>; 2],
    log_prior_ratio: f64,
}

/// Score of one record: `log(P(spam|X) / P(ham|X))` and the label it implies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub log_ratio: f64,
    pub label: Label,
}

impl Prediction {
    /// Positive ratios are spam. Zero (a tie) and negative ratios are ham.
    pub fn from_log_ratio(log_ratio: f64) -> Self {
        let label = if log_ratio > 0.0 {
            Label::Spam
        } else {
            Label::Ham
        };
        Prediction { log_ratio, label }
    }
}

impl ProbabilityModel {
    /// Needs at least one training record of each class.
    pub fn derive(accumulator: &ClassAccumulator) -> Result<Self> {
        let mut log_probs: [Vec<f64>; 2] = Default::default();

        for label in Label::ALL {
            let counts = accumulator.word_totals(label);
            let total: f64 = counts.iter().sum();
            if accumulator.count(label) == 0 {
                return Err(BayesError::EmptyClass(label));
            }
            if !total.is_finite() || total <= 0.0 {
                return Err(BayesError::DegenerateClass(label));
            }
            debug!(%label, records = accumulator.count(label), total_words = total, "class totals");

            let probs: Vec<f64> = counts.iter().map(|&n| (n / total).ln()).collect();
            if probs.iter().any(|lp| !lp.is_finite()) {
                return Err(BayesError::DegenerateClass(label));
            }
            log_probs[label.index()] = probs;
        }

        let log_prior_ratio = (accumulator.count(Label::Spam) as f64).ln()
            - (accumulator.count(Label::Ham) as f64).ln();
        debug!(log_prior_ratio, "derived model");

        Ok(ProbabilityModel {
            log_probs,
            log_prior_ratio,
        })
    }

    pub fn word_set_size(&self) -> usize {
        self.log_probs[0].len()
    }

    pub fn log_probs(&self, label: Label) -> &[f64] {
        &self.log_probs[label.index()]
    }

    pub fn log_prior_ratio(&self) -> f64 {
        self.log_prior_ratio
    }

    /// `sum_i x[i] * (log P(i|spam) - log P(i|ham)) + log P(spam) - log P(ham)`
    pub fn log_ratio(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.word_set_size() {
            return Err(BayesError::LengthMismatch {
                expected: self.word_set_size(),
                actual: features.len(),
            });
        }

        let spam = self.log_probs(Label::Spam);
        let ham = self.log_probs(Label::Ham);
        let evidence: f64 = features
            .iter()
            .zip(spam.iter().zip(ham))
            .map(|(&x, (&s, &h))| x * (s - h))
            .sum();

        let log_ratio = evidence + self.log_prior_ratio;
        if log_ratio.is_nan() {
            return Err(BayesError::UndefinedScore);
        }
        Ok(log_ratio)
    }

    /// Given a record, makes a prediction as to whether it is spam:
    pub fn predict(&self, record: &EmailRecord) -> Result<Prediction> {
        self.log_ratio(record.features())
            .map(Prediction::from_log_ratio)
    }
}
