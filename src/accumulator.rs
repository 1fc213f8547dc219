use crate::error::{BayesError, Result};
use crate::model::ProbabilityModel;
use crate::record::{EmailRecord, Label};
use crate::vector;

/// Running per-class word totals and record counts over a training stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassAccumulator {
    word_totals: [Vec<f64>; 2],
    counts: [usize; 2],
}

impl ClassAccumulator {
    pub fn new(word_set_size: usize) -> Self {
        ClassAccumulator {
            word_totals: [vec![0.0; word_set_size], vec![0.0; word_set_size]],
            counts: [0; 2],
        }
    }

    pub fn add(&mut self, record: &EmailRecord) -> Result<()> {
        let class = record.label().index();
        vector::add_assign(&mut self.word_totals[class], record.features())?;
        self.counts[class] += 1;
        Ok(())
    }

    /// Folds another accumulator's sums into this one.
    pub fn merge(&mut self, other: &ClassAccumulator) -> Result<()> {
        if self.word_set_size() != other.word_set_size() {
            return Err(BayesError::LengthMismatch {
                expected: self.word_set_size(),
                actual: other.word_set_size(),
            });
        }
        for class in 0..2 {
            vector::add_assign(&mut self.word_totals[class], &other.word_totals[class])?;
            self.counts[class] += other.counts[class];
        }
        Ok(())
    }

    pub fn word_totals(&self, label: Label) -> &[f64] {
        &self.word_totals[label.index()]
    }

    pub fn count(&self, label: Label) -> usize {
        self.counts[label.index()]
    }

    pub fn total_count(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn word_set_size(&self) -> usize {
        self.word_totals[0].len()
    }

    /// Freezes the sums into log-probabilities.
    pub fn finish(self) -> Result<ProbabilityModel> {
        ProbabilityModel::derive(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(features: &[f64], label: Label) -> EmailRecord {
        EmailRecord::new(features.to_vec(), label).unwrap()
    }

    #[test]
    fn sums_per_class() {
        let mut acc = ClassAccumulator::new(2);
        acc.add(&record(&[1.0, 2.0], Label::Spam)).unwrap();
        acc.add(&record(&[3.0, 4.0], Label::Spam)).unwrap();
        acc.add(&record(&[0.5, 0.5], Label::Ham)).unwrap();

        assert_eq!(acc.word_totals(Label::Spam), &[4.0, 6.0]);
        assert_eq!(acc.word_totals(Label::Ham), &[0.5, 0.5]);
        assert_eq!(acc.count(Label::Spam), 2);
        assert_eq!(acc.count(Label::Ham), 1);
        assert_eq!(acc.total_count(), 3);
    }

    #[test]
    fn merge_matches_single_pass() {
        let r1 = record(&[1.0, 2.0], Label::Spam);
        let r2 = record(&[0.25, 4.0], Label::Ham);
        let r3 = record(&[2.0, 0.5], Label::Spam);

        let mut together = ClassAccumulator::new(2);
        for r in [&r1, &r2, &r3] {
            together.add(r).unwrap();
        }

        let mut left = ClassAccumulator::new(2);
        left.add(&r3).unwrap();
        let mut right = ClassAccumulator::new(2);
        right.add(&r2).unwrap();
        right.add(&r1).unwrap();
        left.merge(&right).unwrap();

        assert_eq!(together, left);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let mut acc = ClassAccumulator::new(3);
        let err = acc.add(&record(&[1.0, 2.0], Label::Ham)).unwrap_err();
        assert!(matches!(
            err,
            BayesError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        ));
        assert_eq!(acc.count(Label::Ham), 0);

        assert!(acc.merge(&ClassAccumulator::new(2)).is_err());
    }
}
