use std::fmt;

use crate::record::Label;

/// 2x2 tally of true label against predicted label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    // cells[truth][predicted]
    cells: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, truth: Label, predicted: Label) {
        self.cells[truth.index()][predicted.index()] += 1;
    }

    pub fn count(&self, truth: Label, predicted: Label) -> usize {
        self.cells[truth.index()][predicted.index()]
    }

    /// Number of test records whose true label is `truth`.
    pub fn class_total(&self, truth: Label) -> usize {
        self.cells[truth.index()].iter().sum()
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    pub fn correct(&self) -> usize {
        Label::ALL.iter().map(|&l| self.count(l, l)).sum()
    }

    /// Fraction of records predicted correctly; `None` for an empty matrix.
    pub fn accuracy(&self) -> Option<f64> {
        ratio(self.correct(), self.total())
    }

    /// Of everything flagged as spam, how much really was.
    pub fn spam_precision(&self) -> Option<f64> {
        let flagged = self.count(Label::Spam, Label::Spam) + self.count(Label::Ham, Label::Spam);
        ratio(self.count(Label::Spam, Label::Spam), flagged)
    }

    /// Of all real spam, how much was caught.
    pub fn spam_recall(&self) -> Option<f64> {
        ratio(
            self.count(Label::Spam, Label::Spam),
            self.class_total(Label::Spam),
        )
    }
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

/// Per-class record counts for one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub spam: usize,
    pub ham: usize,
    pub skipped: usize,
}

impl ClassCounts {
    pub fn total(&self) -> usize {
        self.spam + self.ham
    }
}

/// Everything the run reports once both phases are done.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationReport {
    pub training: ClassCounts,
    pub confusion: ConfusionMatrix,
    pub test_skipped: usize,
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.confusion;

        writeln!(f, "The training set has {} emails", self.training.total())?;
        writeln!(f, "Spam emails: {}", self.training.spam)?;
        writeln!(f, "Ham emails: {}", self.training.ham)?;
        if self.training.skipped > 0 {
            writeln!(f, "Skipped malformed lines: {}", self.training.skipped)?;
        }

        writeln!(f, "The test set has {} emails", m.total())?;
        writeln!(f, "Spam emails: {}", m.class_total(Label::Spam))?;
        writeln!(f, "Ham emails: {}", m.class_total(Label::Ham))?;
        if self.test_skipped > 0 {
            writeln!(f, "Skipped malformed lines: {}", self.test_skipped)?;
        }

        writeln!(f, "Ham predicted as ham: {}", m.count(Label::Ham, Label::Ham))?;
        writeln!(f, "Spam predicted as spam: {}", m.count(Label::Spam, Label::Spam))?;
        writeln!(f, "Spam predicted as ham: {}", m.count(Label::Spam, Label::Ham))?;
        writeln!(f, "Ham predicted as spam: {}", m.count(Label::Ham, Label::Spam))?;

        if let Some(precision) = m.spam_precision() {
            writeln!(f, "Spam precision: {:.2}%", precision * 100.0)?;
        }
        if let Some(recall) = m.spam_recall() {
            writeln!(f, "Spam recall: {:.2}%", recall * 100.0)?;
        }
        match m.accuracy() {
            Some(accuracy) => write!(f, "The prediction accuracy is: {:.2}%", accuracy * 100.0),
            None => write!(f, "The prediction accuracy is: n/a (empty test set)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(cells: &[(Label, Label, usize)]) -> ConfusionMatrix {
        let mut m = ConfusionMatrix::new();
        for &(truth, predicted, n) in cells {
            for _ in 0..n {
                m.record(truth, predicted);
            }
        }
        m
    }

    #[test]
    fn cells_sum_to_total() {
        use Label::*;
        let m = matrix(&[(Spam, Spam, 7), (Spam, Ham, 3), (Ham, Ham, 9), (Ham, Spam, 1)]);

        assert_eq!(m.total(), 20);
        assert_eq!(
            m.total(),
            m.count(Spam, Spam) + m.count(Spam, Ham) + m.count(Ham, Ham) + m.count(Ham, Spam)
        );
        assert_eq!(m.class_total(Spam), 10);
        assert_eq!(m.class_total(Ham), 10);
        assert_eq!(m.correct(), 16);
        assert_eq!(m.accuracy(), Some(0.8));
        assert_eq!(m.spam_precision(), Some(0.875));
        assert_eq!(m.spam_recall(), Some(0.7));
    }

    #[test]
    fn empty_matrix_has_no_rates() {
        let m = ConfusionMatrix::new();
        assert_eq!(m.total(), 0);
        assert_eq!(m.accuracy(), None);
        assert_eq!(m.spam_precision(), None);
        assert_eq!(m.spam_recall(), None);
    }

    #[test]
    fn report_lists_every_counter() {
        use Label::*;
        let report = EvaluationReport {
            training: ClassCounts {
                spam: 3,
                ham: 2,
                skipped: 0,
            },
            confusion: matrix(&[(Spam, Spam, 1), (Ham, Ham, 2), (Ham, Spam, 1)]),
            test_skipped: 2,
        };
        let text = report.to_string();

        assert!(text.contains("The training set has 5 emails"));
        assert!(text.contains("The test set has 4 emails"));
        assert!(text.contains("Spam emails: 1"));
        assert!(text.contains("Ham emails: 2"));
        assert!(text.contains("Ham predicted as spam: 1"));
        assert!(text.contains("Spam predicted as ham: 0"));
        assert!(text.contains("Skipped malformed lines: 2"));
        assert!(text.ends_with("The prediction accuracy is: 75.00%"));
        assert_eq!(text.matches("Skipped").count(), 1);
    }
}
