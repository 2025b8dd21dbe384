// ============================================================
// Layer 3 — Classification Metrics
// ============================================================
// A 2×2 confusion matrix accumulated over evaluation batches,
// and the two numbers reported at the end of a run:
//
//   accuracy = (TP + TN) / total
//   MCC      = (TP·TN − FP·FN)
//              / sqrt((TP+FP)(TP+FN)(TN+FP)(TN+FN))
//
// MCC is undefined when any marginal sum is zero (e.g. the
// model predicted a single class for every review). That case
// is returned as `None`, never as an error or a NaN.
//
// Reference: Matthews (1975), Chicco & Jurman (2020)

use serde::{Deserialize, Serialize};
use std::{fmt, ops::AddAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive:  u64,
    pub true_negative:  u64,
    pub false_positive: u64,
    pub false_negative: u64,
}

impl ConfusionMatrix {
    pub fn new(true_positive: u64, true_negative: u64, false_positive: u64, false_negative: u64) -> Self {
        Self { true_positive, true_negative, false_positive, false_negative }
    }

    /// Count one prediction against its ground truth.
    pub fn record(&mut self, predicted: bool, actual: bool) {
        match (predicted, actual) {
            (true,  true)  => self.true_positive  += 1,
            (false, false) => self.true_negative  += 1,
            (true,  false) => self.false_positive += 1,
            (false, true)  => self.false_negative += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.true_positive + self.true_negative + self.false_positive + self.false_negative
    }

    /// Fraction of correct predictions, `None` for an empty matrix.
    pub fn accuracy(&self) -> Option<f64> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        Some((self.true_positive + self.true_negative) as f64 / total as f64)
    }

    /// Matthews Correlation Coefficient, `None` when undefined.
    pub fn mcc(&self) -> Option<f64> {
        let tp = self.true_positive  as f64;
        let tn = self.true_negative  as f64;
        let fp = self.false_positive as f64;
        let fn_ = self.false_negative as f64;

        let denominator = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        if denominator == 0.0 {
            return None;
        }
        Some((tp * tn - fp * fn_) / denominator)
    }

    /// The same matrix with the positive and negative classes swapped.
    pub fn swapped(&self) -> Self {
        Self {
            true_positive:  self.true_negative,
            true_negative:  self.true_positive,
            false_positive: self.false_negative,
            false_negative: self.false_positive,
        }
    }
}

impl AddAssign for ConfusionMatrix {
    fn add_assign(&mut self, rhs: Self) {
        self.true_positive  += rhs.true_positive;
        self.true_negative  += rhs.true_negative;
        self.false_positive += rhs.false_positive;
        self.false_negative += rhs.false_negative;
    }
}

/// Final outcome of an evaluation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub confusion: ConfusionMatrix,
    pub accuracy:  Option<f64>,
    pub mcc:       Option<f64>,
}

impl From<ConfusionMatrix> for EvaluationReport {
    fn from(confusion: ConfusionMatrix) -> Self {
        Self {
            accuracy: confusion.accuracy(),
            mcc:      confusion.mcc(),
            confusion,
        }
    }
}

/// Two-line summary printed at the end of `train`.
impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.accuracy {
            Some(acc) => writeln!(f, "Classification accuracy: {:.2}%", acc * 100.0)?,
            None      => writeln!(f, "Classification accuracy: undefined")?,
        }
        match self.mcc {
            Some(mcc) => write!(f, "Matthews Correlation Coefficient: {:.2}", mcc),
            None      => write!(f, "Matthews Correlation Coefficient: undefined"),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_routes_to_cells() {
        let mut m = ConfusionMatrix::default();
        m.record(true,  true);
        m.record(false, false);
        m.record(false, false);
        m.record(true,  false);
        m.record(false, true);
        assert_eq!(m, ConfusionMatrix::new(1, 2, 1, 1));
        assert_eq!(m.total(), 5);
    }

    #[test]
    fn test_accuracy_is_exact() {
        // Exhaustive over small matrices: accuracy == (TP+TN)/N
        for tp in 0..5u64 {
            for tn in 0..5u64 {
                for fp in 0..5u64 {
                    for fn_ in 0..5u64 {
                        let m = ConfusionMatrix::new(tp, tn, fp, fn_);
                        let n = tp + tn + fp + fn_;
                        if n == 0 {
                            assert_eq!(m.accuracy(), None);
                        } else {
                            assert_eq!(m.accuracy(), Some((tp + tn) as f64 / n as f64));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_mcc_perfect_and_inverse() {
        assert_eq!(ConfusionMatrix::new(10, 10, 0, 0).mcc(), Some(1.0));
        assert_eq!(ConfusionMatrix::new(0, 0, 10, 10).mcc(), Some(-1.0));
    }

    #[test]
    fn test_mcc_known_value() {
        // (6·3 − 1·2) / sqrt(7·8·4·5) = 16 / sqrt(1120)
        let m = ConfusionMatrix::new(6, 3, 1, 2);
        let expected = 16.0 / 1120f64.sqrt();
        assert!((m.mcc().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_mcc_symmetric_under_class_swap() {
        let cases = [(6, 3, 1, 2), (40, 25, 7, 11), (1, 1, 1, 1), (0, 3, 2, 4)];
        for (tp, tn, fp, fn_) in cases {
            let m = ConfusionMatrix::new(tp, tn, fp, fn_);
            assert_eq!(m.mcc(), m.swapped().mcc());
        }
    }

    #[test]
    fn test_mcc_undefined_on_zero_marginal() {
        assert_eq!(ConfusionMatrix::new(0, 0, 0, 5).mcc(), None);
        // Model predicted "positive" for everything
        assert_eq!(ConfusionMatrix::new(4, 0, 6, 0).mcc(), None);
        assert_eq!(ConfusionMatrix::default().mcc(), None);
    }

    #[test]
    fn test_add_assign_accumulates() {
        let mut m = ConfusionMatrix::new(1, 2, 3, 4);
        m += ConfusionMatrix::new(10, 20, 30, 40);
        assert_eq!(m, ConfusionMatrix::new(11, 22, 33, 44));
    }

    #[test]
    fn test_report_formatting() {
        let report = EvaluationReport::from(ConfusionMatrix::new(6, 3, 1, 2));
        let text = report.to_string();
        assert!(text.starts_with("Classification accuracy: 75.00%\n"));
        assert!(text.ends_with("Matthews Correlation Coefficient: 0.48"));

        let degenerate = EvaluationReport::from(ConfusionMatrix::new(0, 0, 0, 5));
        assert!(degenerate.to_string().ends_with("Matthews Correlation Coefficient: undefined"));
    }
}
