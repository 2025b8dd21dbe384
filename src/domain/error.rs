// ============================================================
// Layer 3 — Domain Errors
// ============================================================
// Every failure here is fatal for a run; nothing is retried.
// Application code wraps these in anyhow with extra context.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    /// A split directory or one of its pos/neg subdirectories is absent
    #[error("missing data directory '{}'", .0.display())]
    MissingData(PathBuf),

    #[error("split '{0}' contains no examples")]
    EmptySplit(String),

    /// A review file is not valid UTF-8 text
    #[error("'{}' is not valid UTF-8 text", .0.display())]
    Encoding(PathBuf),

    #[error("non-finite loss {loss} at epoch {epoch}, batch {batch}")]
    NumericalInstability { epoch: usize, batch: usize, loss: f64 },

    #[error("invalid embedding at line {line}: {reason}")]
    InvalidEmbedding { line: usize, reason: String },

    /// Both splits together must contain pos and neg reviews
    #[error("expected labels pos and neg, found {0:?}")]
    IncompleteLabels(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SentimentError::MissingData(PathBuf::from("data/train/pos"));
        assert!(err.to_string().contains("data/train/pos"));

        let err = SentimentError::EmptySplit("dev".to_string());
        assert_eq!(err.to_string(), "split 'dev' contains no examples");

        let err = SentimentError::NumericalInstability { epoch: 2, batch: 7, loss: f64::NAN };
        assert!(err.to_string().contains("epoch 2, batch 7"));

        let err = SentimentError::IncompleteLabels(vec!["pos".to_string()]);
        assert_eq!(err.to_string(), "expected labels pos and neg, found [\"pos\"]");
    }
}
