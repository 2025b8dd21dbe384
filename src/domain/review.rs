// ============================================================
// Layer 3 — Review Domain Type
// ============================================================
// One labelled example of the IMDB corpus: the first line of
// a review file plus the label taken from its directory name.
//
// Reference: Rust Book §5 (Structs), §6 (Enums)

use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf};

/// Binary sentiment label.
///
/// The training target is fixed here (`Positive` → 1,
/// `Negative` → 0) rather than derived from the order in
/// which labels were first observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Both labels in directory-scan order.
    pub const ALL: [Sentiment; 2] = [Sentiment::Positive, Sentiment::Negative];

    /// Name of the label directory (and of the label string).
    pub fn dir_name(self) -> &'static str {
        match self {
            Sentiment::Positive => "pos",
            Sentiment::Negative => "neg",
        }
    }

    /// 0/1 target used by the loss and the confusion matrix.
    pub fn target(self) -> u8 {
        match self {
            Sentiment::Positive => 1,
            Sentiment::Negative => 0,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// A raw review loaded from disk. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    /// File the review was read from
    pub source: PathBuf,

    /// First line of the file, untouched
    pub text: String,

    pub sentiment: Sentiment,
}

impl Review {
    pub fn new(source: impl Into<PathBuf>, text: impl Into<String>, sentiment: Sentiment) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
            sentiment,
        }
    }
}
