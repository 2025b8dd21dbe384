// ============================================================
// Layer 4 — IMDB Corpus Loader
// ============================================================
// Reads the IMDB review layout from disk:
//
//   <root>/
//     train/
//       pos/  0_9.txt  1_7.txt ...
//       neg/  0_3.txt  1_1.txt ...
//     dev/
//       pos/ ...
//       neg/ ...
//
// Each *.txt file is one review; only its FIRST line is kept.
// The subdirectory name is the label.
//
// Entries are sorted by file name so that a seeded run sees the
// same example order on every platform.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::error::SentimentError;
use crate::domain::review::{Review, Sentiment};
use crate::domain::traits::CorpusSource;

/// Loads labelled reviews from `<root>/<split>/{pos,neg}/*.txt`.
/// Implements the CorpusSource trait from Layer 3.
pub struct ImdbLoader {
    root: PathBuf,
}

impl ImdbLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load several splits at once, in the order requested.
    pub fn load_splits(&self, splits: &[&str]) -> Result<Vec<(String, Vec<Review>)>> {
        splits
            .iter()
            .map(|split| Ok((split.to_string(), self.load_split(split)?)))
            .collect()
    }
}

impl CorpusSource for ImdbLoader {
    fn load_split(&self, split: &str) -> Result<Vec<Review>> {
        let split_dir = self.root.join(split);
        if !split_dir.is_dir() {
            return Err(SentimentError::MissingData(split_dir).into());
        }

        let mut reviews = Vec::new();
        for sentiment in Sentiment::ALL {
            let label_dir = split_dir.join(sentiment.dir_name());
            let before    = reviews.len();
            load_label_dir(&label_dir, sentiment, &mut reviews)?;
            tracing::debug!(
                "{}/{}: {} reviews",
                split,
                sentiment,
                reviews.len() - before
            );
        }

        if reviews.is_empty() {
            return Err(SentimentError::EmptySplit(split.to_string()).into());
        }

        tracing::info!("Loaded split '{}' with {} reviews", split, reviews.len());
        Ok(reviews)
    }
}

/// Append one review per `*.txt` file in `dir`.
fn load_label_dir(dir: &Path, sentiment: Sentiment, out: &mut Vec<Review>) -> Result<()> {
    if !dir.is_dir() {
        return Err(SentimentError::MissingData(dir.to_path_buf()).into());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Cannot read directory '{}'", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("Cannot list directory '{}'", dir.display()))?;
    files.retain(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("txt"));
    files.sort();

    for path in files {
        let text = read_first_line(&path)?;
        out.push(Review::new(path, text, sentiment));
    }
    Ok(())
}

/// Read a file as UTF-8 and return its first line without the
/// line terminator. An empty file yields an empty review.
fn read_first_line(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("Cannot read '{}'", path.display()))?;
    let text = String::from_utf8(bytes)
        .map_err(|_| SentimentError::Encoding(path.to_path_buf()))?;
    Ok(text.lines().next().unwrap_or("").to_string())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_review(root: &Path, split: &str, label: &str, name: &str, body: &[u8]) {
        let dir = root.join(split).join(label);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), body).unwrap();
    }

    fn error_kind(err: &anyhow::Error) -> &SentimentError {
        err.downcast_ref::<SentimentError>().expect("domain error")
    }

    #[test]
    fn test_one_review_per_file() {
        let tmp = TempDir::new().unwrap();
        for i in 0..4 {
            write_review(tmp.path(), "train", "pos", &format!("{i}_9.txt"), b"great film");
        }
        for i in 0..3 {
            write_review(tmp.path(), "train", "neg", &format!("{i}_2.txt"), b"dull film");
        }

        let reviews = ImdbLoader::new(tmp.path()).load_split("train").unwrap();
        assert_eq!(reviews.len(), 7);
        let positives = reviews.iter().filter(|r| r.sentiment == Sentiment::Positive).count();
        assert_eq!(positives, 4);
    }

    #[test]
    fn test_reads_first_line_only() {
        let tmp = TempDir::new().unwrap();
        write_review(tmp.path(), "dev", "pos", "a.txt", b"first line\nsecond line\n");
        write_review(tmp.path(), "dev", "neg", "b.txt", b"windows line\r\nmore");

        let reviews = ImdbLoader::new(tmp.path()).load_split("dev").unwrap();
        assert_eq!(reviews[0].text, "first line");
        assert_eq!(reviews[1].text, "windows line");
    }

    #[test]
    fn test_ignores_non_txt_files() {
        let tmp = TempDir::new().unwrap();
        write_review(tmp.path(), "train", "pos", "a.txt", b"kept");
        write_review(tmp.path(), "train", "pos", "notes.md", b"ignored");
        write_review(tmp.path(), "train", "neg", "b.txt", b"kept too");

        let reviews = ImdbLoader::new(tmp.path()).load_split("train").unwrap();
        assert_eq!(reviews.len(), 2);
    }

    #[test]
    fn test_missing_split_is_missing_data() {
        let tmp = TempDir::new().unwrap();
        let err = ImdbLoader::new(tmp.path()).load_split("train").unwrap_err();
        assert!(matches!(error_kind(&err), SentimentError::MissingData(_)));
    }

    #[test]
    fn test_missing_label_dir_is_missing_data() {
        let tmp = TempDir::new().unwrap();
        write_review(tmp.path(), "train", "pos", "a.txt", b"only positives");

        let err = ImdbLoader::new(tmp.path()).load_split("train").unwrap_err();
        match error_kind(&err) {
            SentimentError::MissingData(path) => assert!(path.ends_with("neg")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_empty_split() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("dev/pos")).unwrap();
        fs::create_dir_all(tmp.path().join("dev/neg")).unwrap();

        let err = ImdbLoader::new(tmp.path()).load_split("dev").unwrap_err();
        assert!(matches!(error_kind(&err), SentimentError::EmptySplit(s) if s == "dev"));
    }

    #[test]
    fn test_invalid_utf8_is_encoding_error() {
        let tmp = TempDir::new().unwrap();
        write_review(tmp.path(), "train", "pos", "bad.txt", &[0xff, 0xfe, 0x00]);
        write_review(tmp.path(), "train", "neg", "ok.txt", b"fine");

        let err = ImdbLoader::new(tmp.path()).load_split("train").unwrap_err();
        assert!(matches!(error_kind(&err), SentimentError::Encoding(_)));
    }

    #[test]
    fn test_load_splits_keeps_order() {
        let tmp = TempDir::new().unwrap();
        for split in ["train", "dev"] {
            write_review(tmp.path(), split, "pos", "a.txt", b"up");
            write_review(tmp.path(), split, "neg", "b.txt", b"down");
        }
        let splits = ImdbLoader::new(tmp.path()).load_splits(&["train", "dev"]).unwrap();
        assert_eq!(splits[0].0, "train");
        assert_eq!(splits[1].0, "dev");
    }
}
