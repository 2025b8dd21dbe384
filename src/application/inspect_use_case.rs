// ============================================================
// Layer 2 — InspectUseCase
// ============================================================
// Loads the corpus and vocabulary exactly as `train` does and
// reports what was found, without building a model:
//
//   train split:     25000 reviews (12500 pos, 12500 neg)
//   dev split:       25000 reviews (12500 pos, 12500 neg)
//   labels:          pos, neg
//   vocabulary:      251639 tokens (incl. <unk>, <pad>)
//   pretrained:      98.0% of corpus tokens
//
// Useful for checking a GloVe file and data layout before
// committing to a long run.

use anyhow::Result;
use std::{fmt, path::PathBuf};

use crate::application::train_use_case::prepare_corpus;
use crate::domain::review::{Review, Sentiment};

#[derive(Debug, Clone)]
pub struct InspectConfig {
    pub data_dir:      PathBuf,
    pub embeddings:    PathBuf,
    pub train_split:   String,
    pub eval_split:    String,
    pub embedding_dim: usize,
}

/// Review counts of one split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitStats {
    pub name:     String,
    pub positive: usize,
    pub negative: usize,
}

impl SplitStats {
    fn count(name: &str, reviews: &[Review]) -> Self {
        let positive = reviews.iter().filter(|r| r.sentiment == Sentiment::Positive).count();
        Self {
            name: name.to_string(),
            positive,
            negative: reviews.len() - positive,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative
    }
}

#[derive(Debug, Clone)]
pub struct CorpusReport {
    pub splits:     Vec<SplitStats>,
    pub labels:     Vec<String>,
    pub vocab_size: usize,
    pub covered:    usize,
}

impl CorpusReport {
    /// Share of corpus tokens (specials excluded) with a pretrained vector.
    pub fn coverage(&self) -> f64 {
        let words = self.vocab_size.saturating_sub(2);
        if words == 0 {
            0.0
        } else {
            self.covered as f64 / words as f64
        }
    }
}

impl fmt::Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.splits {
            writeln!(
                f,
                "{:<16} {} reviews ({} pos, {} neg)",
                format!("{} split:", s.name),
                s.total(),
                s.positive,
                s.negative
            )?;
        }
        writeln!(f, "{:<16} {}", "labels:", self.labels.join(", "))?;
        writeln!(f, "{:<16} {} tokens (incl. <unk>, <pad>)", "vocabulary:", self.vocab_size)?;
        write!(f, "{:<16} {:.1}% of corpus tokens", "pretrained:", self.coverage() * 100.0)
    }
}

pub struct InspectUseCase {
    config: InspectConfig,
}

impl InspectUseCase {
    pub fn new(config: InspectConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<CorpusReport> {
        let cfg = &self.config;
        let corpus = prepare_corpus(
            &cfg.data_dir,
            &cfg.embeddings,
            &cfg.train_split,
            &cfg.eval_split,
            cfg.embedding_dim,
        )?;

        Ok(CorpusReport {
            splits: vec![
                SplitStats::count(&cfg.train_split, &corpus.train),
                SplitStats::count(&cfg.eval_split, &corpus.eval),
            ],
            labels:     corpus.labels.labels().to_vec(),
            vocab_size: corpus.vocab.len(),
            covered:    corpus.vocab.covered(),
        })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn corpus() -> TempDir {
        let tmp = TempDir::new().unwrap();
        for (split, label, text) in [
            ("train", "pos", "nice movie"),
            ("train", "neg", "dull movie"),
            ("train", "neg", "dull"),
            ("dev", "pos", "nice"),
            ("dev", "neg", "zzz"),
        ] {
            let dir = tmp.path().join(split).join(label);
            fs::create_dir_all(&dir).unwrap();
            let n = fs::read_dir(&dir).unwrap().count();
            fs::write(dir.join(format!("{n}.txt")), text).unwrap();
        }
        fs::write(tmp.path().join("glove.txt"), "nice 1 0\ndull -1 0\nmovie 0 1\n").unwrap();
        tmp
    }

    fn config(tmp: &TempDir) -> InspectConfig {
        InspectConfig {
            data_dir:      tmp.path().to_path_buf(),
            embeddings:    tmp.path().join("glove.txt"),
            train_split:   "train".to_string(),
            eval_split:    "dev".to_string(),
            embedding_dim: 2,
        }
    }

    #[test]
    fn test_counts_and_coverage() {
        let tmp    = corpus();
        let report = InspectUseCase::new(config(&tmp)).execute().unwrap();

        assert_eq!(report.splits[0], SplitStats { name: "train".into(), positive: 1, negative: 2 });
        assert_eq!(report.splits[1].total(), 2);
        assert_eq!(report.labels.len(), 2);
        assert_eq!(report.vocab_size, 2 + 4);
        assert_eq!(report.covered, 3);
        assert!((report.coverage() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        let report = CorpusReport {
            splits:     vec![SplitStats { name: "dev".into(), positive: 3, negative: 1 }],
            labels:     vec!["pos".into(), "neg".into()],
            vocab_size: 6,
            covered:    2,
        };
        let text = report.to_string();
        assert!(text.contains("dev split:       4 reviews (3 pos, 1 neg)"));
        assert!(text.contains("pos, neg"));
        assert!(text.ends_with("50.0% of corpus tokens"));
    }
}
