// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records a run to an optional output directory:
//
//   <metrics_dir>/
//     metrics.csv       ← one row per finished epoch
//     run_config.json   ← resolved TrainConfig
//     evaluation.json   ← confusion matrix, accuracy, MCC
//
// Example CSV output:
//   epoch,mean_loss,batches
//   1,0.652310,391
//   2,0.541207,391
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

use crate::domain::metrics::EvaluationReport;

/// Loss summary of a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean binary cross-entropy over all batches of the epoch
    pub mean_loss: f64,

    pub batches: usize,
}

impl EpochMetrics {
    pub fn new(epoch: usize, mean_loss: f64, batches: usize) -> Self {
        Self { epoch, mean_loss, batches }
    }
}

/// Writes run outputs into one directory.
pub struct MetricsLogger {
    dir:      PathBuf,
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the directory and a fresh CSV with its header row.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)
            .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
        writeln!(f, "epoch,mean_loss,batches")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { dir, csv_path })
    }

    /// Append one epoch as a new CSV row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;
        writeln!(f, "{},{:.6},{}", m.epoch, m.mean_loss, m.batches)?;

        tracing::debug!("Logged epoch {} mean_loss={:.4}", m.epoch, m.mean_loss);
        Ok(())
    }

    /// Save the resolved run configuration as pretty JSON.
    pub fn save_config<T: Serialize>(&self, config: &T) -> Result<()> {
        self.write_json("run_config.json", config)
    }

    pub fn save_evaluation(&self, report: &EvaluationReport) -> Result<()> {
        self.write_json("evaluation.json", report)
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Wrote '{}'", path.display());
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::ConfusionMatrix;
    use tempfile::TempDir;

    #[test]
    fn test_csv_rows_are_appended() {
        let tmp    = TempDir::new().unwrap();
        let logger = MetricsLogger::new(tmp.path().join("run")).unwrap();
        logger.log(&EpochMetrics::new(1, 0.693147, 4)).unwrap();
        logger.log(&EpochMetrics::new(2, 0.5, 4)).unwrap();

        let csv = fs::read_to_string(tmp.path().join("run").join("metrics.csv")).unwrap();
        assert_eq!(csv, "epoch,mean_loss,batches\n1,0.693147,4\n2,0.500000,4\n");
    }

    #[test]
    fn test_evaluation_json() {
        let tmp    = TempDir::new().unwrap();
        let logger = MetricsLogger::new(tmp.path()).unwrap();
        let report = EvaluationReport::from(ConfusionMatrix::new(0, 0, 0, 5));
        logger.save_evaluation(&report).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(tmp.path().join("evaluation.json")).unwrap()).unwrap();
        assert_eq!(json["confusion"]["false_negative"], 5);
        assert!(json["mcc"].is_null());
        assert_eq!(json["accuracy"], 0.0);
    }
}
