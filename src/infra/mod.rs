// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-format and tooling concerns used by the other layers:
//
//   glove.rs          — Pretrained embedding reader
//                       Parses GloVe text files into the
//                       EmbeddingProvider trait from Layer 3.
//
//   word_tokenizer.rs — Word-level tokenizer
//                       Builds a `tokenizers` WordLevel model
//                       whose ids match the vocabulary.
//
//   metrics.rs        — Run outputs
//                       Per-epoch loss CSV, run configuration
//                       and final evaluation as JSON.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// GloVe text-format embedding provider
pub mod glove;

/// WordLevel tokenizer construction and encoding
pub mod word_tokenizer;

/// Training metrics CSV and JSON writers
pub mod metrics;
