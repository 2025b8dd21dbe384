// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from review files on disk to padded tensor
// batches:
//
//   <root>/<split>/{pos,neg}/*.txt
//       │
//       ▼
//   ImdbLoader         → reads first line of each file + label
//       │
//       ▼
//   VocabularyBuilder  → token ids, label ids, embedding table
//       │
//       ▼
//   ReviewDataset      → implements Burn's Dataset trait
//       │
//       ▼
//   BucketIterator     → shuffled, length-pooled batch plans
//       │
//       ▼
//   ReviewBatcher      → sorted, embedded, zero-padded tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads labelled reviews from the IMDB directory layout
pub mod loader;

/// Token and label vocabularies, embedding table
pub mod vocabulary;

/// Implements Burn's Dataset trait for encoded reviews
pub mod dataset;

/// Implements Burn's Batcher trait to create padded batches
pub mod batcher;

/// Epoch-level shuffling, pooling and batching
pub mod iterator;
