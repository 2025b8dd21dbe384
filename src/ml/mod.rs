// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here:
//
//   model.rs     — LSTM and CNN sentiment classifiers behind
//                  the SentimentClassifier trait
//
//   trainer.rs   — Training loop: forward, BCE-with-logits,
//                  backward, Adam step, NaN/Inf detection
//
//   evaluator.rs — Gradient-free pass over the evaluation
//                  split producing a confusion matrix
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM
//            Kim (2014) CNNs for sentence classification

/// Classifier architectures
pub mod model;

/// Training loop
pub mod trainer;

/// Confusion-matrix evaluation
pub mod evaluator;
