// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (training a classifier or inspecting a corpus).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No report printing here (that's Layer 1)
//   - No direct file parsing (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Train on one split, evaluate on another
pub mod train_use_case;

// Corpus and vocabulary statistics without training
pub mod inspect_use_case;
