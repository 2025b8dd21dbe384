// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing the core
// concepts of the sentiment pipeline.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A labelled movie review and its sentiment label
pub mod review;

// Confusion matrix, accuracy and MCC
pub mod metrics;

// Error kinds shared by every layer
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
