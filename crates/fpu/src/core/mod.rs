//! Subsystem state: register files, status flags, and the instruction cursor.

/// Floating-point subsystem state object and instruction-stream cursor.
pub mod fpu;
/// Data, address, and floating-point register files plus control registers.
pub mod registers;
/// Condition-code derivation and branch/compare predicate evaluation.
pub mod status;
