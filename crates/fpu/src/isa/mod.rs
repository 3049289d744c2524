//! Floating-point instruction set: field constants, effective addressing,
//! and the dispatcher.

/// Effective-address resolver (operand load/store through the bus).
pub mod ea;
/// Instruction dispatcher for the two F-line entry points.
pub mod execute;
/// Extension-word field and operation-code constants.
pub mod opcodes;
/// Fixed cycle costs per operation.
pub mod timing;
