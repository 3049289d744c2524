//! Motorola 68040 floating-point instruction subsystem.
//!
//! This crate implements the FPU side of a cycle-level 68040 emulator with
//! the following:
//! 1. **Effective addressing:** A 6-bit operand specifier resolved to a
//!    register or byte/word/long/double/extended memory operand across the
//!    68k addressing modes, with sized load/store through a borrowed bus.
//! 2. **Condition codes:** The FPSR Negative/Zero/Infinity/NaN byte derived
//!    bit-for-bit from result patterns, and the FBcc predicate set with IEEE
//!    unordered tie-breaking.
//! 3. **Dispatch:** Extension-word decode and execution of the ALU,
//!    move-to-memory, control-register, multi-register, and conditional
//!    branch families, charging fixed cycle costs.
//!
//! The enclosing processor core owns the bus and calls the two entry points
//! ([`Fpu::execute_general`] and [`Fpu::execute_save_restore`]) with the
//! already-fetched first opcode word. Malformed or unimplemented encodings
//! surface as typed [`DecodeError`] values; the caller decides whether the
//! emulated run halts.

/// Memory bus trait (the subsystem's only way to touch memory).
pub mod bus;
/// Common types: decode errors and the tagged floating-point value.
pub mod common;
/// Subsystem state: register files, status flags, instruction cursor.
pub mod core;
/// Instruction set: field constants, effective addressing, dispatch.
pub mod isa;

/// Memory bus borrowed from the enclosing core.
pub use crate::bus::Bus;
/// Typed decode/unsupported-feature outcome; replaces hard termination.
pub use crate::common::error::DecodeError;
/// Tagged floating-point register value (raw bits plus interpreted double).
pub use crate::common::value::FpValue;
/// Subsystem state object; construct with `Fpu::new`.
pub use crate::core::fpu::Fpu;
/// Register file view of the enclosing core.
pub use crate::core::registers::Registers;
