//! M68040 register file view.
//!
//! This module implements the operand store the resolver and dispatcher read
//! and mutate. It maintains:
//! 1. **Integer registers:** Eight data registers (`d0`-`d7`) and eight
//!    address registers (`a0`-`a7`).
//! 2. **Floating-point registers:** Eight 64-bit registers (`fp0`-`fp7`)
//!    stored as [`FpValue`] tagged patterns.
//! 3. **Control registers:** FPCR (rounding/exception control, opaque to
//!    arithmetic here), FPSR (condition codes and accrued exceptions), and
//!    FPIAR (instruction address, opaque passthrough).
//!
//! The register file is an explicit state object: all mutation flows through
//! the resolver and dispatcher, never through process-wide globals.

use crate::common::value::FpValue;

/// Register file of the enclosing core, as seen by the FPU subsystem.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    /// Data registers `d0`-`d7`.
    pub d: [u32; 8],
    /// Address registers `a0`-`a7`.
    pub a: [u32; 8],
    /// Floating-point registers `fp0`-`fp7`.
    pub fp: [FpValue; 8],
    /// Floating-point control register (rounding/exception control).
    pub fpcr: u32,
    /// Floating-point status register (condition codes, accrued exceptions).
    pub fpsr: u32,
    /// Floating-point instruction address register.
    pub fpiar: u32,
}

impl Registers {
    /// Creates a register file with every register cleared.
    pub fn new() -> Self {
        Self::default()
    }
}
