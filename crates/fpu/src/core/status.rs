//! Floating-point condition-code engine.
//!
//! This module derives the FPSR condition-code byte from a result's raw bit
//! pattern and evaluates branch/compare predicates against it. It provides:
//! 1. **Flag derivation:** Negative, Zero, Infinity, and NaN recomputed
//!    together from a single [`FpValue`]; the four bits are never partially
//!    updated.
//! 2. **Predicate evaluation:** The 6-bit condition codes used by FBcc,
//!    with NaN biasing the unordered family (0x1A-0x1D) true per the IEEE
//!    unordered-comparison convention.

use crate::common::error::DecodeError;
use crate::common::value::FpValue;
use crate::core::registers::Registers;

/// FPSR condition-code bit: result is negative.
pub const FPCC_N: u32 = 0x0800_0000;
/// FPSR condition-code bit: result is zero.
pub const FPCC_Z: u32 = 0x0400_0000;
/// FPSR condition-code bit: result is an infinity.
pub const FPCC_I: u32 = 0x0200_0000;
/// FPSR condition-code bit: result is a NaN.
pub const FPCC_NAN: u32 = 0x0100_0000;

/// Sign bit of a 64-bit IEEE 754 pattern.
const SIGN_BIT: u64 = 0x8000_0000_0000_0000;
/// Exponent field of a 64-bit IEEE 754 pattern.
const EXPONENT: u64 = 0x7ff0_0000_0000_0000;
/// Mantissa field of a 64-bit IEEE 754 pattern.
const MANTISSA: u64 = 0x000f_ffff_ffff_ffff;

impl Registers {
    /// Rederives the FPSR condition codes from a result's raw bit pattern.
    ///
    /// All four bits are replaced atomically:
    /// - N: sign bit set.
    /// - Z: all bits except the sign are zero.
    /// - I: exponent all ones and mantissa zero (either infinity).
    /// - NaN: exponent all ones and mantissa nonzero.
    pub fn set_condition_codes(&mut self, result: FpValue) {
        let bits = result.bits();
        self.fpsr &= !(FPCC_N | FPCC_Z | FPCC_I | FPCC_NAN);

        if bits & SIGN_BIT != 0 {
            self.fpsr |= FPCC_N;
        }
        if bits & !SIGN_BIT == 0 {
            self.fpsr |= FPCC_Z;
        }
        if bits & !SIGN_BIT == EXPONENT {
            self.fpsr |= FPCC_I;
        }
        if bits & EXPONENT == EXPONENT && bits & MANTISSA != 0 {
            self.fpsr |= FPCC_NAN;
        }
    }

    /// Evaluates a 6-bit branch/compare predicate against the current
    /// condition codes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Predicate`] for codes outside the defined set.
    pub fn test_condition(&self, predicate: u8) -> Result<bool, DecodeError> {
        let n = self.fpsr & FPCC_N != 0;
        let z = self.fpsr & FPCC_Z != 0;
        let nan = self.fpsr & FPCC_NAN != 0;

        match predicate {
            0x00 => Ok(false),                     // False
            0x01 => Ok(z),                         // Equal
            0x0e => Ok(!z),                        // Not Equal
            0x0f => Ok(true),                      // True
            0x12 => Ok(!(nan || z || n)),          // Greater Than
            0x13 => Ok(z || !(nan || n)),          // Greater or Equal
            0x14 => Ok(n && !(nan || z)),          // Less Than
            0x15 => Ok(z || (n && !nan)),          // Less Than or Equal
            0x1a => Ok(nan || !(n || z)),          // Not Less Than or Equal
            0x1b => Ok(nan || z || !n),            // Not Less Than
            0x1c => Ok(nan || (n && !z)),          // Not Greater or Equal
            0x1d => Ok(nan || z || n),             // Not Greater Than
            _ => Err(DecodeError::Predicate { predicate }),
        }
    }
}
