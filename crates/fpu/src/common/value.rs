//! Tagged floating-point value.
//!
//! A floating-point register holds a 64-bit IEEE 754 pattern whose
//! interpretation is context dependent: arithmetic reads it as a double,
//! the condition-code engine reads the raw bits. `FpValue` makes that
//! reinterpretation an explicit bit-cast instead of an aliasing union.

/// A floating-point register value.
///
/// Stored as the raw 64-bit pattern; [`FpValue::to_f64`] and
/// [`FpValue::from_f64`] are the only crossings between the two views, both
/// implemented with `f64::from_bits`/`to_bits`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FpValue {
    bits: u64,
}

impl FpValue {
    /// Wraps a raw 64-bit IEEE 754 pattern.
    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self { bits }
    }

    /// Builds a value from an interpreted double.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self {
            bits: value.to_bits(),
        }
    }

    /// Returns the raw 64-bit pattern.
    #[inline]
    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Interprets the pattern as a double.
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from_bits(self.bits)
    }
}

impl From<f64> for FpValue {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<FpValue> for f64 {
    fn from(value: FpValue) -> Self {
        value.to_f64()
    }
}
