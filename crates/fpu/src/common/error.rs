//! Decode error definitions.
//!
//! This module defines the abnormal outcomes of instruction decode and
//! execution. It provides:
//! 1. **Decode errors:** Addressing modes, operand formats, operation codes,
//!    and selectors outside the defined set for the current family.
//! 2. **Unsupported features:** Recognized-but-unimplemented operand formats
//!    (extended-precision real, packed-decimal real), kept distinct from
//!    invalid encodings for clearer diagnostics.
//!
//! Both classes terminate the current instruction; the enclosing core
//! decides whether to halt the emulated run. Decode is a deterministic
//! function of the instruction bytes, so no error is retried.

use std::fmt;

/// Direction of an effective-address access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessDir {
    /// Operand load (memory or register to the subsystem).
    Load,
    /// Operand store (subsystem to memory or register).
    Store,
}

impl fmt::Display for AccessDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Load => write!(f, "load"),
            Self::Store => write!(f, "store"),
        }
    }
}

/// Operand width of an effective-address access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandWidth {
    /// 8-bit operand.
    Byte,
    /// 16-bit operand.
    Word,
    /// 32-bit operand.
    Long,
    /// 64-bit operand (two bus long words, most-significant first).
    Double,
    /// 96-bit extended-precision operand slot (top 64 bits moved).
    Extended,
}

impl OperandWidth {
    /// Access width in bytes, as seen by auto-increment/decrement modes.
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
            Self::Long => 4,
            Self::Double => 8,
            Self::Extended => 12,
        }
    }
}

impl fmt::Display for OperandWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte => write!(f, "byte"),
            Self::Word => write!(f, "word"),
            Self::Long => write!(f, "long"),
            Self::Double => write!(f, "double"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

/// Recognized operand formats the subsystem does not implement.
///
/// Using one of these is conceptually a missing feature, not a malformed
/// encoding, but execution still cannot continue past it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsupportedFeature {
    /// Extended-precision real source operand (FPGEN format 2).
    ExtendedRealLoad,
    /// Extended-precision real destination format (FMOVE format 2).
    ExtendedRealStore,
    /// Packed-decimal real source operand (FPGEN format 3).
    PackedRealLoad,
    /// Packed-decimal real destination format, static or dynamic K-factor
    /// (FMOVE formats 3 and 7).
    PackedRealStore,
}

impl fmt::Display for UnsupportedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExtendedRealLoad => write!(f, "extended-precision real load"),
            Self::ExtendedRealStore => write!(f, "extended-precision real store"),
            Self::PackedRealLoad => write!(f, "packed-decimal real load"),
            Self::PackedRealStore => write!(f, "packed-decimal real store"),
        }
    }
}

/// Fatal decode outcome of a floating-point instruction.
///
/// Every variant names the offending field values; where the reference
/// hardware diagnostic includes it, the program counter is carried too.
/// There is no recovery mid-instruction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Addressing mode outside the defined set for this width and direction.
    #[error("unhandled addressing mode {mode}/{reg} for {width} {dir} at {pc:#010x}")]
    EffectiveAddress {
        /// Access direction.
        dir: AccessDir,
        /// Operand width.
        width: OperandWidth,
        /// 3-bit addressing-mode field.
        mode: u8,
        /// 3-bit register field (sub-mode selector when `mode` is 7).
        reg: u8,
        /// Program counter after the words consumed so far.
        pc: u32,
    },

    /// Reserved source-format code in an ALU-family extension word.
    #[error("invalid source format {format} at {pc:#010x}")]
    SourceFormat {
        /// 3-bit source-format field.
        format: u8,
        /// Program counter of the instruction.
        pc: u32,
    },

    /// Operation code outside the implemented ALU set.
    #[error("unimplemented opmode {opmode:#04x} at {pc:#010x}")]
    Opmode {
        /// 7-bit operation code.
        opmode: u8,
        /// Program counter of the instruction.
        pc: u32,
    },

    /// Predicate code outside the defined branch/compare conditions.
    #[error("unhandled predicate {predicate:#04x}")]
    Predicate {
        /// 6-bit predicate code.
        predicate: u8,
    },

    /// Control-register selector without exactly one defined bit set.
    #[error("unknown control register selector {selector} (to_memory: {to_memory}) at {pc:#010x}")]
    ControlRegister {
        /// 3-bit selector field.
        selector: u8,
        /// Transfer direction (`true` = register to memory).
        to_memory: bool,
        /// Program counter of the instruction.
        pc: u32,
    },

    /// Multi-register transfer with an addressing-mode field the direction
    /// does not define.
    #[error("unhandled register-list transfer mode {mode} (to_memory: {to_memory}) at {pc:#010x}")]
    TransferMode {
        /// 2-bit addressing-mode field of the FMOVEM extension word.
        mode: u8,
        /// Transfer direction (`true` = registers to memory).
        to_memory: bool,
        /// Program counter of the instruction.
        pc: u32,
    },

    /// Extension-word family selector outside the four defined families.
    #[error("unimplemented extension family {family} at {pc:#010x}")]
    ExtensionFamily {
        /// Top 3 bits of the extension word.
        family: u8,
        /// Program counter of the instruction.
        pc: u32,
    },

    /// Top-level class bits outside the defined set for the entry point.
    #[error("unimplemented operation class {class} at {pc:#010x}")]
    OperationClass {
        /// 2-bit class field of the opcode word.
        class: u8,
        /// Program counter of the instruction.
        pc: u32,
    },

    /// Recognized operand format the subsystem does not implement.
    #[error("{feature} unimplemented at {pc:#010x}")]
    Unsupported {
        /// The missing feature.
        feature: UnsupportedFeature,
        /// Program counter of the instruction.
        pc: u32,
    },
}
