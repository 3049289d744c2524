//! Floating-point extension-word field constants.
//!
//! The second word of every two-word floating instruction carries the
//! operation sub-fields beyond the base opcode. These constants name the
//! values of those fields; the dispatcher decodes the word once per
//! instruction and never stores it.

// ── Extension-word families (bits 15-13) ──────────────────────────

/// ALU operation, register source.
pub const FAMILY_ALU_REG: u16 = 0x0;
/// ALU operation, memory source through the resolver.
pub const FAMILY_ALU_EA: u16 = 0x2;
/// Move a floating-point register to memory with format conversion.
pub const FAMILY_MOVE_TO_MEM: u16 = 0x3;
/// Move memory to a control register (FPIAR/FPSR/FPCR).
pub const FAMILY_MOVE_TO_FPCR: u16 = 0x4;
/// Move a control register to memory.
pub const FAMILY_MOVE_FROM_FPCR: u16 = 0x5;
/// Multi-register move, memory to registers.
pub const FAMILY_MOVEM_TO_REGS: u16 = 0x6;
/// Multi-register move, registers to memory.
pub const FAMILY_MOVEM_TO_MEM: u16 = 0x7;

// ── ALU operation codes (extension-word bits 6-0) ─────────────────

/// FMOVE: copy the source into the destination register.
pub const OP_FMOVE: u8 = 0x00;
/// FSQRT: square root.
pub const OP_FSQRT: u8 = 0x04;
/// FABS: absolute value.
pub const OP_FABS: u8 = 0x18;
/// FNEG: negate.
pub const OP_FNEG: u8 = 0x1a;
/// FDIV: destination divided by source.
pub const OP_FDIV: u8 = 0x20;
/// FADD: destination plus source.
pub const OP_FADD: u8 = 0x22;
/// FMUL: destination times source.
pub const OP_FMUL: u8 = 0x23;
/// FSUB: destination minus source.
pub const OP_FSUB: u8 = 0x28;
/// FCMP: flags of destination minus source; numeric result discarded.
pub const OP_FCMP: u8 = 0x38;
/// FTST: flags of the source alone; destination unchanged.
pub const OP_FTST: u8 = 0x3a;

// ── Operand format codes (source for ALU, destination for FMOVE) ──

/// 32-bit two's-complement integer.
pub const FMT_LONG: u8 = 0;
/// Single-precision real.
pub const FMT_SINGLE: u8 = 1;
/// Extended-precision real (unimplemented).
pub const FMT_EXTENDED: u8 = 2;
/// Packed-decimal real, static K-factor (unimplemented).
pub const FMT_PACKED: u8 = 3;
/// 16-bit two's-complement integer.
pub const FMT_WORD: u8 = 4;
/// Double-precision real.
pub const FMT_DOUBLE: u8 = 5;
/// 8-bit two's-complement integer.
pub const FMT_BYTE: u8 = 6;
/// Packed-decimal real, dynamic K-factor (unimplemented, store only).
pub const FMT_PACKED_DYNAMIC: u8 = 7;

// ── Control-register selectors (exactly one bit set) ──────────────

/// Floating-point instruction address register.
pub const CR_FPIAR: u8 = 1;
/// Floating-point status register.
pub const CR_FPSR: u8 = 2;
/// Floating-point control register.
pub const CR_FPCR: u8 = 4;

// ── FMOVEM addressing-mode field (extension-word bits 12-11) ──────

/// Static register list, predecrement addressing (store direction only).
pub const MOVEM_PREDECREMENT: u8 = 0;
/// Static register list, postincrement addressing (load direction only).
pub const MOVEM_POSTINCREMENT: u8 = 2;
