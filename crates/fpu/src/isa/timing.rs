//! Fixed cycle costs.
//!
//! Every floating-point operation charges a fixed cost regardless of operand
//! values; conditional branches cost the same taken or not.

/// FMOVE into a floating-point register.
pub const FMOVE: u32 = 4;
/// FSQRT.
pub const FSQRT: u32 = 109;
/// FABS.
pub const FABS: u32 = 3;
/// FNEG.
pub const FNEG: u32 = 3;
/// FDIV.
pub const FDIV: u32 = 43;
/// FADD.
pub const FADD: u32 = 9;
/// FMUL.
pub const FMUL: u32 = 11;
/// FSUB.
pub const FSUB: u32 = 9;
/// FCMP.
pub const FCMP: u32 = 7;
/// FTST.
pub const FTST: u32 = 7;
/// FMOVE from a floating-point register to memory, any format.
pub const FMOVE_TO_MEM: u32 = 12;
/// Control-register move, either direction.
pub const FMOVE_CONTROL: u32 = 10;
/// Per register transferred by FMOVEM.
pub const FMOVEM_PER_REG: u32 = 2;
/// FBcc, 16- or 32-bit displacement, taken or not.
pub const FBCC: u32 = 7;
