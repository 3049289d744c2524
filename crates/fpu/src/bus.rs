//! Memory bus interface.
//!
//! This module defines the `Bus` trait through which the subsystem touches
//! memory. It provides:
//! 1. **Access:** Byte, word, and long read/write at 32-bit addresses.
//! 2. **Isolation:** The enclosing core owns the bus; the subsystem only
//!    borrows it for the duration of one instruction.
//!
//! Accesses are infallible here: bus faults and alignment behavior are the
//! enclosing core's concern, not this subsystem's.

/// Memory bus as seen by the floating-point subsystem.
///
/// All 64-bit and extended operands are composed from consecutive 32-bit
/// transactions, most-significant word first, so the trait only carries the
/// three widths the hardware bus knows about.
pub trait Bus {
    /// Reads one byte at the given address.
    fn read_u8(&mut self, addr: u32) -> u8;
    /// Reads a 16-bit word (big-endian) at the given address.
    fn read_u16(&mut self, addr: u32) -> u16;
    /// Reads a 32-bit long word (big-endian) at the given address.
    fn read_u32(&mut self, addr: u32) -> u32;
    /// Writes one byte at the given address.
    fn write_u8(&mut self, addr: u32, value: u8);
    /// Writes a 16-bit word (big-endian) at the given address.
    fn write_u16(&mut self, addr: u32, value: u16);
    /// Writes a 32-bit long word (big-endian) at the given address.
    fn write_u32(&mut self, addr: u32, value: u32);
}
