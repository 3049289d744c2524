//! Floating-point subsystem state.
//!
//! This module defines the state object the dispatcher executes against. It
//! holds:
//! 1. **Register file:** The [`Registers`] operand store.
//! 2. **Instruction cursor:** The program counter, advanced only through
//!    [`Fpu::next_word`]/[`Fpu::next_long`], so the number of words an
//!    instruction consumes is auditable in one place.
//! 3. **Cycle accumulator:** Emulated cycle cost charged per instruction;
//!    no effect on control flow.
//! 4. **Trace suppression:** The single-step trace flag a taken branch
//!    resets.
//!
//! Execution is single-threaded and non-reentrant: one instruction is fully
//! decoded and executed before the next begins, and the enclosing core never
//! invokes the subsystem concurrently with itself or the integer path.

use crate::bus::Bus;
use crate::core::registers::Registers;

/// M68040 floating-point subsystem state.
///
/// The dispatcher entry points ([`Fpu::execute_general`] and
/// [`Fpu::execute_save_restore`], defined in the ISA module) mutate this
/// state and the borrowed [`Bus`], nothing else.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fpu {
    /// Register file (data, address, floating-point, control).
    pub regs: Registers,
    /// Program counter; the explicit instruction-stream cursor.
    pub pc: u32,
    /// Accumulated emulated cycle cost.
    pub cycles: u64,
    trace_suppressed: bool,
}

impl Fpu {
    /// Creates a subsystem with cleared registers, pc 0, and no cycles
    /// charged.
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes and returns the next 16-bit instruction word, advancing the
    /// cursor.
    ///
    /// This is the only place instruction words are consumed; callers must
    /// not re-read a consumed word.
    pub fn next_word(&mut self, bus: &mut dyn Bus) -> u16 {
        let word = bus.read_u16(self.pc);
        self.pc = self.pc.wrapping_add(2);
        word
    }

    /// Consumes two instruction words as one 32-bit value, high word first.
    pub fn next_long(&mut self, bus: &mut dyn Bus) -> u32 {
        let hi = self.next_word(bus);
        let lo = self.next_word(bus);
        (u32::from(hi) << 16) | u32::from(lo)
    }

    /// Charges emulated cycles for the current instruction.
    pub fn charge(&mut self, cycles: u32) {
        self.cycles += u64::from(cycles);
    }

    /// Performs a relative branch of the program counter.
    ///
    /// The displacement is applied to the current cursor position; the
    /// dispatcher rebases it for the words already consumed.
    pub fn branch_relative(&mut self, displacement: i32) {
        self.pc = self.pc.wrapping_add(displacement as u32);
    }

    /// Suppresses single-step tracing until the next taken branch.
    pub fn suppress_trace(&mut self) {
        self.trace_suppressed = true;
    }

    /// Resets single-step trace suppression; called on every taken branch.
    pub fn reset_trace_suppression(&mut self) {
        self.trace_suppressed = false;
    }

    /// Whether single-step tracing is currently suppressed.
    pub const fn trace_suppressed(&self) -> bool {
        self.trace_suppressed
    }
}
