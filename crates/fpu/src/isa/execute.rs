//! Floating-point instruction dispatch.
//!
//! This module decodes the extension word of a two-word floating instruction
//! and routes it to one of the instruction families:
//! 1. **ALU:** Register- or memory-sourced arithmetic into a floating-point
//!    register, with the source converted through its declared format to a
//!    working double.
//! 2. **Move to memory:** Register value converted to an integer or real
//!    format and stored through the resolver.
//! 3. **Control-register move:** FPIAR/FPSR/FPCR to or from memory.
//! 4. **Multi-register move:** Mask-selected block transfer of the
//!    floating-point register file.
//! 5. **Conditional branch:** FBcc with a 16- or 32-bit displacement,
//!    predicate taken from the opcode word.
//!
//! A second entry point handles FSAVE/FRESTORE, which currently move a
//! placeholder state frame rather than reconstructing processor state.
//!
//! Each operation charges its fixed cycle cost as a side effect. Word
//! consumption is strictly ordered: the extension word and any displacement
//! words are read before any addressed access that depends on them, and
//! auto-increment updates are visible to later accesses within the same
//! instruction.

use tracing::{trace, warn};

use crate::bus::Bus;
use crate::common::error::{DecodeError, UnsupportedFeature};
use crate::common::value::FpValue;
use crate::core::fpu::Fpu;
use crate::isa::{opcodes, timing};

impl Fpu {
    /// Executes an instruction of the ALU/move/branch class.
    ///
    /// `opcode` is the already-fetched first instruction word; any further
    /// words are consumed from the stream here.
    ///
    /// # Errors
    ///
    /// Any [`DecodeError`]; the caller decides whether to halt the emulated
    /// run. No recovery is possible mid-instruction.
    pub fn execute_general(&mut self, bus: &mut dyn Bus, opcode: u16) -> Result<(), DecodeError> {
        let class = ((opcode >> 6) & 0x3) as u8;
        match class {
            0 => {
                let w2 = self.next_word(bus);
                let family = (w2 >> 13) & 0x7;
                trace!("fpu extension word {w2:#06x} family {family}");
                match family {
                    opcodes::FAMILY_ALU_REG | opcodes::FAMILY_ALU_EA => {
                        self.alu_generic(bus, opcode, w2)
                    }
                    opcodes::FAMILY_MOVE_TO_MEM => self.move_to_memory(bus, opcode, w2),
                    opcodes::FAMILY_MOVE_TO_FPCR | opcodes::FAMILY_MOVE_FROM_FPCR => {
                        self.move_control(bus, opcode, w2)
                    }
                    opcodes::FAMILY_MOVEM_TO_REGS | opcodes::FAMILY_MOVEM_TO_MEM => {
                        self.move_multiple(bus, opcode, w2)
                    }
                    _ => Err(DecodeError::ExtensionFamily {
                        family: family as u8,
                        pc: self.pc.wrapping_sub(4),
                    }),
                }
            }
            2 => self.fbcc_word(bus, opcode),
            3 => self.fbcc_long(bus, opcode),
            _ => Err(DecodeError::OperationClass { class, pc: self.pc }),
        }
    }

    /// Executes an instruction of the FSAVE/FRESTORE class.
    ///
    /// The state-frame contents are a recognized gap: FSAVE stores a null
    /// frame and FRESTORE consumes one long word without reconstructing any
    /// state. Both log a warning when used.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] from the placeholder frame access,
    /// or [`DecodeError::OperationClass`] for undefined class bits.
    pub fn execute_save_restore(
        &mut self,
        bus: &mut dyn Bus,
        opcode: u16,
    ) -> Result<(), DecodeError> {
        let ea = (opcode & 0x3f) as u8;
        let class = ((opcode >> 6) & 0x3) as u8;
        match class {
            0 => {
                warn!("FSAVE at {:#010x}: storing placeholder null state frame", self.pc);
                self.write_ea_u32(bus, ea, 0)
            }
            1 => {
                warn!("FRESTORE at {:#010x}: discarding placeholder state frame", self.pc);
                let _ = self.read_ea_u32(bus, ea)?;
                Ok(())
            }
            _ => Err(DecodeError::OperationClass {
                class,
                pc: self.pc.wrapping_sub(2),
            }),
        }
    }

    /// ALU family: arithmetic from a register or resolver-loaded source into
    /// a floating-point register.
    fn alu_generic(&mut self, bus: &mut dyn Bus, opcode: u16, w2: u16) -> Result<(), DecodeError> {
        let ea = (opcode & 0x3f) as u8;
        let src_is_memory = (w2 >> 14) & 0x1 != 0;
        let src = usize::from((w2 >> 10) & 0x7);
        let dst = usize::from((w2 >> 7) & 0x7);
        let opmode = (w2 & 0x7f) as u8;
        let instr_pc = self.pc.wrapping_sub(4);

        let source: f64 = if src_is_memory {
            match src as u8 {
                opcodes::FMT_LONG => f64::from(self.read_ea_u32(bus, ea)? as i32),
                opcodes::FMT_SINGLE => f64::from(f32::from_bits(self.read_ea_u32(bus, ea)?)),
                opcodes::FMT_EXTENDED => {
                    return Err(DecodeError::Unsupported {
                        feature: UnsupportedFeature::ExtendedRealLoad,
                        pc: instr_pc,
                    });
                }
                opcodes::FMT_PACKED => {
                    return Err(DecodeError::Unsupported {
                        feature: UnsupportedFeature::PackedRealLoad,
                        pc: instr_pc,
                    });
                }
                opcodes::FMT_WORD => f64::from(self.read_ea_u16(bus, ea)? as i16),
                opcodes::FMT_DOUBLE => FpValue::from_bits(self.read_ea_u64(bus, ea)?).to_f64(),
                opcodes::FMT_BYTE => f64::from(self.read_ea_u8(bus, ea)? as i8),
                format => {
                    return Err(DecodeError::SourceFormat {
                        format,
                        pc: instr_pc,
                    });
                }
            }
        } else {
            self.regs.fp[src].to_f64()
        };

        match opmode {
            opcodes::OP_FMOVE => {
                self.regs.fp[dst] = FpValue::from_f64(source);
                self.charge(timing::FMOVE);
            }
            opcodes::OP_FSQRT => {
                self.regs.fp[dst] = FpValue::from_f64(source.sqrt());
                self.regs.set_condition_codes(self.regs.fp[dst]);
                self.charge(timing::FSQRT);
            }
            opcodes::OP_FABS => {
                self.regs.fp[dst] = FpValue::from_f64(source.abs());
                self.regs.set_condition_codes(self.regs.fp[dst]);
                self.charge(timing::FABS);
            }
            opcodes::OP_FNEG => {
                self.regs.fp[dst] = FpValue::from_f64(-source);
                self.regs.set_condition_codes(self.regs.fp[dst]);
                self.charge(timing::FNEG);
            }
            opcodes::OP_FDIV => {
                self.regs.fp[dst] = FpValue::from_f64(self.regs.fp[dst].to_f64() / source);
                self.charge(timing::FDIV);
            }
            opcodes::OP_FADD => {
                self.regs.fp[dst] = FpValue::from_f64(self.regs.fp[dst].to_f64() + source);
                self.regs.set_condition_codes(self.regs.fp[dst]);
                self.charge(timing::FADD);
            }
            opcodes::OP_FMUL => {
                self.regs.fp[dst] = FpValue::from_f64(self.regs.fp[dst].to_f64() * source);
                self.regs.set_condition_codes(self.regs.fp[dst]);
                self.charge(timing::FMUL);
            }
            opcodes::OP_FSUB => {
                self.regs.fp[dst] = FpValue::from_f64(self.regs.fp[dst].to_f64() - source);
                self.regs.set_condition_codes(self.regs.fp[dst]);
                self.charge(timing::FSUB);
            }
            opcodes::OP_FCMP => {
                // Numeric result discarded; only the flags survive.
                let result = FpValue::from_f64(self.regs.fp[dst].to_f64() - source);
                self.regs.set_condition_codes(result);
                self.charge(timing::FCMP);
            }
            opcodes::OP_FTST => {
                self.regs.set_condition_codes(FpValue::from_f64(source));
                self.charge(timing::FTST);
            }
            _ => {
                return Err(DecodeError::Opmode {
                    opmode,
                    pc: instr_pc,
                });
            }
        }
        Ok(())
    }

    /// Move-to-memory family: register value converted to the destination
    /// format and stored through the resolver.
    fn move_to_memory(&mut self, bus: &mut dyn Bus, opcode: u16, w2: u16) -> Result<(), DecodeError> {
        let ea = (opcode & 0x3f) as u8;
        let src = usize::from((w2 >> 7) & 0x7);
        let format = ((w2 >> 10) & 0x7) as u8;
        let instr_pc = self.pc.wrapping_sub(4);
        let value = self.regs.fp[src];

        match format {
            opcodes::FMT_LONG => self.write_ea_u32(bus, ea, value.to_f64() as i32 as u32)?,
            opcodes::FMT_SINGLE => {
                self.write_ea_u32(bus, ea, (value.to_f64() as f32).to_bits())?;
            }
            opcodes::FMT_EXTENDED => {
                return Err(DecodeError::Unsupported {
                    feature: UnsupportedFeature::ExtendedRealStore,
                    pc: instr_pc,
                });
            }
            opcodes::FMT_PACKED | opcodes::FMT_PACKED_DYNAMIC => {
                return Err(DecodeError::Unsupported {
                    feature: UnsupportedFeature::PackedRealStore,
                    pc: instr_pc,
                });
            }
            opcodes::FMT_WORD => self.write_ea_u16(bus, ea, value.to_f64() as i16 as u16)?,
            opcodes::FMT_DOUBLE => self.write_ea_u64(bus, ea, value.bits())?,
            // Byte stores truncate through a 16-bit intermediate.
            _ => self.write_ea_u8(bus, ea, (value.to_f64() as i16) as i8 as u8)?,
        }

        self.charge(timing::FMOVE_TO_MEM);
        Ok(())
    }

    /// Control-register family: FPIAR/FPSR/FPCR to or from memory.
    fn move_control(&mut self, bus: &mut dyn Bus, opcode: u16, w2: u16) -> Result<(), DecodeError> {
        let ea = (opcode & 0x3f) as u8;
        let to_memory = (w2 >> 13) & 0x1 != 0;
        let selector = ((w2 >> 10) & 0x7) as u8;
        let instr_pc = self.pc.wrapping_sub(4);

        if to_memory {
            match selector {
                opcodes::CR_FPIAR => self.write_ea_u32(bus, ea, self.regs.fpiar)?,
                opcodes::CR_FPSR => self.write_ea_u32(bus, ea, self.regs.fpsr)?,
                opcodes::CR_FPCR => self.write_ea_u32(bus, ea, self.regs.fpcr)?,
                _ => {
                    return Err(DecodeError::ControlRegister {
                        selector,
                        to_memory,
                        pc: instr_pc,
                    });
                }
            }
        } else {
            match selector {
                opcodes::CR_FPIAR => self.regs.fpiar = self.read_ea_u32(bus, ea)?,
                opcodes::CR_FPSR => self.regs.fpsr = self.read_ea_u32(bus, ea)?,
                opcodes::CR_FPCR => self.regs.fpcr = self.read_ea_u32(bus, ea)?,
                _ => {
                    return Err(DecodeError::ControlRegister {
                        selector,
                        to_memory,
                        pc: instr_pc,
                    });
                }
            }
        }

        self.charge(timing::FMOVE_CONTROL);
        Ok(())
    }

    /// Multi-register family: mask-selected block transfer of the
    /// floating-point register file.
    ///
    /// Stores walk registers 0..7 in ascending index order (predecrement
    /// addressing places later registers at lower addresses); loads fill
    /// registers 7 down to 0 for ascending mask bits. The order reversal
    /// between the two directions is architectural.
    fn move_multiple(&mut self, bus: &mut dyn Bus, opcode: u16, w2: u16) -> Result<(), DecodeError> {
        let ea = (opcode & 0x3f) as u8;
        let to_memory = (w2 >> 13) & 0x1 != 0;
        let mode = ((w2 >> 11) & 0x3) as u8;
        let list = (w2 & 0xff) as u8;
        let instr_pc = self.pc.wrapping_sub(4);

        if to_memory {
            if mode != opcodes::MOVEM_PREDECREMENT {
                return Err(DecodeError::TransferMode {
                    mode,
                    to_memory,
                    pc: instr_pc,
                });
            }
            for i in 0..8 {
                if list & (1 << i) != 0 {
                    self.write_ea_extended(bus, ea, self.regs.fp[i])?;
                    self.charge(timing::FMOVEM_PER_REG);
                }
            }
        } else {
            if mode != opcodes::MOVEM_POSTINCREMENT {
                return Err(DecodeError::TransferMode {
                    mode,
                    to_memory,
                    pc: instr_pc,
                });
            }
            for i in 0..8 {
                if list & (1 << i) != 0 {
                    self.regs.fp[7 - i] = self.read_ea_extended(bus, ea)?;
                    self.charge(timing::FMOVEM_PER_REG);
                }
            }
        }
        Ok(())
    }

    /// FBcc with a 16-bit displacement.
    ///
    /// The displacement is relative to the position just after the opcode
    /// word, hence the rebase for the word consumed here.
    fn fbcc_word(&mut self, bus: &mut dyn Bus, opcode: u16) -> Result<(), DecodeError> {
        let predicate = (opcode & 0x3f) as u8;
        let displacement = i32::from(self.next_word(bus) as i16);

        if self.regs.test_condition(predicate)? {
            self.reset_trace_suppression();
            self.branch_relative(displacement - 2);
        }

        self.charge(timing::FBCC);
        Ok(())
    }

    /// FBcc with a 32-bit displacement.
    fn fbcc_long(&mut self, bus: &mut dyn Bus, opcode: u16) -> Result<(), DecodeError> {
        let predicate = (opcode & 0x3f) as u8;
        let displacement = self.next_long(bus) as i32;

        if self.regs.test_condition(predicate)? {
            self.reset_trace_suppression();
            self.branch_relative(displacement - 4);
        }

        self.charge(timing::FBCC);
        Ok(())
    }
}
