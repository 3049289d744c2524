//! Effective-address resolution.
//!
//! This module turns a 6-bit operand specifier (3-bit addressing mode plus
//! 3-bit register number) into a concrete storage location and performs the
//! sized load or store. It handles:
//! 1. **Register direct:** Data or address register, replaced whole on store
//!    with the zero-extended operand.
//! 2. **Register indirect:** Plain `(An)`, postincrement `(An)+` (register
//!    bumped by the access width after the access), predecrement `-(An)`
//!    (bumped before), 16-bit displacement `(d16,An)`, and brief-format
//!    indexed `(An,Xn,d8)`.
//! 3. **Mode 7 sub-forms:** Absolute short/long, PC-relative displacement
//!    and index, and immediate operands consumed from the instruction
//!    stream.
//!
//! Not every mode is defined for every width and direction; the support
//! matrices below follow the 68040 FPU operand paths, and anything outside
//! them is a fatal [`DecodeError::EffectiveAddress`]. 64-bit and extended
//! operands are composed of consecutive 32-bit bus transactions,
//! most-significant word first; the extended (96-bit) path only moves the
//! top 64 bits and zero-fills the rest.

use crate::bus::Bus;
use crate::common::error::{AccessDir, DecodeError, OperandWidth};
use crate::common::value::FpValue;
use crate::core::fpu::Fpu;

/// Splits a 6-bit operand specifier into its mode and register fields.
const fn split_spec(spec: u8) -> (u8, u8) {
    ((spec >> 3) & 0x7, spec & 0x7)
}

impl Fpu {
    /// Builds the fatal-decode outcome for an unsupported mode/width/direction
    /// combination.
    fn ea_error(&self, dir: AccessDir, width: OperandWidth, mode: u8, reg: u8) -> DecodeError {
        DecodeError::EffectiveAddress {
            dir,
            width,
            mode,
            reg,
            pc: self.pc,
        }
    }

    /// `(An)+`: address is the register value; the register advances by the
    /// access width after the access.
    fn ea_postincrement(&mut self, reg: usize, width: OperandWidth) -> u32 {
        let addr = self.regs.a[reg];
        self.regs.a[reg] = addr.wrapping_add(width.bytes());
        addr
    }

    /// `-(An)`: the register retreats by the access width before the address
    /// is formed.
    fn ea_predecrement(&mut self, reg: usize, width: OperandWidth) -> u32 {
        let addr = self.regs.a[reg].wrapping_sub(width.bytes());
        self.regs.a[reg] = addr;
        addr
    }

    /// `(d16,An)`: base register plus a sign-extended 16-bit displacement
    /// consumed from the instruction stream.
    fn ea_displacement(&mut self, bus: &mut dyn Bus, reg: usize) -> u32 {
        let disp = self.next_word(bus) as i16;
        self.regs.a[reg].wrapping_add(disp as i32 as u32)
    }

    /// `(base,Xn,d8)`: base plus index-register contribution plus a
    /// sign-extended 8-bit displacement, all from one brief extension word.
    ///
    /// The extension word selects a data or address index register, a word
    /// or long index width, and a 2-bit scale.
    fn ea_indexed(&mut self, bus: &mut dyn Bus, base: u32) -> u32 {
        let ext = self.next_word(bus);
        let disp = i32::from(ext as u8 as i8);
        let idx_reg = usize::from((ext >> 12) & 0x7);
        let raw = if ext & 0x8000 != 0 {
            self.regs.a[idx_reg]
        } else {
            self.regs.d[idx_reg]
        };
        let index = if ext & 0x0800 != 0 {
            raw as i32
        } else {
            i32::from(raw as i16)
        };
        let scale = u32::from((ext >> 9) & 0x3);
        (base as i32)
            .wrapping_add(disp)
            .wrapping_add(index << scale) as u32
    }

    /// `(xxx).W`: sign-extended 16-bit absolute address from the stream.
    fn ea_absolute_short(&mut self, bus: &mut dyn Bus) -> u32 {
        self.next_word(bus) as i16 as i32 as u32
    }

    /// `(xxx).L`: 32-bit absolute address from the stream, high word first.
    fn ea_absolute_long(&mut self, bus: &mut dyn Bus) -> u32 {
        self.next_long(bus)
    }

    /// `(d16,PC)`: displacement relative to the cursor position at which
    /// the displacement word itself sits.
    fn ea_pc_displacement(&mut self, bus: &mut dyn Bus) -> u32 {
        let base = self.pc;
        let disp = self.next_word(bus) as i16;
        base.wrapping_add(disp as i32 as u32)
    }

    /// Reads a 64-bit operand as two bus long words, most-significant first.
    fn read_u64_at(bus: &mut dyn Bus, addr: u32) -> u64 {
        let hi = bus.read_u32(addr);
        let lo = bus.read_u32(addr.wrapping_add(4));
        (u64::from(hi) << 32) | u64::from(lo)
    }

    /// Writes a 64-bit operand as two bus long words, most-significant first.
    fn write_u64_at(bus: &mut dyn Bus, addr: u32, value: u64) {
        bus.write_u32(addr, (value >> 32) as u32);
        bus.write_u32(addr.wrapping_add(4), value as u32);
    }

    /// Loads an 8-bit operand from the addressed location.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] for modes outside the byte-load set.
    pub fn read_ea_u8(&mut self, bus: &mut dyn Bus, spec: u8) -> Result<u8, DecodeError> {
        let (mode, reg) = split_spec(spec);
        let r = usize::from(reg);
        match mode {
            0 => Ok(self.regs.d[r] as u8),
            1 => Ok(self.regs.a[r] as u8),
            2 => Ok(bus.read_u8(self.regs.a[r])),
            5 => {
                let ea = self.ea_displacement(bus, r);
                Ok(bus.read_u8(ea))
            }
            6 => {
                let base = self.regs.a[r];
                let ea = self.ea_indexed(bus, base);
                Ok(bus.read_u8(ea))
            }
            7 => match reg {
                0 => {
                    let ea = self.ea_absolute_short(bus);
                    Ok(bus.read_u8(ea))
                }
                1 => {
                    let ea = self.ea_absolute_long(bus);
                    Ok(bus.read_u8(ea))
                }
                4 => Ok(self.next_word(bus) as u8),
                _ => Err(self.ea_error(AccessDir::Load, OperandWidth::Byte, mode, reg)),
            },
            _ => Err(self.ea_error(AccessDir::Load, OperandWidth::Byte, mode, reg)),
        }
    }

    /// Loads a 16-bit operand from the addressed location.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] for modes outside the word-load set.
    pub fn read_ea_u16(&mut self, bus: &mut dyn Bus, spec: u8) -> Result<u16, DecodeError> {
        let (mode, reg) = split_spec(spec);
        let r = usize::from(reg);
        match mode {
            0 => Ok(self.regs.d[r] as u16),
            1 => Ok(self.regs.a[r] as u16),
            2 => Ok(bus.read_u16(self.regs.a[r])),
            5 => {
                let ea = self.ea_displacement(bus, r);
                Ok(bus.read_u16(ea))
            }
            6 => {
                let base = self.regs.a[r];
                let ea = self.ea_indexed(bus, base);
                Ok(bus.read_u16(ea))
            }
            7 => match reg {
                0 => {
                    let ea = self.ea_absolute_short(bus);
                    Ok(bus.read_u16(ea))
                }
                1 => {
                    let ea = self.ea_absolute_long(bus);
                    Ok(bus.read_u16(ea))
                }
                4 => Ok(self.next_word(bus)),
                _ => Err(self.ea_error(AccessDir::Load, OperandWidth::Word, mode, reg)),
            },
            _ => Err(self.ea_error(AccessDir::Load, OperandWidth::Word, mode, reg)),
        }
    }

    /// Loads a 32-bit operand from the addressed location.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] for modes outside the long-load set.
    pub fn read_ea_u32(&mut self, bus: &mut dyn Bus, spec: u8) -> Result<u32, DecodeError> {
        let (mode, reg) = split_spec(spec);
        let r = usize::from(reg);
        match mode {
            0 => Ok(self.regs.d[r]),
            1 => Ok(self.regs.a[r]),
            2 => Ok(bus.read_u32(self.regs.a[r])),
            3 => {
                let ea = self.ea_postincrement(r, OperandWidth::Long);
                Ok(bus.read_u32(ea))
            }
            5 => {
                let ea = self.ea_displacement(bus, r);
                Ok(bus.read_u32(ea))
            }
            6 => {
                let base = self.regs.a[r];
                let ea = self.ea_indexed(bus, base);
                Ok(bus.read_u32(ea))
            }
            7 => match reg {
                0 => {
                    let ea = self.ea_absolute_short(bus);
                    Ok(bus.read_u32(ea))
                }
                1 => {
                    let ea = self.ea_absolute_long(bus);
                    Ok(bus.read_u32(ea))
                }
                2 => {
                    let ea = self.ea_pc_displacement(bus);
                    Ok(bus.read_u32(ea))
                }
                4 => Ok(self.next_long(bus)),
                _ => Err(self.ea_error(AccessDir::Load, OperandWidth::Long, mode, reg)),
            },
            _ => Err(self.ea_error(AccessDir::Load, OperandWidth::Long, mode, reg)),
        }
    }

    /// Loads a 64-bit operand from the addressed location.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] for modes outside the double-load
    /// set.
    pub fn read_ea_u64(&mut self, bus: &mut dyn Bus, spec: u8) -> Result<u64, DecodeError> {
        let (mode, reg) = split_spec(spec);
        let r = usize::from(reg);
        match mode {
            2 => Ok(Self::read_u64_at(bus, self.regs.a[r])),
            3 => {
                let ea = self.ea_postincrement(r, OperandWidth::Double);
                Ok(Self::read_u64_at(bus, ea))
            }
            5 => {
                let ea = self.ea_displacement(bus, r);
                Ok(Self::read_u64_at(bus, ea))
            }
            7 => match reg {
                2 => {
                    let ea = self.ea_pc_displacement(bus);
                    Ok(Self::read_u64_at(bus, ea))
                }
                4 => {
                    let hi = self.next_long(bus);
                    let lo = self.next_long(bus);
                    Ok((u64::from(hi) << 32) | u64::from(lo))
                }
                _ => Err(self.ea_error(AccessDir::Load, OperandWidth::Double, mode, reg)),
            },
            _ => Err(self.ea_error(AccessDir::Load, OperandWidth::Double, mode, reg)),
        }
    }

    /// Loads an extended-precision operand slot.
    ///
    /// Only postincrement addressing is defined: the register advances by 12
    /// bytes, but only the top 64 bits of the slot are moved into the value;
    /// no conversion to genuine extended precision takes place.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] for any other mode.
    pub fn read_ea_extended(&mut self, bus: &mut dyn Bus, spec: u8) -> Result<FpValue, DecodeError> {
        let (mode, reg) = split_spec(spec);
        let r = usize::from(reg);
        match mode {
            3 => {
                let ea = self.ea_postincrement(r, OperandWidth::Extended);
                Ok(FpValue::from_bits(Self::read_u64_at(bus, ea)))
            }
            _ => Err(self.ea_error(AccessDir::Load, OperandWidth::Extended, mode, reg)),
        }
    }

    /// Stores an 8-bit operand to the addressed location.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] for modes outside the byte-store
    /// set.
    pub fn write_ea_u8(&mut self, bus: &mut dyn Bus, spec: u8, value: u8) -> Result<(), DecodeError> {
        let (mode, reg) = split_spec(spec);
        let r = usize::from(reg);
        match mode {
            0 => {
                self.regs.d[r] = u32::from(value);
                Ok(())
            }
            1 => {
                self.regs.a[r] = u32::from(value);
                Ok(())
            }
            2 => {
                bus.write_u8(self.regs.a[r], value);
                Ok(())
            }
            3 => {
                let ea = self.ea_postincrement(r, OperandWidth::Byte);
                bus.write_u8(ea, value);
                Ok(())
            }
            4 => {
                let ea = self.ea_predecrement(r, OperandWidth::Byte);
                bus.write_u8(ea, value);
                Ok(())
            }
            5 => {
                let ea = self.ea_displacement(bus, r);
                bus.write_u8(ea, value);
                Ok(())
            }
            6 => {
                let base = self.regs.a[r];
                let ea = self.ea_indexed(bus, base);
                bus.write_u8(ea, value);
                Ok(())
            }
            7 => match reg {
                1 => {
                    let ea = self.ea_absolute_long(bus);
                    bus.write_u8(ea, value);
                    Ok(())
                }
                2 => {
                    let ea = self.ea_pc_displacement(bus);
                    bus.write_u8(ea, value);
                    Ok(())
                }
                _ => Err(self.ea_error(AccessDir::Store, OperandWidth::Byte, mode, reg)),
            },
            _ => Err(self.ea_error(AccessDir::Store, OperandWidth::Byte, mode, reg)),
        }
    }

    /// Stores a 16-bit operand to the addressed location.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] for modes outside the word-store
    /// set.
    pub fn write_ea_u16(
        &mut self,
        bus: &mut dyn Bus,
        spec: u8,
        value: u16,
    ) -> Result<(), DecodeError> {
        let (mode, reg) = split_spec(spec);
        let r = usize::from(reg);
        match mode {
            0 => {
                self.regs.d[r] = u32::from(value);
                Ok(())
            }
            1 => {
                self.regs.a[r] = u32::from(value);
                Ok(())
            }
            2 => {
                bus.write_u16(self.regs.a[r], value);
                Ok(())
            }
            3 => {
                let ea = self.ea_postincrement(r, OperandWidth::Word);
                bus.write_u16(ea, value);
                Ok(())
            }
            4 => {
                let ea = self.ea_predecrement(r, OperandWidth::Word);
                bus.write_u16(ea, value);
                Ok(())
            }
            5 => {
                let ea = self.ea_displacement(bus, r);
                bus.write_u16(ea, value);
                Ok(())
            }
            6 => {
                let base = self.regs.a[r];
                let ea = self.ea_indexed(bus, base);
                bus.write_u16(ea, value);
                Ok(())
            }
            7 => match reg {
                1 => {
                    let ea = self.ea_absolute_long(bus);
                    bus.write_u16(ea, value);
                    Ok(())
                }
                2 => {
                    let ea = self.ea_pc_displacement(bus);
                    bus.write_u16(ea, value);
                    Ok(())
                }
                _ => Err(self.ea_error(AccessDir::Store, OperandWidth::Word, mode, reg)),
            },
            _ => Err(self.ea_error(AccessDir::Store, OperandWidth::Word, mode, reg)),
        }
    }

    /// Stores a 32-bit operand to the addressed location.
    ///
    /// Address-register direct stores replace the full 32 bits.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] for modes outside the long-store
    /// set.
    pub fn write_ea_u32(
        &mut self,
        bus: &mut dyn Bus,
        spec: u8,
        value: u32,
    ) -> Result<(), DecodeError> {
        let (mode, reg) = split_spec(spec);
        let r = usize::from(reg);
        match mode {
            0 => {
                self.regs.d[r] = value;
                Ok(())
            }
            1 => {
                self.regs.a[r] = value;
                Ok(())
            }
            2 => {
                bus.write_u32(self.regs.a[r], value);
                Ok(())
            }
            3 => {
                let ea = self.ea_postincrement(r, OperandWidth::Long);
                bus.write_u32(ea, value);
                Ok(())
            }
            4 => {
                let ea = self.ea_predecrement(r, OperandWidth::Long);
                bus.write_u32(ea, value);
                Ok(())
            }
            5 => {
                let ea = self.ea_displacement(bus, r);
                bus.write_u32(ea, value);
                Ok(())
            }
            6 => {
                let base = self.regs.a[r];
                let ea = self.ea_indexed(bus, base);
                bus.write_u32(ea, value);
                Ok(())
            }
            7 => match reg {
                1 => {
                    let ea = self.ea_absolute_long(bus);
                    bus.write_u32(ea, value);
                    Ok(())
                }
                2 => {
                    let ea = self.ea_pc_displacement(bus);
                    bus.write_u32(ea, value);
                    Ok(())
                }
                _ => Err(self.ea_error(AccessDir::Store, OperandWidth::Long, mode, reg)),
            },
            _ => Err(self.ea_error(AccessDir::Store, OperandWidth::Long, mode, reg)),
        }
    }

    /// Stores a 64-bit operand to the addressed location.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] for modes outside the double-store
    /// set.
    pub fn write_ea_u64(
        &mut self,
        bus: &mut dyn Bus,
        spec: u8,
        value: u64,
    ) -> Result<(), DecodeError> {
        let (mode, reg) = split_spec(spec);
        let r = usize::from(reg);
        match mode {
            2 => {
                Self::write_u64_at(bus, self.regs.a[r], value);
                Ok(())
            }
            4 => {
                let ea = self.ea_predecrement(r, OperandWidth::Double);
                Self::write_u64_at(bus, ea, value);
                Ok(())
            }
            5 => {
                let ea = self.ea_displacement(bus, r);
                Self::write_u64_at(bus, ea, value);
                Ok(())
            }
            _ => Err(self.ea_error(AccessDir::Store, OperandWidth::Double, mode, reg)),
        }
    }

    /// Stores an extended-precision operand slot.
    ///
    /// Only predecrement addressing is defined: the register retreats by 12
    /// bytes, the 64-bit pattern fills the top of the slot and the remaining
    /// long word is zero-filled; no conversion to genuine extended precision
    /// takes place.
    ///
    /// # Errors
    ///
    /// [`DecodeError::EffectiveAddress`] for any other mode.
    pub fn write_ea_extended(
        &mut self,
        bus: &mut dyn Bus,
        spec: u8,
        value: FpValue,
    ) -> Result<(), DecodeError> {
        let (mode, reg) = split_spec(spec);
        let r = usize::from(reg);
        match mode {
            4 => {
                let ea = self.ea_predecrement(r, OperandWidth::Extended);
                Self::write_u64_at(bus, ea, value.bits());
                bus.write_u32(ea.wrapping_add(8), 0);
                Ok(())
            }
            _ => Err(self.ea_error(AccessDir::Store, OperandWidth::Extended, mode, reg)),
        }
    }
}
