//! Dispatcher tests.
//!
//! Drives the two public entry points with hand-assembled instruction words
//! and checks register effects, memory effects, flag updates, cycle charges,
//! and the cursor position after every consumed word.

use crate::common::mocks::bus::RamBus;
use m68kfpu_core::common::error::{DecodeError, UnsupportedFeature};
use m68kfpu_core::core::status::{FPCC_I, FPCC_N, FPCC_NAN, FPCC_Z};
use m68kfpu_core::{Bus, FpValue, Fpu};
use pretty_assertions::assert_eq;

/// Builds a subsystem whose cursor sits just past an opcode word at `0x100`,
/// with the given extension/operand words loaded behind it.
fn with_stream(words: &[u16]) -> (Fpu, RamBus) {
    let mut fpu = Fpu::new();
    let mut bus = RamBus::default();
    fpu.pc = 0x102;
    bus.load_words(0x102, words);
    (fpu, bus)
}

const CC_MASK: u32 = FPCC_N | FPCC_Z | FPCC_I | FPCC_NAN;

#[test]
fn test_fadd_register_to_register() {
    // FADD FP1,FP2
    let (mut fpu, mut bus) = with_stream(&[(1 << 10) | (2 << 7) | 0x22]);
    fpu.regs.fp[1] = FpValue::from_f64(2.0);
    fpu.regs.fp[2] = FpValue::from_f64(3.0);

    assert_eq!(fpu.execute_general(&mut bus, 0x0000), Ok(()));
    assert_eq!(fpu.regs.fp[2].to_f64(), 5.0);
    assert_eq!(fpu.regs.fpsr & CC_MASK, 0);
    assert_eq!(fpu.cycles, 9);
    assert_eq!(fpu.pc, 0x104, "one extension word consumed");
}

#[test]
fn test_fmove_register_leaves_flags_alone() {
    // FMOVE FP0,FP5 with a stale N flag that must survive.
    let (mut fpu, mut bus) = with_stream(&[(0 << 10) | (5 << 7)]);
    fpu.regs.fp[0] = FpValue::from_f64(1.5);
    fpu.regs.fpsr = FPCC_N;

    assert_eq!(fpu.execute_general(&mut bus, 0x0000), Ok(()));
    assert_eq!(fpu.regs.fp[5].to_f64(), 1.5);
    assert_eq!(fpu.regs.fpsr, FPCC_N, "FMOVE does not touch condition codes");
    assert_eq!(fpu.cycles, 4);
}

#[test]
fn test_fdiv_leaves_flags_alone() {
    let (mut fpu, mut bus) = with_stream(&[(3 << 10) | (4 << 7) | 0x20]);
    fpu.regs.fp[3] = FpValue::from_f64(2.0);
    fpu.regs.fp[4] = FpValue::from_f64(-8.0);
    fpu.regs.fpsr = FPCC_Z;

    assert_eq!(fpu.execute_general(&mut bus, 0x0000), Ok(()));
    assert_eq!(fpu.regs.fp[4].to_f64(), -4.0);
    assert_eq!(fpu.regs.fpsr, FPCC_Z, "FDIV does not touch condition codes");
    assert_eq!(fpu.cycles, 43);
}

#[test]
fn test_ftst_zero_sets_z_and_preserves_destination() {
    // FTST FP3; the destination field is ignored.
    let (mut fpu, mut bus) = with_stream(&[(3 << 10) | (0 << 7) | 0x3a]);
    fpu.regs.fp[0] = FpValue::from_f64(99.0);
    fpu.regs.fp[3] = FpValue::from_f64(0.0);

    assert_eq!(fpu.execute_general(&mut bus, 0x0000), Ok(()));
    assert_eq!(fpu.regs.fpsr & CC_MASK, FPCC_Z);
    assert_eq!(fpu.regs.fp[0].to_f64(), 99.0);
    assert_eq!(fpu.cycles, 7);
}

#[test]
fn test_fcmp_sets_flags_and_discards_result() {
    // FCMP FP1,FP0: flags of FP0 - FP1.
    let (mut fpu, mut bus) = with_stream(&[(1 << 10) | (0 << 7) | 0x38]);
    fpu.regs.fp[0] = FpValue::from_f64(1.0);
    fpu.regs.fp[1] = FpValue::from_f64(5.0);

    assert_eq!(fpu.execute_general(&mut bus, 0x0000), Ok(()));
    assert_eq!(fpu.regs.fpsr & CC_MASK, FPCC_N);
    assert_eq!(fpu.regs.fp[0].to_f64(), 1.0, "destination register untouched");
    assert_eq!(fpu.cycles, 7);
}

#[test]
fn test_fcmp_nan_source_sets_nan_flag() {
    let (mut fpu, mut bus) = with_stream(&[(1 << 10) | (0 << 7) | 0x38]);
    fpu.regs.fp[0] = FpValue::from_f64(1.0);
    fpu.regs.fp[1] = FpValue::from_f64(f64::NAN);

    assert_eq!(fpu.execute_general(&mut bus, 0x0000), Ok(()));
    assert_ne!(fpu.regs.fpsr & FPCC_NAN, 0);
}

#[test]
fn test_alu_immediate_word_source() {
    // FADD #-2.W,FP0 with a word immediate converted through signed integer.
    let w2 = 0x4000 | (4 << 10) | (0 << 7) | 0x22;
    let (mut fpu, mut bus) = with_stream(&[w2, 0xfffe]);
    fpu.regs.fp[0] = FpValue::from_f64(0.5);

    assert_eq!(fpu.execute_general(&mut bus, 0x003c), Ok(()));
    assert_eq!(fpu.regs.fp[0].to_f64(), -1.5);
    assert_eq!(fpu.regs.fpsr & CC_MASK, FPCC_N);
    assert_eq!(fpu.cycles, 9);
    assert_eq!(fpu.pc, 0x106, "extension word plus one immediate word");
}

#[test]
fn test_alu_single_source_from_memory() {
    // FMUL (A0).S,FP2
    let w2 = 0x4000 | (1 << 10) | (2 << 7) | 0x23;
    let (mut fpu, mut bus) = with_stream(&[w2]);
    fpu.regs.a[0] = 0x2000;
    bus.write_u32(0x2000, 0.25f32.to_bits());
    fpu.regs.fp[2] = FpValue::from_f64(8.0);

    assert_eq!(fpu.execute_general(&mut bus, 0x0010), Ok(()));
    assert_eq!(fpu.regs.fp[2].to_f64(), 2.0);
    assert_eq!(fpu.cycles, 11);
}

#[test]
fn test_alu_extended_source_is_unsupported() {
    let w2 = 0x4000 | (2 << 10) | (0 << 7) | 0x22;
    let (mut fpu, mut bus) = with_stream(&[w2]);
    fpu.regs.a[0] = 0x2000;

    assert_eq!(
        fpu.execute_general(&mut bus, 0x0018),
        Err(DecodeError::Unsupported {
            feature: UnsupportedFeature::ExtendedRealLoad,
            pc: 0x100,
        })
    );
}

#[test]
fn test_unknown_opmode_is_fatal() {
    let (mut fpu, mut bus) = with_stream(&[(0 << 10) | (0 << 7) | 0x7f]);
    assert_eq!(
        fpu.execute_general(&mut bus, 0x0000),
        Err(DecodeError::Opmode {
            opmode: 0x7f,
            pc: 0x100,
        })
    );
    assert_eq!(fpu.cycles, 0, "no cycles charged on decode failure");
}

#[test]
fn test_undefined_extension_family_is_fatal() {
    let (mut fpu, mut bus) = with_stream(&[0x2000]);
    assert_eq!(
        fpu.execute_general(&mut bus, 0x0000),
        Err(DecodeError::ExtensionFamily {
            family: 1,
            pc: 0x100,
        })
    );
}

#[test]
fn test_undefined_operation_class_is_fatal() {
    let (mut fpu, mut bus) = with_stream(&[]);
    assert_eq!(
        fpu.execute_general(&mut bus, 0x0040),
        Err(DecodeError::OperationClass {
            class: 1,
            pc: 0x102,
        })
    );
}

#[test]
fn test_fmove_double_to_memory_preserves_raw_pattern() {
    // FMOVE.D FP2,(A0): a NaN payload must cross untouched.
    let pattern = 0x7ff8_dead_beef_0001;
    let (mut fpu, mut bus) = with_stream(&[0x6000 | (5 << 10) | (2 << 7)]);
    fpu.regs.fp[2] = FpValue::from_bits(pattern);
    fpu.regs.a[0] = 0x2000;

    assert_eq!(fpu.execute_general(&mut bus, 0x0010), Ok(()));
    assert_eq!(bus.read_u32(0x2000), 0x7ff8_dead);
    assert_eq!(bus.read_u32(0x2004), 0xbeef_0001);
    assert_eq!(fpu.cycles, 12);
}

#[test]
fn test_fmove_byte_to_register_truncates_through_word() {
    // FMOVE.B FP0,D1: 300 narrows to a word first, then to a byte.
    let (mut fpu, mut bus) = with_stream(&[0x6000 | (6 << 10) | (0 << 7)]);
    fpu.regs.fp[0] = FpValue::from_f64(300.7);
    fpu.regs.d[1] = 0xffff_ffff;

    assert_eq!(fpu.execute_general(&mut bus, 0x0001), Ok(()));
    assert_eq!(fpu.regs.d[1], 0x0000_002c);
    assert_eq!(fpu.cycles, 12);
}

#[test]
fn test_fmove_long_to_memory_rounds_toward_zero() {
    let (mut fpu, mut bus) = with_stream(&[0x6000 | (0 << 10) | (3 << 7)]);
    fpu.regs.fp[3] = FpValue::from_f64(-2.9);
    fpu.regs.a[1] = 0x3000;

    assert_eq!(fpu.execute_general(&mut bus, 0x0011), Ok(()));
    assert_eq!(bus.read_u32(0x3000) as i32, -2);
}

#[test]
fn test_fmove_packed_store_is_unsupported() {
    let (mut fpu, mut bus) = with_stream(&[0x6000 | (3 << 10) | (0 << 7)]);
    fpu.regs.a[0] = 0x2000;
    assert_eq!(
        fpu.execute_general(&mut bus, 0x0010),
        Err(DecodeError::Unsupported {
            feature: UnsupportedFeature::PackedRealStore,
            pc: 0x100,
        })
    );
}

#[test]
fn test_control_register_store_and_load() {
    // FMOVE FPCR,(A0)
    let (mut fpu, mut bus) = with_stream(&[0xa000 | (4 << 10)]);
    fpu.regs.fpcr = 0x0000_1234;
    fpu.regs.a[0] = 0x2000;
    assert_eq!(fpu.execute_general(&mut bus, 0x0010), Ok(()));
    assert_eq!(bus.read_u32(0x2000), 0x0000_1234);
    assert_eq!(fpu.cycles, 10);

    // FMOVE #imm,FPIAR
    let mut fpu = Fpu::new();
    fpu.pc = 0x102;
    bus.load_words(0x102, &[0x8000 | (1 << 10), 0xcafe, 0xf00d]);
    assert_eq!(fpu.execute_general(&mut bus, 0x003c), Ok(()));
    assert_eq!(fpu.regs.fpiar, 0xcafe_f00d);
    assert_eq!(fpu.pc, 0x108);
    assert_eq!(fpu.cycles, 10);
}

#[test]
fn test_control_register_unknown_selector() {
    let (mut fpu, mut bus) = with_stream(&[0x8000 | (3 << 10)]);
    assert_eq!(
        fpu.execute_general(&mut bus, 0x0010),
        Err(DecodeError::ControlRegister {
            selector: 3,
            to_memory: false,
            pc: 0x100,
        })
    );
}

#[test]
fn test_fmovem_store_predecrement_layout() {
    // FMOVEM FP0-FP1,-(A1): FP0 image lands just below the start address,
    // FP1 below that.
    let (mut fpu, mut bus) = with_stream(&[0xe000 | 0b0000_0011]);
    fpu.regs.fp[0] = FpValue::from_f64(1.0);
    fpu.regs.fp[1] = FpValue::from_f64(-2.0);
    fpu.regs.a[1] = 0x4000;

    assert_eq!(fpu.execute_general(&mut bus, 0x0021), Ok(()));
    assert_eq!(fpu.regs.a[1], 0x4000 - 24);
    assert_eq!(bus.read_u32(0x4000 - 12), 0x3ff0_0000, "FP0 high long");
    assert_eq!(bus.read_u32(0x4000 - 8), 0x0000_0000, "FP0 low long");
    assert_eq!(bus.read_u32(0x4000 - 4), 0x0000_0000, "FP0 zero tail");
    assert_eq!(bus.read_u32(0x4000 - 24), 0xc000_0000, "FP1 high long");
    assert_eq!(fpu.cycles, 4, "two cycles per transferred register");
}

#[test]
fn test_fmovem_load_postincrement_fills_high_registers() {
    // FMOVEM (A2)+,<two registers>: ascending mask bits fill FP7 downward.
    let (mut fpu, mut bus) = with_stream(&[0xc000 | (2 << 11) | 0b0000_0011]);
    fpu.regs.a[2] = 0x5000;
    bus.write_u32(0x5000, 0x3ff0_0000); // first slot: 1.0
    bus.write_u32(0x5004, 0x0000_0000);
    bus.write_u32(0x500c, 0x4000_0000); // second slot: 2.0
    bus.write_u32(0x5010, 0x0000_0000);

    assert_eq!(fpu.execute_general(&mut bus, 0x001a), Ok(()));
    assert_eq!(fpu.regs.fp[7].to_f64(), 1.0);
    assert_eq!(fpu.regs.fp[6].to_f64(), 2.0);
    assert_eq!(fpu.regs.a[2], 0x5000 + 24);
    assert_eq!(fpu.cycles, 4);
}

#[test]
fn test_fmovem_rejects_wrong_transfer_mode() {
    // Store direction only defines predecrement addressing.
    let (mut fpu, mut bus) = with_stream(&[0xe000 | (2 << 11) | 0b0000_0001]);
    assert_eq!(
        fpu.execute_general(&mut bus, 0x0021),
        Err(DecodeError::TransferMode {
            mode: 2,
            to_memory: true,
            pc: 0x100,
        })
    );
}

#[test]
fn test_fbcc_word_taken_branch() {
    // FBEQ with Z set branches relative to the displacement word.
    let (mut fpu, mut bus) = with_stream(&[0x0010]);
    fpu.regs.fpsr = FPCC_Z;
    fpu.suppress_trace();

    assert_eq!(fpu.execute_general(&mut bus, 0x0080 | 0x01), Ok(()));
    assert_eq!(fpu.pc, 0x112, "0x102 plus the 16-bit displacement");
    assert!(!fpu.trace_suppressed(), "taken branch resets trace suppression");
    assert_eq!(fpu.cycles, 7);
}

#[test]
fn test_fbcc_word_not_taken() {
    let (mut fpu, mut bus) = with_stream(&[0x0010]);
    fpu.suppress_trace();

    // FBF never branches.
    assert_eq!(fpu.execute_general(&mut bus, 0x0080), Ok(()));
    assert_eq!(fpu.pc, 0x104, "falls through past the displacement word");
    assert!(fpu.trace_suppressed(), "suppression survives an untaken branch");
    assert_eq!(fpu.cycles, 7, "charged whether or not the branch is taken");
}

#[test]
fn test_fbcc_equal_not_taken_when_z_clear() {
    // FBEQ with Z clear falls through.
    let (mut fpu, mut bus) = with_stream(&[0x0010]);
    fpu.regs.fpsr = FPCC_N;

    assert_eq!(fpu.execute_general(&mut bus, 0x0080 | 0x01), Ok(()));
    assert_eq!(fpu.pc, 0x104);
    assert_eq!(fpu.cycles, 7);
}

#[test]
fn test_fbcc_word_zero_displacement_targets_displacement_word() {
    let (mut fpu, mut bus) = with_stream(&[0x0000]);
    assert_eq!(fpu.execute_general(&mut bus, 0x0080 | 0x0f), Ok(()));
    assert_eq!(fpu.pc, 0x102);
}

#[test]
fn test_fbcc_long_taken_branch() {
    let (mut fpu, mut bus) = with_stream(&[0x0000, 0x0100]);
    assert_eq!(fpu.execute_general(&mut bus, 0x00c0 | 0x0f), Ok(()));
    assert_eq!(fpu.pc, 0x202, "0x102 plus the 32-bit displacement");
    assert_eq!(fpu.cycles, 7);
}

#[test]
fn test_fbcc_unknown_predicate_is_fatal() {
    let (mut fpu, mut bus) = with_stream(&[0x0010]);
    assert_eq!(
        fpu.execute_general(&mut bus, 0x0080 | 0x3f),
        Err(DecodeError::Predicate { predicate: 0x3f })
    );
    assert_eq!(fpu.cycles, 0);
}

#[test]
fn test_fsave_stores_null_frame() {
    let mut fpu = Fpu::new();
    let mut bus = RamBus::default();
    fpu.regs.a[7] = 0x5004;
    bus.write_u32(0x5000, 0xffff_ffff);

    // FSAVE -(A7)
    assert_eq!(fpu.execute_save_restore(&mut bus, 0x0020 | 7), Ok(()));
    assert_eq!(fpu.regs.a[7], 0x5000);
    assert_eq!(bus.read_u32(0x5000), 0);
}

#[test]
fn test_frestore_consumes_frame_without_effect() {
    let mut fpu = Fpu::new();
    let mut bus = RamBus::default();
    fpu.regs.a[3] = 0x6000;
    bus.write_u32(0x6000, 0x1234_5678);
    let before = fpu.regs.clone();

    // FRESTORE (A3)+
    assert_eq!(fpu.execute_save_restore(&mut bus, 0x0040 | 0x18 | 3), Ok(()));
    assert_eq!(fpu.regs.a[3], 0x6004);
    fpu.regs.a[3] = before.a[3];
    assert_eq!(fpu.regs, before, "no other register changes");
}

#[test]
fn test_save_restore_undefined_class() {
    let mut fpu = Fpu::new();
    let mut bus = RamBus::default();
    fpu.pc = 0x102;
    assert_eq!(
        fpu.execute_save_restore(&mut bus, 0x0080 | 0x10),
        Err(DecodeError::OperationClass {
            class: 2,
            pc: 0x100,
        })
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_state_survives_serde_round_trip() {
    let (mut fpu, mut bus) = with_stream(&[(1 << 10) | (2 << 7) | 0x22]);
    fpu.regs.fp[1] = FpValue::from_f64(2.0);
    fpu.regs.fp[2] = FpValue::from_f64(3.0);
    assert_eq!(fpu.execute_general(&mut bus, 0x0000), Ok(()));

    let json = serde_json::to_string(&fpu).unwrap();
    let restored: Fpu = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, fpu);
}
