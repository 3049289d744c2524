//! Common types shared across the subsystem.

/// Decode and unsupported-feature error definitions.
pub mod error;
/// Tagged floating-point value (raw bit pattern plus interpreted double).
pub mod value;
