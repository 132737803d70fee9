//! Translation pass modules.
//!
//! Each pass is a self-contained tree rewrite over the `definitions` object.
//! Passes are executed in order (0-3) and each assumes the output of the
//! previous passes: refs already point at `components/schemas`, nullable
//! unions are already collapsed, and tagged unions are consumed before the
//! generic conditional expansion sees them.

pub mod p0_refs;
pub mod p1_nullable;
pub mod p2_discriminator;
pub mod p3_implication;
pub mod pass_result;
