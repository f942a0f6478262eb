//! Deterministic Q47.16 fixed-point scalar and vector arithmetic.
//!
//! Converted from the source engine's fixed-point math requirements:
//! every operation here is a pure integer function so the same input
//! sequence produces byte-identical `FP`/`FPVec2` values on any
//! conforming two's-complement 64-bit target.

pub mod error;
pub mod fp;
pub mod vec2;

pub use error::FpError;
pub use fp::FP;
pub use vec2::FPVec2;
