//! Hash function families used for placement and probing.
//!
//! Both families implement [`backyard_core::HashFunction`] and own their PRNG, so that
//! structures can re-sample them in place during a rebuild.
pub mod common;
mod carter_wegman;
pub use carter_wegman::*;
mod tornado;
pub use tornado::*;
