#![allow(dead_code)]
//! Shared testing utilities: data and trace generation, reference-model equivalence checks and
//! statistical tests for hash function families.

pub mod stat;
pub use stat::*;

pub mod generate;
pub use generate::*;

pub mod trace;
pub use trace::*;

pub mod equivalence;
pub use equivalence::*;
