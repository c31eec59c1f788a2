//! Backyard cuckoo hashing: a dictionary with constant-time worst-case lookups and removals, and
//! constant-time amortized insertions.
pub mod bins;
pub mod collection;
pub mod detector;
pub mod engine;
pub mod hashing;
pub mod queue;

pub use backyard_core::{BackyardError, Dictionary, HashFunction, HashInput, Item};
pub use engine::{BackyardCuckoo, Config, Location, Occupancy};
