//! The backyard cuckoo hashing dictionary of Arbitman, Naor & Segev (2010).
//!
//! Most items live in the first level, an array of small bins. Items that don't fit into their
//! bin are placed into the "backyard": two cuckoo tables with a bounded, queue-driven eviction
//! procedure and cycle detection instead of unbounded cuckoo walks.
mod config;
pub use config::*;
mod core;
pub use self::core::*;
mod ctors;
mod dictionary;
