//! Core trait and error declarations shared by the crates of the workspace.
pub mod core;
pub use self::core::*;
pub mod error;
pub use error::*;
