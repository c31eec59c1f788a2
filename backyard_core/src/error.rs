//! Error definitions.
use thiserror::Error;

/// Project-wise error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackyardError {
    /// A fixed-capacity structure was asked to hold more elements than it was configured for.
    ///
    /// Fatal for the operation that triggered it: the structure is left untouched, but the
    /// element that did not fit is not stored anywhere by the structure itself. Usually means that
    /// the dimensions passed at construction are too small for the workload.
    #[error("Capacity of the {structure} ({capacity} elements) has been exceeded.")]
    CapacityExceeded {
        structure: &'static str,
        capacity: usize,
    },
    /// Construction parameters are inconsistent (zero-sized dimensions and such).
    #[error("Invalid configuration: {0}.")]
    InvalidConfig(&'static str),
}
