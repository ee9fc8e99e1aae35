//! Domain errors

use thiserror::Error;

/// Error taxonomy for the reservation core.
///
/// Validation and eligibility failures are expected, frequent outcomes and
/// are surfaced to the caller verbatim. None of them is retried anywhere in
/// the core; a rejection is definitive.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    /// The requested date span collides with an active booking.
    #[error("Slot unavailable: {0}")]
    SlotUnavailable(String),

    /// Transition attempted from the wrong source status, or the actor
    /// has no right to act on this booking.
    #[error("Not eligible: {0}")]
    NotEligible(String),

    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
