//! Error types

use thiserror::Error;

use crate::license::LicenseStatus;

/// Internal fault raised by a gate or one of its collaborators.
///
/// A `GateError` is never surfaced to the caller as-is: the chain converts it
/// into a generic server-error halt and logs it. Authentication failures and
/// license problems are not faults, they are ordinary halt outcomes.
#[derive(Debug, Error)]
pub enum GateError {
    /// SSO collaborator failed to produce a verdict
    #[error("sso validation failed: {0}")]
    Sso(String),

    /// Destination-selection collaborator failed
    #[error("destination selection failed: {0}")]
    Destination(String),

    /// Any other internal gate failure
    #[error("internal gate failure: {0}")]
    Internal(String),
}

/// Rejected license-state transition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LicenseError {
    /// The requested transition is not part of the license lifecycle
    #[error("invalid license transition: {from:?} -> {to:?}")]
    InvalidTransition {
        /// Status at the time of the attempt
        from: LicenseStatus,
        /// Status that was requested
        to: LicenseStatus,
    },
}
