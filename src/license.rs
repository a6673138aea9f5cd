//! License acceptance state
//!
//! Process-wide record of whether the system license has been accepted.
//! Read on every request by the license gate, so reads must be a single
//! atomic load; writes publish the new status with a single-word swap so
//! concurrent readers see either the old or the new value, never a torn one.
//!
//! Gates only read this state. Transitions happen through [`LicenseState::accept`]
//! (administrative action) and [`LicenseState::mark_expired`] /
//! [`LicenseState::mark_invalid`] (out-of-band validity check). Cross-process
//! consistency, if the host runs multiple workers, is the deployment's problem.

use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::LicenseError;

/// License lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum LicenseStatus {
    /// Installed but not yet accepted by an administrator
    Unaccepted = 0,
    /// Accepted and currently valid
    Accepted = 1,
    /// Was accepted, validity period has lapsed
    Expired = 2,
    /// Failed an integrity/validity check
    Invalid = 3,
}

impl LicenseStatus {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Unaccepted,
            1 => Self::Accepted,
            2 => Self::Expired,
            _ => Self::Invalid,
        }
    }
}

/// Process-wide license state singleton.
///
/// Inject an `Arc<LicenseState>` into the license gate rather than reaching
/// for a global, so tests can run each chain against its own state.
#[derive(Debug)]
pub struct LicenseState {
    status: AtomicU8,
    // Cold path only: rendered on the license error page, never read per request.
    problem_detail: RwLock<Option<String>>,
}

impl LicenseState {
    /// Create state with the given initial status.
    pub fn new(initial: LicenseStatus) -> Self {
        Self {
            status: AtomicU8::new(initial as u8),
            problem_detail: RwLock::new(None),
        }
    }

    /// Fresh install: license not yet accepted.
    pub fn unaccepted() -> Self {
        Self::new(LicenseStatus::Unaccepted)
    }

    /// Already-accepted license.
    pub fn accepted() -> Self {
        Self::new(LicenseStatus::Accepted)
    }

    /// Current status. Lock-free, safe to call on every request.
    pub fn status(&self) -> LicenseStatus {
        LicenseStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Administrative acceptance: `Unaccepted -> Accepted`.
    pub fn accept(&self) -> Result<(), LicenseError> {
        self.transition(LicenseStatus::Unaccepted, LicenseStatus::Accepted)?;
        info!("system license accepted");
        Ok(())
    }

    /// Validity check result: `Accepted -> Expired`.
    pub fn mark_expired(&self, detail: impl Into<String>) -> Result<(), LicenseError> {
        self.transition(LicenseStatus::Accepted, LicenseStatus::Expired)?;
        *self.problem_detail.write() = Some(detail.into());
        Ok(())
    }

    /// Validity check result: `Accepted -> Invalid`.
    pub fn mark_invalid(&self, detail: impl Into<String>) -> Result<(), LicenseError> {
        self.transition(LicenseStatus::Accepted, LicenseStatus::Invalid)?;
        *self.problem_detail.write() = Some(detail.into());
        Ok(())
    }

    /// Description of the current license problem, if the validity check set one.
    pub fn problem_detail(&self) -> Option<String> {
        self.problem_detail.read().clone()
    }

    fn transition(&self, from: LicenseStatus, to: LicenseStatus) -> Result<(), LicenseError> {
        self.status
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|actual| LicenseError::InvalidTransition {
                from: LicenseStatus::from_u8(actual),
                to,
            })
    }
}
