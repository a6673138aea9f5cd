//! License gate
//!
//! Consults [`LicenseState`] on every request and diverts traffic until the
//! license is accepted, or to the error page when it is expired or invalid.
//! The status read is a single atomic load; this gate never talks to a
//! license server and never blocks.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::GateConfig;
use crate::gates::Outcome;
use crate::license::{LicenseState, LicenseStatus};
use crate::request::{Request, Response};

/// Gate enforcing license acceptance and validity.
#[derive(Clone)]
pub struct LicenseGate {
    state: Arc<LicenseState>,
    acceptance_page_path: String,
    license_error_page_path: String,
    login_page_path: String,
    acceptance_required: bool,
}

impl LicenseGate {
    /// Create the gate over the shared license state.
    pub fn new(state: Arc<LicenseState>, config: &GateConfig) -> Self {
        Self {
            state,
            acceptance_page_path: config.acceptance_page_path.clone(),
            license_error_page_path: config.license_error_page_path.clone(),
            login_page_path: config.login_page_path.clone(),
            acceptance_required: config.acceptance_required,
        }
    }

    pub(crate) fn apply(&self, request: &Request) -> Outcome {
        // Invariant: the gate's own destinations are exempt, otherwise every
        // redirect it issues would be gated again and loop forever. The login
        // page is exempt for the same reason: the auth gate sends anonymous
        // callers there, and gating that path would bounce them between login
        // and acceptance pages without either ever being reachable.
        if request.path == self.acceptance_page_path
            || request.path == self.license_error_page_path
            || request.path == self.login_page_path
        {
            return Outcome::Continue;
        }

        match self.state.status() {
            LicenseStatus::Accepted => Outcome::Continue,
            LicenseStatus::Unaccepted if !self.acceptance_required => Outcome::Continue,
            LicenseStatus::Unaccepted => {
                debug!(
                    request_id = %request.id,
                    path = %request.path,
                    "license not accepted, redirecting to acceptance page"
                );
                Outcome::Halt(Response::redirect(&self.acceptance_page_path))
            }
            status @ (LicenseStatus::Expired | LicenseStatus::Invalid) => {
                warn!(
                    request_id = %request.id,
                    path = %request.path,
                    ?status,
                    detail = self.state.problem_detail().as_deref(),
                    "license problem, redirecting to error page"
                );
                Outcome::Halt(Response::redirect(&self.license_error_page_path))
            }
        }
    }
}
