//! Request gates
//!
//! A gate inspects a request and either lets it continue down the chain or
//! halts it with a fully formed response. The set of gates is closed: every
//! variant is known here, which keeps chain behavior exhaustively testable.

pub mod auth;
pub mod license;
pub mod redirect;

pub use auth::{AuthGate, SsoValidator, SsoVerdict};
pub use license::LicenseGate;
pub use redirect::{DestinationSelector, RedirectionGate};

use crate::error::GateError;
use crate::request::{Request, Response};

/// Decision produced by a gate. There are exactly two kinds: pass the request
/// to the next gate, or short-circuit the chain with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Pass to the next gate (or the terminal handler)
    Continue,
    /// Short-circuit with this response; later gates never run
    Halt(Response),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Continue`].
    pub fn is_continue(&self) -> bool {
        matches!(self, Outcome::Continue)
    }

    /// The halting response, if any.
    pub fn halted(&self) -> Option<&Response> {
        match self {
            Outcome::Continue => None,
            Outcome::Halt(response) => Some(response),
        }
    }
}

/// One filter in the chain.
///
/// Gates are immutable after construction and shared read-only across all
/// in-flight requests; the only shared mutable state they touch is
/// [`crate::license::LicenseState`], which they read without locking.
#[derive(Clone)]
pub enum Gate {
    /// Session/credential validation via the SSO collaborator
    Auth(AuthGate),
    /// License acceptance/validity gating
    License(LicenseGate),
    /// Canonical-destination rewriting
    Redirection(RedirectionGate),
}

impl Gate {
    /// Apply this gate to the request. An `Err` is an internal fault, which
    /// the chain converts into a generic server-error halt.
    pub async fn apply(&self, request: &mut Request) -> Result<Outcome, GateError> {
        match self {
            Gate::Auth(gate) => gate.apply(request).await,
            Gate::License(gate) => Ok(gate.apply(request)),
            Gate::Redirection(gate) => gate.apply(request).await,
        }
    }

    /// Gate name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Auth(_) => "auth",
            Gate::License(_) => "license",
            Gate::Redirection(_) => "redirection",
        }
    }
}

impl std::fmt::Debug for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gate").field("name", &self.name()).finish()
    }
}
