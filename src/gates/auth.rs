//! Authentication gate
//!
//! Validates the caller's session through the SSO collaborator. The actual
//! credential logic lives behind [`SsoValidator`]; this gate only enforces the
//! contract: unauthenticated callers are redirected into the login flow with
//! the original path preserved as a return-to target.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::GateError;
use crate::gates::Outcome;
use crate::request::{Identity, Request, Response};

/// Verdict returned by the SSO collaborator.
#[derive(Debug, Clone)]
pub struct SsoVerdict {
    /// Whether the presented session/token is valid
    pub authenticated: bool,
    /// Principal behind the session, present when authenticated
    pub identity: Option<Identity>,
}

impl SsoVerdict {
    /// Valid session for the given principal.
    pub fn authenticated(identity: Identity) -> Self {
        Self {
            authenticated: true,
            identity: Some(identity),
        }
    }

    /// No valid session.
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            identity: None,
        }
    }
}

/// External SSO session validation.
#[async_trait]
pub trait SsoValidator: Send + Sync {
    /// Validate the request's session. An `Err` is an internal fault, not an
    /// authentication failure; failed authentication is a normal
    /// `authenticated: false` verdict.
    async fn validate(&self, request: &Request) -> Result<SsoVerdict, GateError>;
}

/// Gate enforcing that every request carries a valid session.
#[derive(Clone)]
pub struct AuthGate {
    sso: Arc<dyn SsoValidator>,
    login_page_path: String,
}

impl AuthGate {
    /// Create the gate with its SSO collaborator and the login flow entry path.
    pub fn new(sso: Arc<dyn SsoValidator>, login_page_path: impl Into<String>) -> Self {
        Self {
            sso,
            login_page_path: login_page_path.into(),
        }
    }

    pub(crate) async fn apply(&self, request: &mut Request) -> Result<Outcome, GateError> {
        // The login page itself must stay reachable for anonymous callers.
        if request.path == self.login_page_path {
            return Ok(Outcome::Continue);
        }

        let verdict = self.sso.validate(request).await?;
        if verdict.authenticated {
            request.identity = verdict.identity;
            return Ok(Outcome::Continue);
        }

        let target = format!(
            "{}?returnTo={}",
            self.login_page_path,
            urlencoding::encode(&request.path)
        );
        debug!(request_id = %request.id, path = %request.path, "unauthenticated, redirecting to login");
        Ok(Outcome::Halt(Response::redirect(target)))
    }
}
