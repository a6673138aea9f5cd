//! Redirection gate
//!
//! Rewrites requests to their canonical destination, e.g. the bare root to the
//! dashboard. Which paths are rewritten is decided by the external
//! [`DestinationSelector`]; this gate only enforces the halt/continue contract.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::GateError;
use crate::gates::Outcome;
use crate::request::{Request, Response};

/// External canonical-destination selection.
#[async_trait]
pub trait DestinationSelector: Send + Sync {
    /// Return the canonical destination for the request, or `None` when the
    /// current path already is the destination.
    async fn select(&self, request: &Request) -> Result<Option<String>, GateError>;
}

/// Gate redirecting requests to their canonical destination.
#[derive(Clone)]
pub struct RedirectionGate {
    selector: Arc<dyn DestinationSelector>,
}

impl RedirectionGate {
    /// Create the gate with its destination-selection collaborator.
    pub fn new(selector: Arc<dyn DestinationSelector>) -> Self {
        Self { selector }
    }

    pub(crate) async fn apply(&self, request: &mut Request) -> Result<Outcome, GateError> {
        match self.selector.select(request).await? {
            Some(destination) if destination != request.path => {
                debug!(
                    request_id = %request.id,
                    path = %request.path,
                    destination = %destination,
                    "rewriting to canonical destination"
                );
                Ok(Outcome::Halt(Response::redirect(destination)))
            }
            _ => Ok(Outcome::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RootToDashboard;

    #[async_trait]
    impl DestinationSelector for RootToDashboard {
        async fn select(&self, request: &Request) -> Result<Option<String>, GateError> {
            Ok((request.path == "/").then(|| "/dashboard".to_string()))
        }
    }

    #[tokio::test]
    async fn root_is_rewritten() {
        let gate = RedirectionGate::new(Arc::new(RootToDashboard));
        let mut request = Request::new("/");

        let outcome = gate.apply(&mut request).await.unwrap();
        assert_eq!(
            outcome.halted().and_then(|r| r.redirect_target()),
            Some("/dashboard")
        );
    }

    #[tokio::test]
    async fn canonical_path_continues() {
        let gate = RedirectionGate::new(Arc::new(RootToDashboard));
        let mut request = Request::new("/dashboard");

        let outcome = gate.apply(&mut request).await.unwrap();
        assert!(outcome.is_continue());
    }
}
