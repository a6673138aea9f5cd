//! Filter chain
//!
//! Ordered composition of gates. The order is data: it is fixed when the chain
//! is built and every request traverses it in exactly that sequence. The first
//! gate that halts wins; the terminal handler runs only when every gate
//! continues. Traversal is async: when the enclosing request is cancelled the
//! future is dropped, remaining gates never run, and no response is produced.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::config::GateConfig;
use crate::gates::{
    AuthGate, DestinationSelector, Gate, LicenseGate, Outcome, RedirectionGate, SsoValidator,
};
use crate::license::LicenseState;
use crate::request::{Request, Response};

/// The application's normal request handling, invoked only when every gate
/// continues.
#[async_trait]
pub trait TerminalHandler: Send + Sync {
    /// Handle a request that passed every gate.
    async fn handle(&self, request: &Request) -> Response;
}

/// Ordered, immutable sequence of gates.
#[derive(Debug, Clone)]
pub struct FilterChain {
    gates: Arc<Vec<Gate>>,
}

impl FilterChain {
    /// Build a chain from an explicit gate order. The order is not validated;
    /// callers own the safety of their ordering. Use [`FilterChain::standard`]
    /// for the deployment order.
    pub fn new(gates: Vec<Gate>) -> Self {
        Self {
            gates: Arc::new(gates),
        }
    }

    /// The deployment order: auth, then license, then redirection.
    ///
    /// Auth must precede license gating so an unauthenticated caller never
    /// learns license state, and license gating must precede redirection so an
    /// unlicensed install never reaches destination logic.
    pub fn standard(
        config: &GateConfig,
        license: Arc<LicenseState>,
        sso: Arc<dyn SsoValidator>,
        selector: Arc<dyn DestinationSelector>,
    ) -> Self {
        Self::new(vec![
            Gate::Auth(AuthGate::new(sso, config.login_page_path.clone())),
            Gate::License(LicenseGate::new(license, config)),
            Gate::Redirection(RedirectionGate::new(selector)),
        ])
    }

    /// Gate names in traversal order.
    pub fn gate_names(&self) -> Vec<&'static str> {
        self.gates.iter().map(Gate::name).collect()
    }

    /// Run the gates in order. The first halt short-circuits; a gate fault is
    /// converted into a generic server-error halt and logged, never retried.
    /// Every call produces an outcome; a request is never left unanswered by
    /// the chain itself.
    pub async fn evaluate(&self, request: &mut Request) -> Outcome {
        for gate in self.gates.iter() {
            match gate.apply(request).await {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Halt(response)) => {
                    debug!(
                        request_id = %request.id,
                        path = %request.path,
                        gate = gate.name(),
                        status = %response.status,
                        "gate halted request"
                    );
                    return Outcome::Halt(response);
                }
                Err(fault) => {
                    error!(
                        request_id = %request.id,
                        path = %request.path,
                        gate = gate.name(),
                        error = %fault,
                        "gate fault"
                    );
                    return Outcome::Halt(Response::server_error());
                }
            }
        }
        Outcome::Continue
    }

    /// Traverse the chain and, when every gate continues, delegate to the
    /// terminal handler.
    pub async fn run(&self, mut request: Request, terminal: &dyn TerminalHandler) -> Response {
        match self.evaluate(&mut request).await {
            Outcome::Halt(response) => response,
            Outcome::Continue => terminal.handle(&request).await,
        }
    }
}
