//! Portal request gating
//!
//! Ordered chain of request gates enforcing SSO authentication and
//! commercial-license acceptance before any request reaches application
//! logic. Consumed in-process by a host server; no wire surface of its own.
//!
//! # Architecture
//!
//! ```text
//! request ──► FilterChain ──► AuthGate ──► LicenseGate ──► RedirectionGate ──► terminal handler
//!                                │             │                 │
//!                                ▼             ▼                 ▼
//!                          login redirect  acceptance /     canonical
//!                          (returnTo)      error page       destination
//! ```
//!
//! Every gate either continues the chain or halts it with a fully formed
//! response. The first halt wins. Gate order is fixed at construction:
//! auth before license so anonymous callers never learn license state,
//! license before redirection so unlicensed installs never reach
//! destination logic.

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod chain;
pub mod config;
pub mod error;
pub mod gates;
pub mod license;
pub mod middleware;
pub mod request;

pub use chain::{FilterChain, TerminalHandler};
pub use config::GateConfig;
pub use error::{GateError, LicenseError};
pub use gates::{
    AuthGate, DestinationSelector, Gate, LicenseGate, Outcome, RedirectionGate, SsoValidator,
    SsoVerdict,
};
pub use license::{LicenseState, LicenseStatus};
pub use middleware::{gate_middleware, GateLayerState, IdentityExt};
pub use request::{Identity, Request, Response};
