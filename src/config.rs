//! Gate configuration
//!
//! All values are deployment constants: they are read once when the chain is
//! built and never change at runtime.

use serde::Deserialize;

/// Configured paths and flags for the gate chain.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Login flow entry point; unauthenticated requests are redirected here
    pub login_page_path: String,
    /// Page where an administrator accepts the license
    pub acceptance_page_path: String,
    /// Page describing an expired or invalid license
    pub license_error_page_path: String,
    /// Whether an unaccepted license blocks requests until accepted.
    /// When false the deployment runs without user interaction and
    /// unaccepted installs are let through.
    pub acceptance_required: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            login_page_path: "/site/login".into(),
            acceptance_page_path: "/site/auth/accept-fair-source-license".into(),
            license_error_page_path: "/site/error/fair-source-license-is-not-accepted-error".into(),
            acceptance_required: true,
        }
    }
}
