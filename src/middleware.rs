//! Axum adapter
//!
//! Mounts the filter chain in front of a host router. The downstream router is
//! the terminal handler: it runs only when every gate continues.
//!
//! ```rust,ignore
//! let state = GateLayerState::new(Arc::new(chain));
//! let app = Router::new()
//!     .route("/dashboard", get(dashboard))
//!     .layer(middleware::from_fn_with_state(state, gate_middleware));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request as HttpRequest, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response as HttpResponse},
    Json,
};
use serde_json::json;

use crate::chain::FilterChain;
use crate::gates::Outcome;
use crate::request::{Identity, Request, Response};

/// Identity extension inserted into the http request once the auth gate has
/// attached a principal. Downstream handlers extract it with `Extension`.
#[derive(Debug, Clone)]
pub struct IdentityExt(pub Identity);

/// Shared state for [`gate_middleware`].
#[derive(Clone)]
pub struct GateLayerState {
    chain: Arc<FilterChain>,
}

impl GateLayerState {
    /// Wrap a built chain for mounting.
    pub fn new(chain: Arc<FilterChain>) -> Self {
        Self { chain }
    }
}

/// Run the gate chain against an incoming http request.
pub async fn gate_middleware(
    State(state): State<GateLayerState>,
    mut http_request: HttpRequest,
    next: Next,
) -> HttpResponse {
    let mut request = Request::new(http_request.uri().path());
    request.token = bearer_token(&http_request);

    match state.chain.evaluate(&mut request).await {
        Outcome::Halt(response) => render(response),
        Outcome::Continue => {
            if let Some(identity) = request.identity {
                http_request.extensions_mut().insert(IdentityExt(identity));
            }
            next.run(http_request).await
        }
    }
}

fn bearer_token(request: &HttpRequest) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn render(response: Response) -> HttpResponse {
    if let Some(target) = response.redirect {
        return (response.status, [(header::LOCATION, target)]).into_response();
    }
    if response.status.is_success() {
        return (response.status, response.body.unwrap_or_default()).into_response();
    }
    let message = response
        .body
        .unwrap_or_else(|| "request rejected".to_string());
    (response.status, Json(json!({ "error": message }))).into_response()
}
