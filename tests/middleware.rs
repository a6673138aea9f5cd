//! End-to-end tests of the axum adapter: a gated router with the downstream
//! routes acting as the terminal handler.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    http::{header, HeaderValue, StatusCode},
    middleware::from_fn_with_state,
    routing::get,
    Extension, Router,
};
use axum_test::TestServer;

use portal_gate::{
    DestinationSelector, FilterChain, GateConfig, GateError, GateLayerState, Identity,
    IdentityExt, LicenseState, Request, SsoValidator, SsoVerdict,
};

struct TokenSso;

#[async_trait]
impl SsoValidator for TokenSso {
    async fn validate(&self, request: &Request) -> Result<SsoVerdict, GateError> {
        match request.token.as_deref() {
            Some("valid-token") => Ok(SsoVerdict::authenticated(Identity::new(
                "user-1",
                "admin@example.com",
            ))),
            _ => Ok(SsoVerdict::anonymous()),
        }
    }
}

struct RootToDashboard;

#[async_trait]
impl DestinationSelector for RootToDashboard {
    async fn select(&self, request: &Request) -> Result<Option<String>, GateError> {
        Ok((request.path == "/").then(|| "/dashboard".to_string()))
    }
}

async fn dashboard(Extension(IdentityExt(identity)): Extension<IdentityExt>) -> String {
    format!("hello {}", identity.email)
}

fn gated_app(license: Arc<LicenseState>) -> Router {
    let chain = FilterChain::standard(
        &GateConfig::default(),
        license,
        Arc::new(TokenSso),
        Arc::new(RootToDashboard),
    );
    let state = GateLayerState::new(Arc::new(chain));

    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/", get(|| async { "root" }))
        .layer(from_fn_with_state(state, portal_gate::gate_middleware))
}

fn location(response: &axum_test::TestResponse) -> String {
    response
        .header(header::LOCATION)
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn anonymous_request_is_redirected_to_login() {
    let server = TestServer::new(gated_app(Arc::new(LicenseState::accepted()))).unwrap();

    let response = server.get("/dashboard").await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(location(&response), "/site/login?returnTo=%2Fdashboard");
}

#[tokio::test]
async fn authenticated_request_reaches_handler_with_identity() {
    let server = TestServer::new(gated_app(Arc::new(LicenseState::accepted()))).unwrap();

    let response = server
        .get("/dashboard")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer valid-token"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.text(), "hello admin@example.com");
}

#[tokio::test]
async fn non_bearer_authorization_is_treated_as_anonymous() {
    // A Basic credential is not a session token; it must not be handed to the
    // SSO collaborator as one.
    let server = TestServer::new(gated_app(Arc::new(LicenseState::accepted()))).unwrap();

    let response = server
        .get("/dashboard")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(location(&response), "/site/login?returnTo=%2Fdashboard");
}

#[tokio::test]
async fn unaccepted_license_redirects_before_the_handler_runs() {
    let server = TestServer::new(gated_app(Arc::new(LicenseState::unaccepted()))).unwrap();

    let response = server
        .get("/dashboard")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer valid-token"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(location(&response), "/site/auth/accept-fair-source-license");
}

#[tokio::test]
async fn root_is_rewritten_to_dashboard() {
    let server = TestServer::new(gated_app(Arc::new(LicenseState::accepted()))).unwrap();

    let response = server
        .get("/")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer valid-token"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);
    assert_eq!(location(&response), "/dashboard");
}

#[tokio::test]
async fn acceptance_flow_unblocks_traffic_mid_run() {
    let license = Arc::new(LicenseState::unaccepted());
    let server = TestServer::new(gated_app(license.clone())).unwrap();

    let response = server
        .get("/dashboard")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer valid-token"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::FOUND);

    license.accept().unwrap();

    let response = server
        .get("/dashboard")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer valid-token"),
        )
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
