//! Request and response types
//!
//! A [`Request`] is owned by the chain for the duration of processing and is
//! never shared across requests. A [`Response`] is the fully formed result a
//! gate produces when it halts the chain.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unit of work traversing the gate chain.
#[derive(Debug, Clone)]
pub struct Request {
    /// Correlation id for logging
    pub id: Uuid,
    /// Request path, e.g. `/dashboard`
    pub path: String,
    /// Session/identity token presented by the caller, if any
    pub token: Option<String>,
    /// Authenticated principal, attached by the auth gate
    pub identity: Option<Identity>,
}

impl Request {
    /// Create a request for the given path with no token.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            path: path.into(),
            token: None,
            identity: None,
        }
    }

    /// Attach a session token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Authenticated principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user id
    pub user_id: String,
    /// Primary email
    pub email: String,
    /// When the session was validated
    pub authenticated_at: DateTime<Utc>,
}

impl Identity {
    /// Create an identity validated now.
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            authenticated_at: Utc::now(),
        }
    }
}

/// Fully formed response produced by a halting gate or the terminal handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status
    pub status: StatusCode,
    /// Redirect target, set for 3xx responses
    pub redirect: Option<String>,
    /// Response body, if any
    pub body: Option<String>,
}

impl Response {
    /// 302 redirect to the given path.
    pub fn redirect(target: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FOUND,
            redirect: Some(target.into()),
            body: None,
        }
    }

    /// 200 response with a body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            redirect: None,
            body: Some(body.into()),
        }
    }

    /// Generic 500 response. Deliberately carries no internal detail.
    pub fn server_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            redirect: None,
            body: Some("Internal server error".into()),
        }
    }

    /// Redirect target, if this is a redirect response.
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect.as_deref()
    }
}
