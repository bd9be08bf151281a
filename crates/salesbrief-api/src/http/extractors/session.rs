//! Browser session extractor.
//!
//! Each browser is identified by the `sbrief_session` cookie. A request
//! without a valid cookie gets a fresh id; the handler must then attach the
//! `Set-Cookie` header via [`BrowserSession::attach`].

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::Response;
use salesbrief_core::session::{SessionId, SessionStore};
use uuid::Uuid;

use crate::state::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "sbrief_session";

/// The caller's session id, and whether it was just minted.
#[derive(Debug, Clone, Copy)]
pub struct BrowserSession {
    pub id: SessionId,
    pub is_new: bool,
}

impl FromRequestParts<AppState> for BrowserSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match session_from_headers(parts) {
            Some(id) => Ok(Self { id, is_new: false }),
            None => Ok(Self {
                id: SessionStore::new_session_id(),
                is_new: true,
            }),
        }
    }
}

impl BrowserSession {
    /// `Set-Cookie` value for this session.
    pub fn cookie(&self) -> String {
        format!(
            "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax",
            self.id
        )
    }

    /// Attach the cookie to `response` when the session was just created.
    pub fn attach(&self, mut response: Response) -> Response {
        if self.is_new
            && let Ok(value) = HeaderValue::from_str(&self.cookie())
        {
            response.headers_mut().append(SET_COOKIE, value);
        }
        response
    }
}

/// Find the session cookie across all `Cookie` headers.
fn session_from_headers(parts: &Parts) -> Option<SessionId> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}
