//! Session token carried in a cookie
//!
//! The token only addresses the server-side notice store; it carries no data.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    response::Response,
};
use tracing::warn;

use crate::api::state::AppState;
use crate::domain::SessionId;

/// The notice session of the current request
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    is_new: bool,
}

impl Session {
    /// Read the session from the named cookie, starting a new one when absent or malformed
    pub fn from_headers(headers: &HeaderMap, cookie_name: &str) -> Self {
        match find_cookie(headers, cookie_name).and_then(|value| SessionId::parse(&value)) {
            Some(id) => Self { id, is_new: false },
            None => Self {
                id: SessionId::generate(),
                is_new: true,
            },
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn is_new(&self) -> bool {
        self.is_new
    }

    pub fn cookie_value(&self, cookie_name: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            cookie_name, self.id
        )
    }

    /// Hand a freshly started session to the client
    pub fn attach(&self, response: &mut Response, cookie_name: &str) {
        if !self.is_new {
            return;
        }

        match HeaderValue::from_str(&self.cookie_value(cookie_name)) {
            Ok(value) => {
                response.headers_mut().append(SET_COOKIE, value);
            }
            Err(e) => warn!(cookie = %cookie_name, error = %e, "Invalid session cookie"),
        }
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers, &state.session_cookie))
    }
}

fn find_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
}
