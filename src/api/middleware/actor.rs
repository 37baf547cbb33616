//! Actor extraction from request credentials

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::domain::Actor;

/// Header accepted as an alternative to `Authorization: Bearer`
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// The caller of the current request
///
/// Never rejects: a request without credentials yields an anonymous actor and
/// the authorizer decides what it may do.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

impl CurrentActor {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let token = bearer_token(headers).or_else(|| header_token(headers));

        match token {
            Some(token) => CurrentActor(Actor::with_token(token)),
            None => CurrentActor(Actor::anonymous()),
        }
    }
}

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    non_empty(token)
}

fn header_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(ADMIN_TOKEN_HEADER)?.to_str().ok()?;
    non_empty(value)
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
