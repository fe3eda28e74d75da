use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use storage::repository::SessionKey;
use tracing::debug;

pub const SESSION_COOKIE: &str = "drill_session";

/// Session selected by the request's `drill_session` cookie, or the implicit user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSession(pub SessionKey);

impl<S> FromRequestParts<S> for RequestSession
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_key_from_headers(&parts.headers)))
    }
}

/// Pick the session key out of every `Cookie` header; a malformed value falls back to
/// the implicit user.
#[must_use]
pub fn session_key_from_headers(headers: &HeaderMap) -> SessionKey {
    let raw = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| name.trim() == SESSION_COOKIE)
        .map(|(_, value)| value.trim().trim_matches('"'));

    match raw.map(SessionKey::new) {
        Some(Ok(key)) => key,
        Some(Err(err)) => {
            debug!(%err, "ignoring unusable session cookie");
            SessionKey::implicit()
        }
        None => SessionKey::implicit(),
    }
}
