//! Identity extractors.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! user id in the `x-user-id` header.

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderName, StatusCode};

use crate::api::rest::error::from_parts;
use crate::api::rest::problem::ProblemResponse;

pub static USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");

fn unauthorized(detail: &str, parts: &Parts) -> ProblemResponse {
    from_parts(
        StatusCode::UNAUTHORIZED,
        "RECIPES_UNAUTHORIZED",
        "Unauthorized",
        detail,
        parts.uri.path(),
    )
}

/// `Ok(None)` when the header is absent, `Err` when it is present but not a positive id.
fn user_id(parts: &Parts) -> Result<Option<i32>, ProblemResponse> {
    let Some(raw) = parts.headers.get(&USER_ID_HEADER) else {
        return Ok(None);
    };
    raw.to_str()
        .ok()
        .and_then(|s| s.trim().parse::<i32>().ok())
        .filter(|id| *id > 0)
        .map(Some)
        .ok_or_else(|| unauthorized("Malformed x-user-id header", parts))
}

/// Authenticated caller; rejects the request with 401 when absent.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i32);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match user_id(parts)? {
            Some(id) => Ok(Self(id)),
            None => Err(unauthorized("Authentication credentials were not provided", parts)),
        }
    }
}

/// Optional caller for read endpoints that personalise flags.
#[derive(Debug, Clone, Copy)]
pub struct Viewer(pub Option<i32>);

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        user_id(parts).map(Self)
    }
}
