//! Body and query extractors whose rejections render as problem documents.

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::api::rest::error::from_parts;
use crate::api::rest::problem::ProblemResponse;

fn bad_input(status: StatusCode, title: &str, detail: String, instance: &str) -> ProblemResponse {
    // Shape errors are validation failures like any other.
    let status = match status {
        StatusCode::UNPROCESSABLE_ENTITY => StatusCode::BAD_REQUEST,
        other => other,
    };
    from_parts(status, "RECIPES_VALIDATION", title, detail, instance)
}

/// `Json<T>` with a problem+json rejection.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = req.uri().path().to_owned();
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(bad_input(
                rejection.status(),
                "Invalid request body",
                rejection.body_text(),
                &path,
            )),
        }
    }
}

/// `Query<T>` with a problem+json rejection.
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(bad_input(
                rejection.status(),
                "Invalid query parameters",
                rejection.body_text(),
                parts.uri.path(),
            )),
        }
    }
}
