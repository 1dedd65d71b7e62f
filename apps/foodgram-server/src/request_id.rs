use axum::http::{HeaderName, Request};
use axum::{body::Body, middleware::Next, response::Response};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request id as seen by handlers.
#[derive(Clone, Debug)]
pub struct XRequestId(pub String);

/// Generates ids for requests that arrive without one.
#[derive(Clone, Default)]
pub struct NanoRequestId;

impl MakeRequestId for NanoRequestId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        let id = nanoid::nanoid!();
        Some(RequestId::new(id.parse().ok()?))
    }
}

fn header_value<B>(req: &Request<B>) -> &str {
    req.headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("n/a")
}

/// Stores the request id in extensions and records it on the current span.
pub async fn record_request_id(mut req: Request<Body>, next: Next) -> Response {
    let rid = header_value(&req).to_owned();
    tracing::Span::current().record("request_id", tracing::field::display(&rid));
    req.extensions_mut().insert(XRequestId(rid));
    next.run(req).await
}

#[allow(clippy::type_complexity)]
pub fn trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> tracing::Span + Clone,
> {
    TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
        tracing::info_span!(
            "http_request",
            method = %req.method(),
            path = %req.uri().path(),
            version = ?req.version(),
            request_id = %header_value(req),
            status = Empty,
            latency_ms = Empty
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_valid_header_values() {
        let req = Request::builder().uri("/").body(()).unwrap();
        let id = NanoRequestId.make_request_id(&req).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert_eq!(value.len(), 21);
    }

    #[test]
    fn missing_header_reads_as_placeholder() {
        let req = Request::builder().uri("/").body(()).unwrap();
        assert_eq!(header_value(&req), "n/a");
    }
}
