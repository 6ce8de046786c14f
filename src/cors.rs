use http::Method;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Local development origins for the campus web front end.
pub const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost,https://localhost,http://127.0.0.1,https://127.0.0.1";

/// Whether `origin` is allowed by `allowed`.
///
/// Entries match by prefix, so `http://localhost` also admits
/// `http://localhost:5173`. A `*` entry admits every origin.
#[must_use]
pub fn origin_allowed(allowed: &[String], origin: &str) -> bool {
    allowed
        .iter()
        .any(|entry| entry == "*" || origin.starts_with(entry.as_str()))
}

/// Build a CORS layer for gRPC-Web with the given allowed origins.
///
/// The `authorization` header must pass through for admin calls, so every
/// request header is allowed.
#[must_use]
pub fn build_cors_layer(cors_origins: Vec<String>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin
                .to_str()
                .is_ok_and(|origin| origin_allowed(&cors_origins, origin))
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .expose_headers(Any)
}
