use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use http::{Request, Response};
use tower::{Layer, Service};
use tracing::{info, warn};

/// Split a gRPC request path (`/package.Service/Method`) into service and
/// method names.
#[must_use]
pub fn split_grpc_path(path: &str) -> (String, String) {
    let mut parts = path.trim_start_matches('/').splitn(2, '/');
    let service = parts.next().filter(|s| !s.is_empty()).unwrap_or("unknown");
    let method = parts.next().filter(|s| !s.is_empty()).unwrap_or("unknown");
    (service.to_string(), method.to_string())
}

/// `grpc-web` for browser calls, `grpc` otherwise.
fn transport_of<B>(req: &Request<B>) -> &'static str {
    let grpc_web = req
        .headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/grpc-web"));
    if grpc_web {
        "grpc-web"
    } else {
        "grpc"
    }
}

/// A Tower layer that logs gRPC requests and responses.
#[derive(Clone, Copy)]
pub struct GrpcLoggingLayer;

impl<S> Layer<S> for GrpcLoggingLayer {
    type Service = GrpcLoggingService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        GrpcLoggingService { inner }
    }
}

/// A Tower service that logs gRPC requests and responses.
#[derive(Clone)]
pub struct GrpcLoggingService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for GrpcLoggingService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let (service, method) = split_grpc_path(req.uri().path());
        let transport = transport_of(&req);

        info!(
            grpc.service = %service,
            grpc.method = %method,
            transport,
            "gRPC request started"
        );

        let mut inner = self.inner.clone();
        Box::pin(async move {
            let result = inner.call(req).await;
            let duration_ms = start.elapsed().as_millis();

            match &result {
                Ok(response) => {
                    // Trailers-only responses carry the status in the headers;
                    // otherwise it arrives later in trailers and reads as "0".
                    let status = response
                        .headers()
                        .get("grpc-status")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("0");
                    if status == "0" {
                        info!(
                            grpc.service = %service,
                            grpc.method = %method,
                            grpc.status = %status,
                            duration_ms = %duration_ms,
                            "gRPC request completed"
                        );
                    } else {
                        warn!(
                            grpc.service = %service,
                            grpc.method = %method,
                            grpc.status = %status,
                            duration_ms = %duration_ms,
                            "gRPC request returned an error status"
                        );
                    }
                }
                Err(_) => {
                    warn!(
                        grpc.service = %service,
                        grpc.method = %method,
                        grpc.status = "error",
                        duration_ms = %duration_ms,
                        "gRPC request failed"
                    );
                }
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_grpc_path() {
        assert_eq!(
            split_grpc_path("/lostfound.LostFound/ApproveItem"),
            ("lostfound.LostFound".to_string(), "ApproveItem".to_string())
        );
        assert_eq!(
            split_grpc_path("/"),
            ("unknown".to_string(), "unknown".to_string())
        );
    }

    #[test]
    fn test_transport_detection() {
        let web = Request::builder()
            .header(http::header::CONTENT_TYPE, "application/grpc-web+proto")
            .body(())
            .unwrap();
        let native = Request::builder()
            .header(http::header::CONTENT_TYPE, "application/grpc")
            .body(())
            .unwrap();
        assert_eq!(transport_of(&web), "grpc-web");
        assert_eq!(transport_of(&native), "grpc");
    }
}
