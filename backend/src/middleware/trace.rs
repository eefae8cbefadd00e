//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! A valid UUID in the incoming `X-Request-Id` header is reused so callers
//! can correlate their own logs; otherwise a fresh id is generated. The id is
//! kept in task-local scope for the duration of the request and echoed in the
//! `Trace-Id` response header.

use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{Instrument, error, info_span};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Incoming header carrying a caller-chosen request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Middleware assigning each request a [`TraceId`].
///
/// # Examples
/// ```
/// use actix_web::App;
/// use profile_backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let incoming = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok());
        let trace_id = TraceId::from_request_id(incoming);
        let span = info_span!(
            "request",
            trace_id = %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = TraceId::scope(trace_id, self.service.call(req));
        Box::pin(
            async move {
                let mut res = fut.await?;
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(%error, %trace_id, "failed to encode trace identifier header");
                    }
                }
                Ok(res)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::{App, HttpResponse, test, web};

    async fn echo_trace_id() -> HttpResponse {
        match TraceId::current() {
            Some(id) => HttpResponse::Ok().body(id.to_string()),
            None => HttpResponse::InternalServerError().finish(),
        }
    }

    async fn call(request: test::TestRequest) -> (String, String) {
        let app = test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(echo_trace_id)),
        )
        .await;
        let res = test::call_service(&app, request.uri("/").to_request()).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        let body = test::read_body(res).await;
        let body = std::str::from_utf8(&body).expect("utf8 body").to_owned();
        (header, body)
    }

    #[actix_web::test]
    async fn handler_sees_the_advertised_trace_id() {
        let (header, body) = call(test::TestRequest::get()).await;
        assert_eq!(header, body);
    }

    #[actix_web::test]
    async fn valid_request_id_is_reused() {
        let request_id = "6f1c1a52-4cc4-4a59-9c55-6d8d3f0e8a11";
        let (header, _) =
            call(test::TestRequest::get().insert_header((REQUEST_ID_HEADER, request_id))).await;
        assert_eq!(header, request_id);
    }

    #[actix_web::test]
    async fn malformed_request_id_is_replaced() {
        let (header, _) =
            call(test::TestRequest::get().insert_header((REQUEST_ID_HEADER, "abc"))).await;
        assert_ne!(header, "abc");
        assert!(header.parse::<TraceId>().is_ok());
    }
}
