//! Request tracing middleware.
//!
//! Every request runs inside an `http_request` span carrying its method,
//! path and request id. The id is taken from `x-request-id` when the client
//! sends one, generated otherwise, and echoed on the response.

use std::future::{Ready, ready};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderName, HeaderValue},
};
use futures::future::LocalBoxFuture;
use tracing::{Instrument, Span, info_span};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Request id stored in the request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    fn from_request(req: &ServiceRequest) -> Self {
        let id = req
            .headers()
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty() && v.len() <= 128)
            .map(String::from)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        RequestId(id)
    }
}

/// Tracing middleware factory
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestTracing;

impl<S, B> Transform<S, ServiceRequest> for RequestTracing
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestTracingService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestTracingService { service }))
    }
}

pub struct RequestTracingService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestTracingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = RequestId::from_request(&req);

        let span = info_span!(
            "http_request",
            request_id = %request_id.0,
            http.method = %req.method(),
            http.target = %req.path(),
            http.status_code = tracing::field::Empty,
        );

        req.extensions_mut().insert(request_id.clone());
        let fut = self.service.call(req);

        Box::pin(
            async move {
                let mut res = fut.await?;

                Span::current().record("http.status_code", res.status().as_u16());
                if let Ok(value) = HeaderValue::from_str(&request_id.0) {
                    res.headers_mut()
                        .insert(HeaderName::from_static(X_REQUEST_ID), value);
                }

                Ok(res)
            }
            .instrument(span),
        )
    }
}
