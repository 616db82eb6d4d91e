// Error handling for the HTTP layer
// Wraps domain errors and maps them onto status codes and the error envelope

use std::fmt::{Display, Formatter};

use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, PathError, QueryPayloadError},
    http::StatusCode,
};
use panelkit_common::PanelError;
use panelkit_common::error::{PARAMETER_VALIDATE_ERROR, SERVER_ERROR};

use crate::model::response as common;

// Local wrapper so actix-web's ResponseError can be implemented
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl From<PanelError> for AppError {
    fn from(value: PanelError) -> Self {
        AppError {
            inner: anyhow::Error::new(value),
        }
    }
}

impl AppError {
    pub fn inner(&self) -> &anyhow::Error {
        &self.inner
    }

    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        let status = self
            .downcast_ref::<PanelError>()
            .map(PanelError::http_status)
            .unwrap_or(500);
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        match self.downcast_ref::<PanelError>() {
            Some(e) => {
                let status = e.http_status();
                if status >= 500 {
                    tracing::error!("Request failed: {}", e);
                } else {
                    tracing::debug!("Request rejected: {}", e);
                }
                common::Result::<()>::http_response(
                    status,
                    e.error_code().code,
                    e.to_string(),
                    (),
                )
            }
            None => {
                tracing::error!("Unhandled error: {:#}", self.inner);
                common::Result::<()>::http_response(
                    500,
                    SERVER_ERROR.code,
                    self.inner.to_string(),
                    (),
                )
            }
        }
    }
}

fn bad_request(message: String) -> HttpResponse {
    common::Result::<()>::http_response(400, PARAMETER_VALIDATE_ERROR.code, message, ())
}

/// Malformed JSON bodies are validation failures
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = bad_request(err.to_string());
    InternalError::from_response(err, response).into()
}

pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = bad_request(err.to_string());
    InternalError::from_response(err, response).into()
}

pub fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    let response = bad_request(err.to_string());
    InternalError::from_response(err, response).into()
}
