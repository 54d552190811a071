use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clientele_core::errors::{ApplicationError, CustomerError};
use tracing::{debug, error};

use crate::fault;

/// Handler error. Client failures become plain-text bodies; faults are
/// handed to the fault layer's fixed 500 response.
#[derive(Debug)]
pub struct ApiError(pub ApplicationError);

impl From<ApplicationError> for ApiError {
    fn from(value: ApplicationError) -> Self {
        Self(value)
    }
}

impl From<CustomerError> for ApiError {
    fn from(value: CustomerError) -> Self {
        Self(value.into())
    }
}

pub fn status_for(error: &CustomerError) -> StatusCode {
    match error {
        CustomerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        CustomerError::AlreadyExists(_) => StatusCode::CONFLICT,
        CustomerError::NotFound(_) => StatusCode::NOT_FOUND,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ApplicationError::Customer(error) => {
                let status = status_for(&error);
                debug!(
                    event_name = "http.request.rejected",
                    status = status.as_u16(),
                    reason = %error,
                    "customer request rejected"
                );
                (status, error.message().to_owned()).into_response()
            }
            ApplicationError::Persistence(detail) => {
                error!(
                    event_name = "http.fault.persistence",
                    error = %detail,
                    "customer store failure"
                );
                fault::internal_error_response()
            }
        }
    }
}
