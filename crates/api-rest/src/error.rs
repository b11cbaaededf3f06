//! Mapping from core errors onto HTTP responses.

use api_shared::pb;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use mediassist_core::constants::ROLE_HEADER;
use mediassist_core::AssistError;

/// Error returned by every fallible handler: a status code and a JSON [`pb::ErrorRes`] body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: pb::ErrorRes,
}

impl ApiError {
    fn new(status: StatusCode, kind: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: pb::ErrorRes {
                kind: kind.into(),
                message: message.into(),
            },
        }
    }
}

impl From<AssistError> for ApiError {
    fn from(err: AssistError) -> Self {
        match &err {
            AssistError::InvalidInput(_) => {
                ApiError::new(StatusCode::BAD_REQUEST, "invalid_input", err.to_string())
            }
            AssistError::MissingRole => ApiError::new(
                StatusCode::UNAUTHORIZED,
                "missing_role",
                format!("missing {ROLE_HEADER} header"),
            ),
            AssistError::Forbidden { .. } => {
                ApiError::new(StatusCode::FORBIDDEN, "forbidden", err.to_string())
            }
            AssistError::NotFound(_) => {
                ApiError::new(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            AssistError::TransportFailure(_) => {
                tracing::error!("Generation transport error: {:?}", err);
                ApiError::new(
                    StatusCode::BAD_GATEWAY,
                    "transport_failure",
                    "The suggestion service could not be reached",
                )
            }
            AssistError::SchemaMismatch(_) => {
                tracing::error!("Generation reply rejected: {:?}", err);
                ApiError::new(
                    StatusCode::BAD_GATEWAY,
                    "schema_mismatch",
                    "The suggestion service returned an unexpected reply",
                )
            }
            AssistError::Config(_) => {
                tracing::error!("Configuration error: {:?}", err);
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "config",
                    "Internal error",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failures_are_distinguishable() {
        let transport = ApiError::from(AssistError::TransportFailure("timed out".into()));
        let schema = ApiError::from(AssistError::SchemaMismatch("expected array".into()));

        assert_eq!(transport.status, StatusCode::BAD_GATEWAY);
        assert_eq!(schema.status, StatusCode::BAD_GATEWAY);
        assert_eq!(transport.body.kind, "transport_failure");
        assert_eq!(schema.body.kind, "schema_mismatch");
    }

    #[test]
    fn caller_errors_map_to_4xx() {
        assert_eq!(
            ApiError::from(AssistError::InvalidInput("blank".into())).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(AssistError::MissingRole).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(AssistError::Forbidden {
                role: "admin".into(),
                action: "use the symptom checker",
            })
            .status,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::from(AssistError::NotFound("hospital 9".into())).status,
            StatusCode::NOT_FOUND
        );
    }
}
