use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use std::fmt;

/// Application errors surfaced to HTTP callers
#[derive(Debug, Clone)]
pub enum BusinessError {
    /// Validation errors for user input (400 Bad Request)
    ValidationError { field: String, message: String },
    /// Resource not found (404 Not Found)
    NotFound { resource: String, id: String },
    /// Duplicate resource (409 Conflict)
    Duplicate { resource: String, field: String },
    /// External service errors (502 Bad Gateway)
    ExternalServiceError { service: String, message: String },
    /// Generic application error (500 Internal Server Error)
    InternalError { message: String },
}

impl fmt::Display for BusinessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessError::ValidationError { field, message } => {
                write!(f, "Validation error in field '{field}': {message}")
            }
            BusinessError::NotFound { resource, id } => {
                write!(f, "{resource} with id '{id}' not found")
            }
            BusinessError::Duplicate { resource, field } => {
                write!(f, "{resource} with this {field} already exists")
            }
            BusinessError::ExternalServiceError { service, message } => {
                write!(f, "External service '{service}' error: {message}")
            }
            BusinessError::InternalError { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for BusinessError {}

impl BusinessError {
    fn status_and_code(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            BusinessError::ValidationError { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "ValidationError")
            }
            BusinessError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND", "NotFound")
            }
            BusinessError::Duplicate { .. } => {
                (StatusCode::CONFLICT, "DUPLICATE_RESOURCE", "Duplicate")
            }
            BusinessError::ExternalServiceError { .. } => (
                StatusCode::BAD_GATEWAY,
                "EXTERNAL_SERVICE_ERROR",
                "ExternalServiceError",
            ),
            BusinessError::InternalError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "InternalError",
            ),
        }
    }
}

/// Convert `BusinessError` to HTTP responses
impl IntoResponse for BusinessError {
    fn into_response(self) -> Response {
        let (status, error_code, error_type) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!("{self}");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "type": error_type,
            }
        }));

        (status, body).into_response()
    }
}

/// Maps store errors onto `BusinessError` with the resource they concern
pub struct ErrorMapper;

impl ErrorMapper {
    pub fn map_db_error(err: DbErr, context: &str) -> BusinessError {
        let resource = Self::extract_resource_from_context(context);

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                return BusinessError::Duplicate {
                    resource,
                    field: Self::extract_field_from_constraint(&msg),
                };
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                return BusinessError::ValidationError {
                    field: Self::extract_field_from_constraint(&msg),
                    message: "references a record that does not exist".to_string(),
                };
            }
            _ => {}
        }

        match err {
            DbErr::RecordNotFound(msg) => BusinessError::NotFound {
                resource,
                id: Self::extract_id_from_message(&msg),
            },
            DbErr::Conn(conn_err) => BusinessError::ExternalServiceError {
                service: "database".to_string(),
                message: conn_err.to_string(),
            },
            DbErr::Exec(exec_err) => {
                let err_msg = exec_err.to_string();
                if err_msg.contains("UNIQUE constraint") || err_msg.contains("duplicate key") {
                    BusinessError::Duplicate {
                        resource,
                        field: Self::extract_field_from_constraint(&err_msg),
                    }
                } else {
                    BusinessError::InternalError { message: err_msg }
                }
            }
            _ => BusinessError::InternalError {
                message: err.to_string(),
            },
        }
    }

    fn extract_resource_from_context(context: &str) -> String {
        context.replace('_', " ")
    }

    /// Picks the first integer-looking token, quotes stripped
    fn extract_id_from_message(msg: &str) -> String {
        msg.split_whitespace()
            .map(|word| word.trim_matches('\'').trim_matches('"'))
            .find(|cleaned| cleaned.parse::<i64>().is_ok())
            .map_or_else(|| "unknown".to_string(), ToString::to_string)
    }

    fn extract_field_from_constraint(msg: &str) -> String {
        if msg.contains("sim_id") {
            "sim_id".to_string()
        } else if msg.contains("id") {
            "id".to_string()
        } else {
            "field".to_string()
        }
    }
}

#[macro_export]
macro_rules! validation_error {
    ($field:expr, $message:expr) => {
        $crate::common::errors::BusinessError::ValidationError {
            field: $field.to_string(),
            message: $message.to_string(),
        }
    };
}

#[macro_export]
macro_rules! not_found {
    ($resource:expr, $id:expr) => {
        $crate::common::errors::BusinessError::NotFound {
            resource: $resource.to_string(),
            id: $id.to_string(),
        }
    };
}

/// Extension trait to add business error conversion to `DbErr`
pub trait DbErrorExt {
    fn to_business_error(self, context: &str) -> BusinessError;
}

impl DbErrorExt for DbErr {
    fn to_business_error(self, context: &str) -> BusinessError {
        ErrorMapper::map_db_error(self, context)
    }
}

pub type BusinessResult<T> = Result<T, BusinessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_creation() {
        let err = validation_error!("sim", "SIM with id 42 does not exist");
        assert!(matches!(err, BusinessError::ValidationError { .. }));
        assert_eq!(
            err.to_string(),
            "Validation error in field 'sim': SIM with id 42 does not exist"
        );
    }

    #[test]
    fn test_error_mapper_not_found() {
        let db_err = DbErr::RecordNotFound("Device with id '1234' not found".to_string());
        let business_err = ErrorMapper::map_db_error(db_err, "device");

        match business_err {
            BusinessError::NotFound { resource, id } => {
                assert_eq!(resource, "device");
                assert_eq!(id, "1234");
            }
            _ => panic!("Expected not found error"),
        }
    }

    #[test]
    fn test_error_mapper_custom_is_internal() {
        let db_err = DbErr::Custom("something unexpected".to_string());
        let business_err = db_err.to_business_error("device");
        assert!(matches!(business_err, BusinessError::InternalError { .. }));
    }

    #[test]
    fn test_not_found_into_response() {
        let response = not_found!("device", 100_000).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_duplicate_into_response() {
        let err = BusinessError::Duplicate {
            resource: "device".to_string(),
            field: "sim_id".to_string(),
        };
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
