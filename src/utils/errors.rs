use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use mongodb::{bson, error::Error as MongoError};
use serde_json::{json, Value};
use thiserror::Error;
use bson::ser::Error as BsonError;
use bson::de::Error as BsonDeError;

// Flipped off at startup when running in production mode.
static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(true);

/// Controls whether 500 responses carry a `details` field with the
/// underlying error text.
pub fn expose_internal_details(expose: bool) {
    EXPOSE_DETAILS.store(expose, Ordering::Relaxed);
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error(transparent)]
    MongoError(#[from] MongoError),

    #[error("Serialization error")]
    SerializationError(#[from] BsonError),

    #[error("Deserialization error")]
    DeserializationError(#[from] BsonDeError)
}

impl ApiError {

    /// JSON body sent to the client. `expose_details` adds the driver or
    /// codec error text to server-side failures.
    pub fn to_body(&self, expose_details: bool) -> Value {
        let code = self.status_code().as_u16();

        match self {
            ApiError::InvalidId(message)
            | ApiError::ValidationError(message)
            | ApiError::NotFound(message)
            | ApiError::InternalError(message) => {
                json!({ "error": message, "code": code })
            },
            ApiError::MongoError(err) => {
                Self::with_details("Database error", code, err.to_string(), expose_details)
            },
            ApiError::SerializationError(err) => {
                Self::with_details("Failed to encode stored document", code, err.to_string(), expose_details)
            },
            ApiError::DeserializationError(err) => {
                Self::with_details("Failed to decode stored document", code, err.to_string(), expose_details)
            }
        }
    }

    fn with_details(message: &str, code: u16, details: String, expose_details: bool) -> Value {
        let mut body = json!({ "error": message, "code": code });
        if expose_details {
            body["details"] = Value::String(details);
        }
        body
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_)
            | ApiError::MongoError(_)
            | ApiError::SerializationError(_)
            | ApiError::DeserializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("request failed: {}", self);
        }
        HttpResponse::build(status).json(self.to_body(EXPOSE_DETAILS.load(Ordering::Relaxed)))
    }
}

// ----------------------------- TESTS --------------------------------
