use std::fmt::Display;

use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;

use serde::Serialize;

pub const REGISTERED: &str = "Student registered successfully!";
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const NO_RESULTS: &str = "No results found for this registration number";

pub async fn handler404(path: Uri) -> Error {
    Error::NotFound {
        message: format!("Invalid path: {}", path),
    }
}

/// The `{"success": "...", "message": "..."}` body every non-record reply uses.
/// `success` is the string `"true"`/`"false"`, not a JSON boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    success: &'static str,
    message: String,
}

impl Reply {
    pub fn fine<S: Into<String>>(message: S) -> Self {
        Self {
            success: "true",
            message: message.into(),
        }
    }

    pub fn failed<S: Into<String>>(message: S) -> Self {
        Self {
            success: "false",
            message: message.into(),
        }
    }
}

/// Which request an internal failure happened in; picks the message the caller sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Login,
    Registration,
    Results,
}

impl Flow {
    pub fn failure_message(self) -> &'static str {
        match self {
            Flow::Login => "An error occurred during login",
            Flow::Registration => "An error occurred during registration",
            Flow::Results => "An error occurred while fetching results",
        }
    }
}

#[derive(Debug)]
pub enum Error {
    InvalidCredentials,
    NoResults { reg_no: String },
    NotFound { message: String },
    InternalError {
        flow: Flow,
        kind: &'static str,
        message: String,
    },
}

impl Error {
    /// Body could not be read as the expected JSON.
    pub fn payload(flow: Flow, err: impl Display) -> Error {
        Error::InternalError {
            flow,
            kind: "PayloadError",
            message: err.to_string(),
        }
    }

    pub fn store(flow: Flow, err: impl Display) -> Error {
        Error::InternalError {
            flow,
            kind: "DatabaseError",
            message: err.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, reply) = match self {
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, Reply::failed(INVALID_CREDENTIALS)),
            Error::NoResults { reg_no } => {
                log::debug!("No student with reg_no {}", reg_no);
                (StatusCode::NOT_FOUND, Reply::failed(NO_RESULTS))
            }
            Error::NotFound { message } => (StatusCode::NOT_FOUND, Reply::failed(message)),
            Error::InternalError { flow, kind, message } => {
                log::error!("{:?} failed with {}: {}", flow, kind, message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Reply::failed(flow.failure_message()),
                )
            }
        };
        (status, Json(reply)).into_response()
    }
}
