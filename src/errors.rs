use axum::http::StatusCode;
use thiserror::Error;

/// Failures of a load or mutation against the habits API.
#[derive(Debug, Error)]
pub enum HabitError {
    /// Rejected locally; no request was sent.
    #[error("{0}")]
    Validation(String),

    /// The request never completed or its body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered {status}: {message}")]
    Server { status: u16, message: String },

    #[error("invalid habits endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

impl HabitError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Status used when a failed action is answered with the re-rendered page.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Transport(_) | Self::Server { .. } => StatusCode::BAD_GATEWAY,
            Self::InvalidEndpoint { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
