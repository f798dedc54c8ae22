use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure or an undecodable body
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Non-2xx reply, with the backend's `message` if it sent one
    #[error("{}", status_text(.status, .message.as_deref()))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    /// 2xx reply that is not the one the operation expects
    #[error("unexpected status from API: {0}")]
    UnexpectedStatus(StatusCode),
}

fn status_text(status: &StatusCode, message: Option<&str>) -> String {
    match message {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => format!("HTTP error from API: {status}"),
    }
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Authentication,
    Validation,
    NotFound,
    Conflict,
    Server,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::InvalidUrl(_) | ApiError::UnexpectedStatus(_) => ErrorKind::Server,
            ApiError::Status { status, .. } => match *status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::Authentication,
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ErrorKind::Validation
                }
                StatusCode::NOT_FOUND => ErrorKind::NotFound,
                StatusCode::CONFLICT => ErrorKind::Conflict,
                _ => ErrorKind::Server,
            },
        }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Text shown to the operator: the backend's message when present, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}
