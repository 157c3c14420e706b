// src/error.rs

use std::fmt;

use thiserror::Error;

use crate::models::question::QuestionId;

/// Why a question load failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    NetworkError,
    NoQuestions,
    ParseError,
}

/// Why a submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitErrorKind {
    NetworkError,
    MalformedResult,
    ServerRejected,
}

impl SubmitErrorKind {
    /// Protocol mismatches that must not be treated as transient.
    pub fn is_contract_violation(self) -> bool {
        matches!(self, SubmitErrorKind::MalformedResult)
    }
}

/// Error category handed to the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LoadFailed(LoadErrorKind),
    SubmitFailed(SubmitErrorKind),
    InvalidLabel,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::LoadFailed(kind) => write!(f, "LoadFailed({:?})", kind),
            ErrorKind::SubmitFailed(kind) => write!(f, "SubmitFailed({:?})", kind),
            ErrorKind::InvalidLabel => f.write_str("InvalidLabel"),
        }
    }
}

/// Transport-level failures raised by a [`crate::gateway::QuizApi`].
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Connection, timeout or other I/O failure.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status. `message` is the server's `error` field when present.
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },

    /// Body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("anti-forgery token unavailable: {0}")]
    Token(String),
}

impl GatewayError {
    pub fn load_kind(&self) -> LoadErrorKind {
        match self {
            GatewayError::Decode(_) => LoadErrorKind::ParseError,
            _ => LoadErrorKind::NetworkError,
        }
    }

    pub fn submit_kind(&self) -> SubmitErrorKind {
        match self {
            GatewayError::Network(_) | GatewayError::Token(_) => SubmitErrorKind::NetworkError,
            GatewayError::Status { .. } => SubmitErrorKind::ServerRejected,
            GatewayError::Decode(_) => SubmitErrorKind::MalformedResult,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Decode(err.to_string())
    }
}

/// Errors surfaced by engine operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Option index or label does not address an option of the question.
    /// Signals label derivation drift; never silently ignored.
    #[error("invalid label for question {question_id}: option {index} of {option_count}")]
    InvalidLabel {
        question_id: QuestionId,
        index: usize,
        option_count: usize,
    },

    #[error("unknown question {0}")]
    UnknownQuestion(QuestionId),

    #[error("load failed ({kind:?}): {message}")]
    Load { kind: LoadErrorKind, message: String },

    #[error("submit failed ({kind:?}): {message}")]
    Submit { kind: SubmitErrorKind, message: String },
}

impl QuizError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            QuizError::InvalidLabel { .. } => Some(ErrorKind::InvalidLabel),
            QuizError::Load { kind, .. } => Some(ErrorKind::LoadFailed(*kind)),
            QuizError::Submit { kind, .. } => Some(ErrorKind::SubmitFailed(*kind)),
            QuizError::UnknownQuestion(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}
