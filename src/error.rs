// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
}

/// Why an analysis attempt ended without a result.
///
/// Every variant is terminal for the current attempt only: the selected image
/// stays usable and the user may analyze again. Files that are not images
/// never reach the backend; the intake rejects them with
/// [`IntakeError::InvalidFileType`](crate::intake::IntakeError::InvalidFileType).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The request could not complete (connection refused, timeout, ...).
    NetworkFailure,

    /// The backend answered with a structured error; shown verbatim.
    BackendRejected(String),

    /// The backend answered with something that is not the expected payload.
    MalformedResponse,
}

impl AnalysisError {
    /// Returns the i18n key of the generic message for this error.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            AnalysisError::NetworkFailure => "error_network",
            AnalysisError::BackendRejected(_) => "error_prediction_failed",
            AnalysisError::MalformedResponse => "error_prediction_failed",
        }
    }

    /// Returns the server-supplied message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AnalysisError::BackendRejected(msg) if !msg.trim().is_empty() => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::NetworkFailure => write!(f, "Network failure"),
            AnalysisError::BackendRejected(msg) => write!(f, "{}", msg),
            AnalysisError::MalformedResponse => write!(f, "Malformed response"),
        }
    }
}

impl std::error::Error for AnalysisError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
