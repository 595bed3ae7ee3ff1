//! Error types

use std::fmt;

use thiserror::Error;

/// Boxed error produced by an [`HTTPClient`](crate::client::HTTPClient) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result alias used throughout the crate.
pub type CoveResult<T> = Result<T, Error>;

/// The remote operation an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `GET /secrets/{id}`
    GetSecret,
    /// `GET /secrets`
    ListSecrets,
    /// `POST /secrets/{id}`
    AddSecret,
    /// `PATCH /secrets/{id}`
    UpdateSecret,
    /// `DELETE /secrets/{id}`
    DeleteSecret,
    /// `GET /bootstrap/lighthouse`
    Bootstrap,
}

impl Operation {
    /// Whether the operation writes to the vault.
    pub fn is_write(self) -> bool {
        matches!(
            self,
            Operation::AddSecret | Operation::UpdateSecret | Operation::DeleteSecret
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::GetSecret => "GetSecret",
            Operation::ListSecrets => "ListSecrets",
            Operation::AddSecret => "AddSecret",
            Operation::UpdateSecret => "UpdateSecret",
            Operation::DeleteSecret => "DeleteSecret",
            Operation::Bootstrap => "Bootstrap",
        };
        f.write_str(name)
    }
}

/// An unexpected status code returned by the Cove API.
///
/// Read operations only carry the status. Write operations also keep the raw
/// response body, since the service explains rejected writes there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoveAPIError {
    /// Operation that received the status.
    pub operation: Operation,
    /// HTTP status code.
    pub status: u16,
    /// Raw response body, kept for write operations.
    pub body: Option<String>,
}

impl fmt::Display for CoveAPIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "coveClient: {}: unexpected status {}",
            self.operation, self.status
        )?;
        if let Some(body) = &self.body {
            write!(f, ": {}", body)?;
        }
        Ok(())
    }
}

impl std::error::Error for CoveAPIError {}

/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be built; no I/O was attempted.
    #[error("invalid request: {0}")]
    Request(String),

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The transport failed before a response was received.
    #[error("{operation}: transport error: {source}")]
    Transport {
        /// Operation being performed.
        operation: Operation,
        /// Underlying transport error.
        #[source]
        source: BoxError,
    },

    /// The API answered with a status other than the expected success code.
    #[error(transparent)]
    Status(#[from] CoveAPIError),

    /// A success status was received but the body did not match the expected shape.
    #[error("{operation}: failed to decode response: {source}")]
    Decode {
        /// Operation being performed.
        operation: Operation,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Client configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status code, when this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status(e) => Some(e.status),
            _ => None,
        }
    }

    /// Raw response body, when this is a status error from a write operation.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Status(e) => e.body.as_deref(),
            _ => None,
        }
    }

    /// Operation the error belongs to, if a request had been built.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Error::Transport { operation, .. } | Error::Decode { operation, .. } => {
                Some(*operation)
            }
            Error::Status(e) => Some(e.operation),
            _ => None,
        }
    }

    pub(crate) fn transport(operation: Operation, source: impl Into<BoxError>) -> Self {
        Error::Transport {
            operation,
            source: source.into(),
        }
    }

    pub(crate) fn decode(operation: Operation, source: serde_json::Error) -> Self {
        Error::Decode { operation, source }
    }
}

impl From<hyper::http::Error> for Error {
    fn from(err: hyper::http::Error) -> Self {
        Error::Request(err.to_string())
    }
}
