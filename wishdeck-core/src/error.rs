use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("remote failure: {0}")]
    RemoteFailure(String),

    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl Error {
    /// Returns a stable error code for this error variant.
    /// These codes are stable and can be used by callers for error classification.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NOT_FOUND",
            Error::RemoteFailure(_) => "REMOTE_FAILURE",
            Error::StorageFailure(_) => "STORAGE_FAILURE",
        }
    }

    /// Returns true if this error is potentially retryable.
    ///
    /// Transport failures are transient; a missing record is not going
    /// to reappear by retrying the same call.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RemoteFailure(_) => true,
            Error::NotFound(_) => false,
            Error::StorageFailure(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
