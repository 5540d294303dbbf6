use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

pub type AssetId = i64;
pub type CheckoutId = i64;
pub type HoldId = i64;
pub type LibraryCardId = i64;

#[derive(Debug, Clone, PartialEq)]
pub enum LibraryError {
    NotFound {
        message: String,
    },
    AlreadyCheckedOut {
        message: String,
    },
    NotCheckedOut {
        message: String,
    },
    NotLost {
        message: String,
    },
    DuplicateHold {
        message: String,
    },
    NotPending {
        message: String,
    },
    // This is a retry-able error, which indicates that the per-asset lock being requested
    // is held by another request and was not released within the configured timeout.
    // The caller can retry once; the engine itself never retries.
    ConcurrencyConflict {
        message: String,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
}

impl LibraryError {
    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn already_checked_out(message: &str) -> LibraryError {
        LibraryError::AlreadyCheckedOut { message: message.to_string() }
    }

    pub fn not_checked_out(message: &str) -> LibraryError {
        LibraryError::NotCheckedOut { message: message.to_string() }
    }

    pub fn not_lost(message: &str) -> LibraryError {
        LibraryError::NotLost { message: message.to_string() }
    }

    pub fn duplicate_hold(message: &str) -> LibraryError {
        LibraryError::DuplicateHold { message: message.to_string() }
    }

    pub fn not_pending(message: &str) -> LibraryError {
        LibraryError::NotPending { message: message.to_string() }
    }

    pub fn concurrency_conflict(message: &str) -> LibraryError {
        LibraryError::ConcurrencyConflict { message: message.to_string(), retryable: true }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code, retryable }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::NotFound { .. } => { false }
            LibraryError::AlreadyCheckedOut { .. } => { false }
            LibraryError::NotCheckedOut { .. } => { false }
            LibraryError::NotLost { .. } => { false }
            LibraryError::DuplicateHold { .. } => { false }
            LibraryError::NotPending { .. } => { false }
            LibraryError::ConcurrencyConflict { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { retryable, .. } => { *retryable }
        }
    }

    // Rejected state-machine transitions; the asset state is untouched when these are returned.
    pub fn is_invalid_transition(&self) -> bool {
        matches!(self,
            LibraryError::AlreadyCheckedOut { .. } |
            LibraryError::NotCheckedOut { .. } |
            LibraryError::NotLost { .. } |
            LibraryError::DuplicateHold { .. } |
            LibraryError::NotPending { .. })
    }

    // short machine readable reason, used by commands and logs
    pub fn reason_code(&self) -> &'static str {
        match self {
            LibraryError::NotFound { .. } => { "NotFound" }
            LibraryError::AlreadyCheckedOut { .. } => { "AlreadyCheckedOut" }
            LibraryError::NotCheckedOut { .. } => { "NotCheckedOut" }
            LibraryError::NotLost { .. } => { "NotLost" }
            LibraryError::DuplicateHold { .. } => { "DuplicateHold" }
            LibraryError::NotPending { .. } => { "NotPending" }
            LibraryError::ConcurrencyConflict { .. } => { "ConcurrencyConflict" }
            LibraryError::Validation { .. } => { "Validation" }
            LibraryError::Serialization { .. } => { "Serialization" }
            LibraryError::Runtime { .. } => { "Runtime" }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<config::ConfigError> for LibraryError {
    fn from(err: config::ConfigError) -> Self {
        LibraryError::validation(
            format!("invalid configuration {}", err).as_str(), Some("config".to_string()))
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::NotFound { message } |
            LibraryError::AlreadyCheckedOut { message } |
            LibraryError::NotCheckedOut { message } |
            LibraryError::NotLost { message } |
            LibraryError::DuplicateHold { message } |
            LibraryError::NotPending { message } |
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::ConcurrencyConflict { message, retryable } => {
                write!(f, "{} {}", message, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Runtime { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for circulation operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    // The page token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum AssetKind {
    Book,
    Video,
}

impl Display for AssetKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            AssetKind::Book => write!(f, "Book"),
            AssetKind::Video => write!(f, "Video"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum AssetStatus {
    Available,
    CheckedOut,
    Lost,
}

impl Display for AssetStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            AssetStatus::Available => write!(f, "Available"),
            AssetStatus::CheckedOut => write!(f, "CheckedOut"),
            AssetStatus::Lost => write!(f, "Lost"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum CheckoutStatus {
    CheckedOut,
    Returned,
    Lost,
}


#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum HoldStatus {
    Pending,
    Cancelled,
    Fulfilled,
}

impl Display for HoldStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            HoldStatus::Pending => write!(f, "Pending"),
            HoldStatus::Cancelled => write!(f, "Cancelled"),
            HoldStatus::Fulfilled => write!(f, "Fulfilled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::{AssetKind, AssetStatus, HoldStatus, LibraryError};

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(LibraryError::not_found("test"), LibraryError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_transition_errors() {
        assert!(LibraryError::already_checked_out("test").is_invalid_transition());
        assert!(LibraryError::not_checked_out("test").is_invalid_transition());
        assert!(LibraryError::not_lost("test").is_invalid_transition());
        assert!(LibraryError::duplicate_hold("test").is_invalid_transition());
        assert!(LibraryError::not_pending("test").is_invalid_transition());
        assert!(!LibraryError::not_found("test").is_invalid_transition());
        assert!(!LibraryError::concurrency_conflict("test").is_invalid_transition());
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert!(!LibraryError::not_found("test").retryable());
        assert!(!LibraryError::already_checked_out("test").retryable());
        assert!(!LibraryError::duplicate_hold("test").retryable());
        assert!(LibraryError::concurrency_conflict("test").retryable());
        assert!(!LibraryError::validation("test", None).retryable());
        assert!(!LibraryError::serialization("test").retryable());
        assert!(LibraryError::runtime("test", None, true).retryable());
        assert!(!LibraryError::runtime("test", None, false).retryable());
    }

    #[tokio::test]
    async fn test_should_report_reason_code() {
        assert_eq!("DuplicateHold", LibraryError::duplicate_hold("test").reason_code());
        assert_eq!("ConcurrencyConflict", LibraryError::concurrency_conflict("test").reason_code());
        assert_eq!("asset 3 is already checked out",
                   LibraryError::already_checked_out("asset 3 is already checked out").to_string());
    }

    #[tokio::test]
    async fn test_should_format_statuses() {
        assert_eq!("CheckedOut", AssetStatus::CheckedOut.to_string());
        assert_eq!("Lost", AssetStatus::Lost.to_string());
        assert_eq!("Cancelled", HoldStatus::Cancelled.to_string());
        assert_eq!("Video", AssetKind::Video.to_string());
    }
}
