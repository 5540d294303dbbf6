use async_trait::async_trait;
use serde::Serialize;
use crate::core::library::LibraryError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CommandError {
    NotFound {
        message: String,
    },
    InvalidTransition {
        message: String,
        reason_code: String,
    },
    Conflict {
        message: String,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
}

impl CommandError {
    pub fn retryable(&self) -> bool {
        match self {
            CommandError::Conflict { retryable, .. } => { *retryable }
            CommandError::Runtime { retryable, .. } => { *retryable }
            _ => { false }
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        let reason_code = other.reason_code().to_string();
        match other {
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::AlreadyCheckedOut { message } |
            LibraryError::NotCheckedOut { message } |
            LibraryError::NotLost { message } |
            LibraryError::DuplicateHold { message } |
            LibraryError::NotPending { message } => {
                CommandError::InvalidTransition { message, reason_code }
            }
            LibraryError::ConcurrencyConflict { message, retryable } => {
                CommandError::Conflict { message, retryable }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_map_transition_errors() {
        let err = CommandError::from(LibraryError::already_checked_out("asset 1 is checked out"));
        assert_eq!(CommandError::InvalidTransition {
            message: "asset 1 is checked out".to_string(),
            reason_code: "AlreadyCheckedOut".to_string(),
        }, err);
        assert!(!err.retryable());
    }

    #[tokio::test]
    async fn test_should_map_conflict_as_retryable() {
        let err = CommandError::from(LibraryError::concurrency_conflict("busy"));
        assert!(matches!(err, CommandError::Conflict { .. }));
        assert!(err.retryable());
    }

    #[tokio::test]
    async fn test_should_map_not_found() {
        let err = CommandError::from(LibraryError::not_found("no asset"));
        assert!(matches!(err, CommandError::NotFound { .. }));
    }
}
