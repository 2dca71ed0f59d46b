use std::error::Error as _;

use tokio_postgres::error::SqlState;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Integrity constraint violated: {0}")]
    Constraint(#[source] tokio_postgres::Error),

    #[error("Database connection unavailable: {0}")]
    Connection(#[source] tokio_postgres::Error),

    #[error("Database error: {0}")]
    Database(#[source] tokio_postgres::Error),

    #[error("Failed to apply migrations: {0}")]
    Migration(#[from] refinery::Error),
}

impl StoreError {
    pub const fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }

    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<tokio_postgres::Error> for StoreError {
    fn from(err: tokio_postgres::Error) -> Self {
        if err.code().is_some_and(is_integrity_violation) {
            Self::Constraint(err)
        } else if err.code().is_some_and(is_connection_loss)
            || err.is_closed()
            || caused_by_io(&err)
        {
            Self::Connection(err)
        } else {
            Self::Database(err)
        }
    }
}

/// SQLSTATE class 23 covers every integrity constraint violation.
fn is_integrity_violation(code: &SqlState) -> bool {
    code.code().starts_with("23")
}

/// Class 08 connection exceptions, plus the server terminating the session.
fn is_connection_loss(code: &SqlState) -> bool {
    code.code().starts_with("08")
        || *code == SqlState::ADMIN_SHUTDOWN
        || *code == SqlState::CRASH_SHUTDOWN
        || *code == SqlState::CANNOT_CONNECT_NOW
}

/// Socket failures (refused, reset, timed out) surface as an io error source.
fn caused_by_io(err: &tokio_postgres::Error) -> bool {
    err.source()
        .is_some_and(|source| source.downcast_ref::<std::io::Error>().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_class_is_detected() {
        assert!(is_integrity_violation(&SqlState::NOT_NULL_VIOLATION));
        assert!(is_integrity_violation(&SqlState::UNIQUE_VIOLATION));
        assert!(is_integrity_violation(&SqlState::FOREIGN_KEY_VIOLATION));
    }

    #[test]
    fn other_classes_are_not_integrity_violations() {
        assert!(!is_integrity_violation(&SqlState::UNDEFINED_TABLE));
        assert!(!is_integrity_violation(&SqlState::CONNECTION_FAILURE));
        assert!(!is_integrity_violation(&SqlState::T_R_SERIALIZATION_FAILURE));
    }

    #[test]
    fn session_loss_codes_are_connection_errors() {
        assert!(is_connection_loss(&SqlState::CONNECTION_FAILURE));
        assert!(is_connection_loss(&SqlState::CONNECTION_EXCEPTION));
        assert!(is_connection_loss(&SqlState::ADMIN_SHUTDOWN));
        assert!(is_connection_loss(&SqlState::CANNOT_CONNECT_NOW));
    }

    #[test]
    fn query_errors_are_not_connection_errors() {
        assert!(!is_connection_loss(&SqlState::UNDEFINED_TABLE));
        assert!(!is_connection_loss(&SqlState::NOT_NULL_VIOLATION));
        assert!(!is_connection_loss(&SqlState::SYNTAX_ERROR));
    }
}
