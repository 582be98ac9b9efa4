//! Contract-specific error types
//!
//! Error taxonomy for platform access, rating operations, and function
//! dispatch. Business-rule failures and infrastructure failures stay in
//! separate variants so callers can tell them apart.

use thiserror::Error;

/// Failures reported by the Ledger Platform
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Failed to read {key} from world state: {reason}")]
    Read { key: String, reason: String },

    #[error("Failed to write {key} to world state: {reason}")]
    Write { key: String, reason: String },

    #[error("Failed to read history for {key}: {reason}")]
    History { key: String, reason: String },
}

/// Rating operation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    #[error("The ledger {ledger_id} already exists")]
    AlreadyExists { ledger_id: String },

    #[error("The rating {ledger_id} does not exist")]
    NotFound { ledger_id: String },

    #[error("Platform error: {0}")]
    PlatformIO(#[from] PlatformError),

    #[error("Malformed rating stored under {ledger_id}: {reason}")]
    Decode { ledger_id: String, reason: String },

    #[error("Failed to encode rating for {ledger_id}: {reason}")]
    Encode { ledger_id: String, reason: String },
}

impl RatingError {
    /// True for business-rule failures (`AlreadyExists`, `NotFound`).
    pub fn is_business(&self) -> bool {
        matches!(
            self,
            RatingError::AlreadyExists { .. } | RatingError::NotFound { .. }
        )
    }
}

/// Function dispatch errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },

    #[error("Incorrect number of arguments for {function}: expected {expected}, got {got}")]
    ArgumentCount {
        function: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid argument {name}: {value}")]
    InvalidArgument { name: String, value: String },

    #[error("Rating error: {0}")]
    Rating(#[from] RatingError),

    #[error("Failed to encode response: {reason}")]
    Encode { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_display() {
        let err = RatingError::AlreadyExists {
            ledger_id: "u1:delivery".to_string(),
        };
        assert_eq!(err.to_string(), "The ledger u1:delivery already exists");
    }

    #[test]
    fn test_rating_error_from_platform() {
        let platform_err = PlatformError::Read {
            key: "k".to_string(),
            reason: "peer unavailable".to_string(),
        };
        let rating_err: RatingError = platform_err.into();
        assert!(matches!(rating_err, RatingError::PlatformIO(_)));
        assert!(rating_err.to_string().contains("peer unavailable"));
    }

    #[test]
    fn test_business_classification() {
        assert!(RatingError::NotFound {
            ledger_id: "k".to_string()
        }
        .is_business());
        assert!(!RatingError::Decode {
            ledger_id: "k".to_string(),
            reason: "eof".to_string()
        }
        .is_business());
        assert!(!RatingError::PlatformIO(PlatformError::Write {
            key: "k".to_string(),
            reason: "closed".to_string()
        })
        .is_business());
    }

    #[test]
    fn test_invoke_error_argument_count_display() {
        let err = InvokeError::ArgumentCount {
            function: "RegisterRate".to_string(),
            expected: 3,
            got: 1,
        };
        assert!(err.to_string().contains("expected 3, got 1"));
    }

    #[test]
    fn test_invoke_error_from_rating() {
        let err: InvokeError = RatingError::NotFound {
            ledger_id: "k".to_string(),
        }
        .into();
        assert!(matches!(err, InvokeError::Rating(RatingError::NotFound { .. })));
    }
}
