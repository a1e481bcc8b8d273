//! # Error Types
//!
//! The engine reports failures through a single closed enum. The `Display`
//! text of each variant is exactly the message a front-end must show when an
//! operation fails; on an `Err` the display string of the operation is
//! undefined and must not be rendered.
//!
//! ## Example
//!
//! ```rust
//! use pocket_core::errors::EngineError;
//!
//! assert_eq!(EngineError::Math.to_string(), "Math Error");
//! assert_eq!(EngineError::Math.error_code(), "MATH_ERR");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Outcome of a failed engine operation.
///
/// An evaluation failure becomes the engine's sticky status: every later
/// input-mutating call re-reports it unchanged until the engine is cancelled.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineError {
    /// Result magnitude left the displayable range, or a factorial operand
    /// was too large for an exact integer result.
    #[error("Overflow Error")]
    Overflow,

    /// Buffer content could not be read as a number.
    ///
    /// The editor operations never produce an unparseable buffer, so this is
    /// only reachable through the defensive parse in the evaluator.
    #[error("Syntax Error")]
    Syntax,

    /// An operand failed a domain check: division by zero, invalid
    /// power/root/combination operands, or a negative factorial operand.
    #[error("Math Error")]
    Math,
}

impl EngineError {
    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            EngineError::Overflow => "OVERFLOW_ERR",
            EngineError::Syntax => "SYNTAX_ERR",
            EngineError::Math => "MATH_ERR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_are_fixed() {
        assert_eq!(EngineError::Overflow.to_string(), "Overflow Error");
        assert_eq!(EngineError::Syntax.to_string(), "Syntax Error");
        assert_eq!(EngineError::Math.to_string(), "Math Error");
    }

    #[test]
    fn test_error_serialization() {
        let error = EngineError::Overflow;
        let json = serde_json::to_string(&error).unwrap();
        assert_eq!(json, "\"overflow\"");
        let roundtrip: EngineError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(EngineError::Overflow.error_code(), "OVERFLOW_ERR");
        assert_eq!(EngineError::Math.error_code(), "MATH_ERR");
    }
}
