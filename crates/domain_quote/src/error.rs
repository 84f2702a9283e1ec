//! Quote domain errors
//!
//! The engine is pure, so the taxonomy is short: bad input from the caller,
//! a bad rate table, or a money operation that should never have been
//! attempted (mixed currencies, division by zero).

use thiserror::Error;

use core_kernel::{CoreError, MoneyError};

/// Errors that can occur while pricing a quote
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Malformed caller input: empty roster, non-positive fee, unknown tier
    #[error("Validation error: {0}")]
    Validation(String),

    /// Rate table could not be loaded or failed its invariants
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),
}

impl QuoteError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        QuoteError::Validation(message.into())
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        QuoteError::Configuration(message.into())
    }

    /// True for errors caused by caller input rather than configuration
    pub fn is_validation(&self) -> bool {
        matches!(self, QuoteError::Validation(_))
    }
}

impl From<::config::ConfigError> for QuoteError {
    fn from(err: ::config::ConfigError) -> Self {
        QuoteError::Configuration(err.to_string())
    }
}

impl From<CoreError> for QuoteError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Money(e) => QuoteError::Money(e),
            CoreError::Validation(msg) => QuoteError::Validation(msg),
            CoreError::Configuration(msg) => QuoteError::Configuration(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_errors_keep_their_category() {
        let err: QuoteError = CoreError::validation("bad fee").into();
        assert!(err.is_validation());

        let err: QuoteError = CoreError::configuration("bad table").into();
        assert!(matches!(err, QuoteError::Configuration(msg) if msg == "bad table"));

        let err: QuoteError = CoreError::from(MoneyError::DivisionByZero).into();
        assert!(matches!(err, QuoteError::Money(MoneyError::DivisionByZero)));
    }
}
