use std::fmt::Display;

use thiserror::Error;

/// Configuration error raised while building a lexer.
///
/// Carries the offending grammar's type name so a failure in one of
/// several grammars can be told apart.
#[derive(Error, Debug, Clone)]
#[error("{grammar}: {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    grammar: &'static str,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, grammar: &'static str) -> Self {
        Error {
            internal_error: error_impl,
            grammar,
        }
    }

    pub fn get_grammar(&self) -> &'static str {
        self.grammar
    }

    pub fn get_error_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidPattern { .. } => "InvalidPattern",
            ErrorImpl::PatternTooLarge { .. } => "PatternTooLarge",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            // The regex syntax message already points at the fault.
            ErrorImpl::InvalidPattern { .. } => ErrorTip::None,
            ErrorImpl::PatternTooLarge { .. } => ErrorTip::Suggestion(String::from(
                "Split large alternations into fewer, more general fragments and classify the matches instead",
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },
    #[error("compiled pattern exceeds the size limit of {limit} bytes")]
    PatternTooLarge { limit: usize },
}

impl ErrorImpl {
    /// Maps a regex compilation failure of the combined `pattern`.
    pub fn from_regex(error: regex::Error, pattern: &str) -> Self {
        match error {
            regex::Error::CompiledTooBig(limit) => ErrorImpl::PatternTooLarge { limit },
            regex::Error::Syntax(message) => ErrorImpl::InvalidPattern {
                pattern: pattern.to_string(),
                message,
            },
            other => ErrorImpl::InvalidPattern {
                pattern: pattern.to_string(),
                message: other.to_string(),
            },
        }
    }
}
