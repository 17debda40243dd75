use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A fatal tokenization failure, tied to the line it was raised on.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} (line {})", .position.0)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_line(&self) -> usize {
        self.position.0
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Structural errors come from the indentation and numeric rules; the
    /// remaining variants only appear with a misconfigured or strict lexer.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::IndentationError { .. } | ErrorImpl::NumberParseError { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::IndentationError { .. } => "IndentationError",
            ErrorImpl::InvalidIndentWidth { .. } => "InvalidIndentWidth",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::IndentationError { found, width } => ErrorTip::Suggestion(format!(
                "Indented by {} spaces, expected a multiple of {}",
                found, width
            )),
            ErrorImpl::InvalidIndentWidth { .. } => {
                ErrorTip::Suggestion(String::from("Indent width must be at least one space"))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
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

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("indentation of {found} spaces is not a multiple of {width}")]
    IndentationError { found: usize, width: usize },
    #[error("invalid indent width: {width}")]
    InvalidIndentWidth { width: usize },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
}
