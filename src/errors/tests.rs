//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::rc::Rc;

fn position(line: usize) -> Position {
    Position(line, Rc::new("test.siml".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::IndentationError { found: 3, width: 2 },
        position(2),
    );

    assert_eq!(error.get_error_name(), "IndentationError");
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "99999999999999999999".to_string(),
        },
        position(42),
    );

    assert_eq!(error.get_position().0, 42);
    assert_eq!(error.get_position().1.as_str(), "test.siml");
}

#[test]
fn test_error_display_includes_line() {
    let error = Error::new(
        ErrorImpl::IndentationError { found: 3, width: 2 },
        position(7),
    );

    assert_eq!(
        error.to_string(),
        "indentation of 3 spaces is not a multiple of 2 (line 7)"
    );
}

#[test]
fn test_structural_classification() {
    let indentation = Error::new(ErrorImpl::IndentationError { found: 1, width: 2 }, position(1));
    let number = Error::new(
        ErrorImpl::NumberParseError {
            token: "1".to_string(),
        },
        position(1),
    );
    let unrecognised = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(1),
    );
    let width = Error::new(ErrorImpl::InvalidIndentWidth { width: 0 }, position(1));

    assert!(indentation.is_structural());
    assert!(number.is_structural());
    assert!(!unrecognised.is_structural());
    assert!(!width.is_structural());
}

#[test]
fn test_indentation_tip() {
    let error = Error::new(
        ErrorImpl::IndentationError { found: 3, width: 2 },
        position(1),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(msg) => assert!(msg.contains("multiple of 2")),
        ErrorTip::None => panic!("Expected suggestion"),
    }
}

#[test]
fn test_number_parse_tip() {
    let error = Error::new(
        ErrorImpl::NumberParseError {
            token: "123abc".to_string(),
        },
        position(1),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(msg) => assert!(msg.contains("123abc")),
        ErrorTip::None => panic!("Expected suggestion"),
    }
}

#[test]
fn test_unrecognised_token_has_no_tip() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        position(1),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
    assert_eq!(error.get_tip().to_string(), "");
}

#[test]
fn test_error_kind_accessor() {
    let error = Error::new(ErrorImpl::InvalidIndentWidth { width: 0 }, position(1));

    assert_eq!(error.get_kind(), &ErrorImpl::InvalidIndentWidth { width: 0 });
}
