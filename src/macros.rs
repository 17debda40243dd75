//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for simple tokens

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, TokenValue::Integer(42), line, column);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $line:expr, $column:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $line,
            column: $column,
        }
    };
}

/// Creates a default lexer handler for punctuation and operator patterns.
///
/// The generated handler pushes a token of the given kind whose value is the
/// raw lexeme, positioned on the line currently being scanned.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("^\\+").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _lexeme: &str| {
            lexer.push(MK_TOKEN!(
                $kind,
                TokenValue::String(String::from($value)),
                lexer.line,
                lexer.column
            ));
            Ok(())
        }
    };
}
