#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;
pub mod tracer;

extern crate regex;

/// A source line (1-based) and the name of the file it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct Position(pub usize, pub Rc<String>);

/// Returns the text of a 1-based line, or `None` past the end of the source.
pub fn get_line(source: &str, line: usize) -> Option<&str> {
    if line == 0 {
        return None;
    }

    source
        .split('\n')
        .nth(line - 1)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}

/// Renders an error as a caret diagram under the offending line.
pub fn format_error(error: &Error, source: &str) -> String {
    /*
        error: message
        -> world.siml
           |
         2 |    - tick: 0
           |   ^
    */

    let position = error.get_position();
    let line_string = position.0.to_string();
    let padding = line_string.len() + 2;

    let header = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}", error.get_error_name())
    } else {
        format!("Error: {} ({})", error.get_error_name(), error.get_tip())
    };

    let line_text = get_line(source, position.0).unwrap_or("");
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    let arrows = removed_whitespace.min(line_text.len()) + 1;

    format!(
        "{}\n-> {}\n{:>padding$}\n{} | {}\n{:>padding$} {:->arrows$}\n",
        header,
        position.1,
        "|",
        line_string,
        line_text_removed.trim_end(),
        "|",
        "^"
    )
}

pub fn display_error(error: &Error, source: &str) {
    eprint!("{}", format_error(error, source));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::errors::ErrorImpl;

    #[test]
    fn test_get_line() {
        let source = "state:\r\n  - tick: 0\n";

        assert_eq!(get_line(source, 1), Some("state:"));
        assert_eq!(get_line(source, 2), Some("  - tick: 0"));
        assert_eq!(get_line(source, 0), None);
        assert_eq!(get_line(source, 4), None);
    }

    #[test]
    fn test_format_error() {
        let source = "state:\n   tick: 0\n";
        let error = Error::new(
            ErrorImpl::IndentationError { found: 3, width: 2 },
            Position(2, Rc::new(String::from("world.siml"))),
        );

        let rendered = format_error(&error, source);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines[0],
            "Error: IndentationError (Indented by 3 spaces, expected a multiple of 2)"
        );
        assert_eq!(lines[1], "-> world.siml");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "2 | tick: 0");
        assert_eq!(lines[4], "  | ---^");
    }

    #[test]
    fn test_format_error_without_tip() {
        let source = "state:\n  x: @\n";
        let error = Error::new(
            ErrorImpl::UnrecognisedToken {
                token: String::from("@"),
            },
            Position(2, Rc::new(String::from("world.siml"))),
        );

        assert_eq!(
            format_error(&error, source),
            "Error: UnrecognisedToken\n-> world.siml\n  |\n2 | x: @\n  | --^\n"
        );
    }

    #[test]
    fn test_remove_starting_whitespace() {
        assert_eq!(
            remove_starting_whitespace("    agent: x"),
            (String::from("agent: x"), 4)
        );
    }
}
