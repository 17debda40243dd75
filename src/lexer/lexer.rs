use std::{collections::VecDeque, fmt, iter::FusedIterator, rc::Rc};

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    tracer::{NullTracer, TraceLevel, Tracer},
    Position, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::{
    config::LexerConfig,
    tokens::{Token, TokenKind, TokenValue},
};

pub type RegexHandler = fn(&mut Lexer, &str) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

// Every pattern is anchored; the first one matching at the cursor wins, so
// longer lexemes must come before their prefixes.
lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new(r#"^(?:"[^"]*"|'[^']*')"#).unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new(r"^-?(?:[0-9]*\.[0-9]+|[0-9]+)").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new(r"^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::EqualEqual, "==") },
        RegexPattern { regex: Regex::new(r"^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEqual, "!=") },
        RegexPattern { regex: Regex::new(r"^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEqual, "<=") },
        RegexPattern { regex: Regex::new(r"^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEqual, ">=") },
        RegexPattern { regex: Regex::new(r"^\*\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Power, "**") },
        RegexPattern { regex: Regex::new(r"^&&").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&&") },
        RegexPattern { regex: Regex::new(r"^\|\|").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "||") },
        RegexPattern { regex: Regex::new(r"^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "=") },
        RegexPattern { regex: Regex::new(r"^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new(r"^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new(r"^\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new(r"^-").unwrap(), handler: dash_handler },
        RegexPattern { regex: Regex::new(r"^\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*") },
        RegexPattern { regex: Regex::new(r"^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new(r"^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%") },
        RegexPattern { regex: Regex::new(r"^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":") },
        RegexPattern { regex: Regex::new(r"^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new(r"^\.").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dot, ".") },
        RegexPattern { regex: Regex::new(r"^\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LParen, "(") },
        RegexPattern { regex: Regex::new(r"^\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RParen, ")") },
        RegexPattern { regex: Regex::new(r"^\[").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LBracket, "[") },
        RegexPattern { regex: Regex::new(r"^\]").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::RBracket, "]") },
    ];
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum LexerState {
    Scanning,
    Finished,
}

/// Pull-based tokenizer over a whole source text.
///
/// Tokens are computed a line at a time as the consumer asks for them. The
/// first error ends the stream.
pub struct Lexer {
    config: LexerConfig,
    tracer: Box<dyn Tracer>,
    source: Rc<str>,
    file: Rc<String>,
    offset: usize,
    line: usize,
    column: usize,
    indent_stack: Vec<usize>,
    pending: VecDeque<Token>,
    content_start: usize,
    produced: usize,
    state: LexerState,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>, config: LexerConfig) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            config,
            tracer: Box::new(NullTracer),
            source: Rc::from(source),
            file: file_name,
            offset: 0,
            line: 0,
            column: 0,
            indent_stack: vec![0],
            pending: VecDeque::new(),
            content_start: 0,
            produced: 0,
            state: LexerState::Scanning,
        }
    }

    pub fn with_tracer(mut self, tracer: Box<dyn Tracer>) -> Lexer {
        self.tracer = tracer;
        self
    }

    pub fn push(&mut self, token: Token) {
        self.pending.push_back(token);
    }

    fn current_position(&self) -> Position {
        Position(self.line, Rc::clone(&self.file))
    }

    fn top(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    fn notify(&self, level: TraceLevel, message: fmt::Arguments<'_>) {
        if self.tracer.enabled() {
            self.tracer.notify(level, message);
        }
    }

    /// Byte range of the next physical line, without its terminator.
    fn next_line(&mut self) -> Option<(usize, usize)> {
        if self.offset >= self.source.len() {
            return None;
        }

        let start = self.offset;
        let mut end = match self.source[start..].find('\n') {
            Some(newline) => {
                self.offset = start + newline + 1;
                start + newline
            }
            None => {
                self.offset = self.source.len();
                self.source.len()
            }
        };

        if self.source[start..end].ends_with('\r') {
            end -= 1;
        }

        Some((start, end))
    }

    fn lex_line(&mut self, raw: &str) -> Result<(), Error> {
        self.line += 1;

        let content = strip_comment(raw);
        if content.trim().is_empty() {
            return Ok(());
        }

        let raw_indent = content.len() - content.trim_start_matches(' ').len();
        self.column = raw_indent;
        self.indent(raw_indent)?;
        self.content_start = self.pending.len();

        let mut pos = raw_indent;
        while pos < content.len() {
            let remainder = &content[pos..];
            let mut matched = false;

            for pattern in PATTERNS.iter() {
                if let Some(found) = pattern.regex.find(remainder) {
                    (pattern.handler)(self, found.as_str())?;
                    pos += found.end();
                    matched = true;
                    break;
                }
            }

            if !matched {
                let skipped = remainder.chars().next().unwrap_or(' ');
                if self.config.strict {
                    return Err(Error::new(
                        ErrorImpl::UnrecognisedToken {
                            token: skipped.to_string(),
                        },
                        self.current_position(),
                    ));
                }

                self.notify(
                    TraceLevel::Warn,
                    format_args!("Skipping unrecognised character {:?} on line {}", skipped, self.line),
                );
                pos += skipped.len_utf8();
            }
        }

        Ok(())
    }

    fn indent(&mut self, raw_indent: usize) -> Result<(), Error> {
        let width = self.config.indent_width;
        if width == 0 {
            return Err(Error::new(ErrorImpl::InvalidIndentWidth { width }, self.current_position()));
        }

        if raw_indent % width != 0 {
            return Err(Error::new(
                ErrorImpl::IndentationError {
                    found: raw_indent,
                    width,
                },
                self.current_position(),
            ));
        }

        let level = raw_indent / width;
        let top = self.top();

        // Only levels on the stack are closed. A dedent to a level that was
        // never opened stops at the next lower open level, and the following
        // deeper line opens a fresh block.

        if level > top {
            if self.config.open_skipped_levels {
                for opened in (top + 1)..=level {
                    self.open_level(opened, opened * width);
                }
            } else {
                self.open_level(level, raw_indent);
            }
        } else if level < top {
            while let Some(&open) = self.indent_stack.last() {
                if open <= level {
                    break;
                }
                self.close_level(self.line);
            }
        }

        Ok(())
    }

    fn open_level(&mut self, level: usize, column: usize) {
        self.indent_stack.push(level);
        self.notify(
            TraceLevel::Debug,
            format_args!("Opened indentation level {} on line {}", level, self.line),
        );
        self.push(MK_TOKEN!(TokenKind::BlockOpen, TokenValue::None, self.line, column));
    }

    fn close_level(&mut self, line: usize) {
        let closed = self.indent_stack.pop().unwrap_or(0);
        let column = self.top() * self.config.indent_width;
        self.notify(
            TraceLevel::Debug,
            format_args!("Closed indentation level {} on line {}", closed, line),
        );
        self.push(MK_TOKEN!(TokenKind::BlockClose, TokenValue::None, line, column));
    }

    fn flush(&mut self) {
        let line = self.line + 1;
        while self.indent_stack.len() > 1 {
            self.close_level(line);
        }
    }

    fn is_line_start(&self) -> bool {
        self.pending.len() == self.content_start
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                self.produced += 1;
                self.notify(
                    TraceLevel::Debug,
                    format_args!("Produced {} at {}:{}", token, token.line, token.column),
                );
                return Some(Ok(token));
            }

            if self.state == LexerState::Finished {
                return None;
            }

            if self.line == 0 && self.offset == 0 {
                self.notify(TraceLevel::Info, format_args!("Starting to tokenize"));
                self.notify(
                    TraceLevel::Debug,
                    format_args!("Source code length: {}", self.source.len()),
                );
            }

            match self.next_line() {
                Some((start, end)) => {
                    let source = Rc::clone(&self.source);
                    if let Err(error) = self.lex_line(&source[start..end]) {
                        self.state = LexerState::Finished;
                        self.pending.clear();
                        self.notify(TraceLevel::Failure, format_args!("{}", error));
                        return Some(Err(error));
                    }
                }
                None => {
                    self.flush();
                    self.state = LexerState::Finished;
                    self.notify(
                        TraceLevel::Info,
                        format_args!(
                            "Finished tokenizing, {} tokens",
                            self.produced + self.pending.len()
                        ),
                    );
                }
            }
        }
    }
}

impl FusedIterator for Lexer {}

/// Cuts the line at the first `#` outside a quoted span and drops trailing
/// whitespace. Quotes never span lines.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;

    for (index, ch) in line.char_indices() {
        match (quote, ch) {
            (None, '#') => return line[..index].trim_end(),
            (None, '"') | (None, '\'') => quote = Some(ch),
            (Some(open), _) if open == ch => quote = None,
            _ => {}
        }
    }

    line.trim_end()
}

fn skip_handler(_lexer: &mut Lexer, _lexeme: &str) -> Result<(), Error> {
    Ok(())
}

fn string_handler(lexer: &mut Lexer, lexeme: &str) -> Result<(), Error> {
    let string_literal = &lexeme[1..lexeme.len() - 1];

    lexer.push(MK_TOKEN!(
        TokenKind::String,
        TokenValue::String(string_literal.to_string()),
        lexer.line,
        lexer.column
    ));
    Ok(())
}

fn number_handler(lexer: &mut Lexer, lexeme: &str) -> Result<(), Error> {
    let value = if lexeme.contains('.') {
        lexeme.parse::<f64>().ok().map(TokenValue::Float)
    } else {
        lexeme.parse::<i64>().ok().map(TokenValue::Integer)
    };

    let value = value.ok_or_else(|| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: lexeme.to_string(),
            },
            lexer.current_position(),
        )
    })?;

    lexer.push(MK_TOKEN!(TokenKind::Number, value, lexer.line, lexer.column));
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer, lexeme: &str) -> Result<(), Error> {
    let (kind, value) = if lexer.config.is_keyword(lexeme) {
        (TokenKind::Keyword, TokenValue::String(lexeme.to_string()))
    } else {
        match lexeme {
            "true" => (TokenKind::Boolean, TokenValue::Boolean(true)),
            "false" => (TokenKind::Boolean, TokenValue::Boolean(false)),
            "null" => (TokenKind::Null, TokenValue::None),
            "and" => (TokenKind::And, TokenValue::String(lexeme.to_string())),
            "or" => (TokenKind::Or, TokenValue::String(lexeme.to_string())),
            _ => (TokenKind::Identifier, TokenValue::String(lexeme.to_string())),
        }
    };

    lexer.push(MK_TOKEN!(kind, value, lexer.line, lexer.column));
    Ok(())
}

// A dash opening a line's content is a list item marker, anywhere else it is
// subtraction.
fn dash_handler(lexer: &mut Lexer, lexeme: &str) -> Result<(), Error> {
    let kind = if lexer.is_line_start() {
        TokenKind::Dash
    } else {
        TokenKind::Minus
    };

    lexer.push(MK_TOKEN!(
        kind,
        TokenValue::String(lexeme.to_string()),
        lexer.line,
        lexer.column
    ));
    Ok(())
}

pub fn tokenize(source: String, file: Option<String>, config: LexerConfig) -> Result<Vec<Token>, Error> {
    Lexer::new(source, file, config).collect()
}
