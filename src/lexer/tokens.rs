use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

lazy_static! {
    pub static ref DEFAULT_KEYWORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("simulation");
        set.insert("module");
        set.insert("state");
        set.insert("templates");
        set.insert("template");
        set.insert("rules");
        set.insert("rule");
        set.insert("actions");
        set.insert("action");
        set.insert("agents");
        set.insert("agent");
        set.insert("generate");
        set.insert("if");
        set.insert("else");
        set.insert("for");
        set.insert("each");
        set.insert("in");
        set.insert("not");
        set.insert("config");
        set.insert("context");
        set.insert("llm");
        set.insert("can_call");
        set.insert("set");
        set.insert("call");
        set
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Structural
    BlockOpen,
    BlockClose,

    Colon,
    Dash,
    Comma,
    Dot,
    LParen,
    RParen,
    LBracket,
    RBracket,

    Equals,     // =
    EqualEqual, // ==
    NotEqual,   // !=
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Power, // **
    And,
    Or,

    Number,
    String,
    Boolean,
    Null,

    Identifier,
    Keyword,
}

impl TokenKind {
    pub fn is_structural(&self) -> bool {
        matches!(self, TokenKind::BlockOpen | TokenKind::BlockClose)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The literal payload of a token, already coerced to its semantic type.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    None,
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenValue::None => write!(f, "null"),
            TokenValue::Integer(value) => write!(f, "{}", value),
            TokenValue::Float(value) => write!(f, "{:?}", value),
            TokenValue::String(value) => write!(f, "{:?}", value),
            TokenValue::Boolean(value) => write!(f, "{}", value),
        }
    }
}

/// One lexical unit. `column` is the indentation width of the line the token
/// was found on, not a per-character offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, line: usize, column: usize) -> Self {
        Token {
            kind,
            value,
            line,
            column,
        }
    }

    fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_one_of_many(&[
            TokenKind::Number,
            TokenKind::String,
            TokenKind::Boolean,
            TokenKind::Identifier,
            TokenKind::Keyword,
        ]) {
            write!(f, "{}({})", self.kind, self.value)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}
