use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use super::tokens::DEFAULT_KEYWORDS;

/// Construction-time settings for a [`Lexer`](super::lexer::Lexer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexerConfig {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Bare words classified as `Keyword` instead of `Identifier`.
    pub keywords: HashSet<String>,
    /// Reject characters that match no lexeme rule instead of skipping them.
    pub strict: bool,
    /// Emit one `BlockOpen` per level when a line skips indentation levels.
    pub open_skipped_levels: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        LexerConfig {
            indent_width: 2,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            strict: false,
            open_skipped_levels: false,
        }
    }
}

impl LexerConfig {
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_open_skipped_levels(mut self, open_skipped_levels: bool) -> Self {
        self.open_skipped_levels = open_skipped_levels;
        self
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = LexerConfig::default();

        assert_eq!(config.indent_width, 2);
        assert!(!config.strict);
        assert!(!config.open_skipped_levels);
        assert!(config.is_keyword("state"));
        assert!(config.is_keyword("agents"));
        assert!(!config.is_keyword("tick"));
        assert!(!config.is_keyword("true"));
    }

    #[test]
    fn test_builder() {
        let config = LexerConfig::default()
            .with_indent_width(4)
            .with_keywords(["world"])
            .with_strict(true)
            .with_open_skipped_levels(true);

        assert_eq!(config.indent_width, 4);
        assert!(config.is_keyword("world"));
        assert!(!config.is_keyword("state"));
        assert!(config.strict);
        assert!(config.open_skipped_levels);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LexerConfig = serde_json::from_str(r#"{ "indent_width": 4 }"#).unwrap();

        assert_eq!(config.indent_width, 4);
        assert_eq!(config.keywords, LexerConfig::default().keywords);
        assert!(!config.strict);
    }

    #[test]
    fn test_json_keywords_replace_defaults() {
        let config: LexerConfig =
            serde_json::from_str(r#"{ "keywords": ["world", "tick"], "strict": true }"#).unwrap();

        assert!(config.is_keyword("tick"));
        assert!(!config.is_keyword("state"));
        assert!(config.strict);
    }

    #[test]
    fn test_from_missing_file() {
        let result = LexerConfig::from_file("does/not/exist.json");

        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
