//! Lexical analysis for SIML source text.
//!
//! This module converts simulation descriptions into a stream of tokens for a
//! parser to consume. It handles:
//!
//! - Indentation tracking, synthesizing `BlockOpen`/`BlockClose` tokens
//! - `#` comments that respect quoted strings
//! - Tokenization of each line using ordered regex patterns
//! - Recognition of keywords, identifiers, literals and operators

pub mod config;
pub mod lexer;
pub mod tokens;
