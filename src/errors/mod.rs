//! Error types and error handling for the lexer.
//!
//! This module defines the errors a tokenization pass can abort with:
//!
//! - Error structures carrying the offending line
//! - Specific error variants for indentation, numeric and strict-mode failures
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
