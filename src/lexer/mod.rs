//! Lexical analysis module.
//!
//! A [`lexer::Grammar`] declares the pattern fragments of a language; a
//! [`lexer::Lexer`] combines them into one regex and turns an input string
//! into an indexable token sequence in a single eager pass:
//!
//! - Catchable fragments produce tokens, classified by the grammar
//! - Non-catchable fragments (whitespace, comments) are consumed and dropped
//! - Token positions are character offsets into the input
//! - The sequence always ends with an END_OF_STRING sentinel

pub mod lexer;
pub mod tokens;
