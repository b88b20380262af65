//! Error types for the lexer.
//!
//! The only failure this crate reports is a configuration error: the
//! pattern fragments of a grammar do not compile into one valid regex.
//! Everything else (reads past the end, unmatched input) is modelled as
//! absence rather than as an error.

pub mod errors;
