//! Look-ahead cursor for top-down parsers.
//!
//! A [`screener::Screener`] sits between a token sequence and a parser. It
//! keeps a committed `position` and an uncommitted `peek` offset, so the
//! parser can look ahead, skip, and backtrack without re-scanning:
//!
//! - `get_token`/`move_next` read and advance the committed position
//! - `peek`/`get_next_token` look ahead without committing
//! - `skip_*` and `peek_*` combinators loop over either cursor
//!
//! Tokens are read through [`source::TokenSource::fetch_token`], which a
//! concrete screener can implement to merge or reinterpret tokens.

pub mod screener;
pub mod source;
