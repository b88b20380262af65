use std::borrow::Cow;

use tracing::trace;

use crate::lexer::{
    lexer::{Grammar, Lexer},
    tokens::{Token, TokenType},
};

use super::source::TokenSource;

/// Peekable cursor over a token source.
///
/// `position` is the committed index of the current token, `peek` the
/// forward offset from it used for speculative look-ahead. Running past
/// the last token is signalled by absence, there is no separate done flag.
#[derive(Debug, Clone)]
pub struct Screener<S> {
    /// The original input, kept for prefix queries
    input: String,
    /// Tokens, read through `fetch_token`
    source: S,
    /// Committed index into the token source
    position: usize,
    /// Look-ahead offset from `position`, never below 1
    peek: usize,
}

impl<S: TokenSource> Screener<S> {
    pub fn new(input: impl Into<String>, source: S) -> Self {
        Screener {
            input: input.into(),
            source,
            position: 0,
            peek: 1,
        }
    }

    pub fn reset(&mut self) {
        self.position = 0;
        self.peek = 1;
    }

    pub fn reset_peek(&mut self) {
        self.peek = 1;
    }

    /// Moves the committed position without touching `peek`.
    pub fn reset_position(&mut self, position: usize) {
        self.position = position;
    }

    /// Returns the first `position` characters of the input.
    pub fn get_input_until_position(&self, position: usize) -> &str {
        match self.input.char_indices().nth(position) {
            Some((end, _)) => &self.input[..end],
            None => &self.input,
        }
    }

    pub fn get_token(&self) -> Option<Cow<'_, Token>> {
        self.source.fetch_token(self.position)
    }

    /// Returns the token `peek` places ahead without moving either cursor.
    pub fn get_next_token(&self) -> Option<Cow<'_, Token>> {
        self.source.fetch_token(self.position + self.peek)
    }

    /// Commits to the next token, returning whether one exists.
    pub fn move_next(&mut self) -> bool {
        self.peek = 1;
        self.position += 1;
        self.source.fetch_token(self.position).is_some()
    }

    /// Returns the look-ahead token and steps `peek` past it.
    ///
    /// At the end `peek` stays where it is and `None` is returned.
    pub fn peek(&mut self) -> Option<Cow<'_, Token>> {
        let token = self.source.fetch_token(self.position + self.peek)?;
        self.peek += 1;
        Some(token)
    }

    pub fn is_token(&self, kind: TokenType) -> bool {
        self.get_token().is_some_and(|token| token.is_a(kind))
    }

    pub fn is_token_any(&self, kinds: &[TokenType]) -> bool {
        self.get_token()
            .is_some_and(|token| token.is_one_of_many(kinds))
    }

    pub fn is_next_token(&self, kind: TokenType) -> bool {
        self.get_next_token().is_some_and(|token| token.is_a(kind))
    }

    pub fn is_next_token_any(&self, kinds: &[TokenType]) -> bool {
        self.get_next_token()
            .is_some_and(|token| token.is_one_of_many(kinds))
    }

    /// Advances until the current token is of `kind`.
    ///
    /// Returns false when the tokens ran out first.
    pub fn skip_until(&mut self, kind: TokenType) -> bool {
        while let Some(current) = self.current_kind() {
            if current == kind {
                trace!(position = self.position, kind, "skip_until stopped on match");
                return true;
            }
            self.move_next();
        }

        trace!(position = self.position, kind, "skip_until ran off the end");
        false
    }

    /// Advances while the current token is of `kind`.
    ///
    /// Returns false when the tokens ran out first.
    pub fn skip_while(&mut self, kind: TokenType) -> bool {
        while let Some(current) = self.current_kind() {
            if current != kind {
                trace!(position = self.position, kind, "skip_while stopped");
                return true;
            }
            self.move_next();
        }

        trace!(position = self.position, kind, "skip_while ran off the end");
        false
    }

    /// Peeks until a token of one of `kinds` comes up, or the end.
    pub fn peek_until_any(&mut self, kinds: &[TokenType]) -> Option<Cow<'_, Token>> {
        let source = &self.source;
        loop {
            let token = source.fetch_token(self.position + self.peek)?;
            self.peek += 1;
            if token.is_one_of_many(kinds) {
                return Some(token);
            }
        }
    }

    /// Peeks past tokens of `kinds`, returning the first one outside the set.
    pub fn peek_while_any(&mut self, kinds: &[TokenType]) -> Option<Cow<'_, Token>> {
        let source = &self.source;
        loop {
            let token = source.fetch_token(self.position + self.peek)?;
            self.peek += 1;
            if !token.is_one_of_many(kinds) {
                return Some(token);
            }
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn peek_offset(&self) -> usize {
        self.peek
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    fn current_kind(&self) -> Option<TokenType> {
        self.get_token().map(|token| token.kind)
    }
}

impl<G: Grammar> From<Lexer<G>> for Screener<Lexer<G>> {
    fn from(lexer: Lexer<G>) -> Self {
        Screener::new(lexer.input().to_string(), lexer)
    }
}
