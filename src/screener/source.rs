use std::borrow::Cow;

use crate::lexer::{lexer::Grammar, lexer::Lexer, tokens::Token};

/// Index-addressable tokens read by a screener.
///
/// `fetch_token` must be a pure function of `index` and the source's
/// immutable state: fetching never changes what later fetches return.
/// Implementations that reinterpret tokens return `Cow::Owned` values and
/// leave the underlying tokens untouched.
pub trait TokenSource {
    fn fetch_token(&self, index: usize) -> Option<Cow<'_, Token>>;
}

impl<G: Grammar> TokenSource for Lexer<G> {
    fn fetch_token(&self, index: usize) -> Option<Cow<'_, Token>> {
        self.token_at(index).map(Cow::Borrowed)
    }
}

impl TokenSource for [Token] {
    fn fetch_token(&self, index: usize) -> Option<Cow<'_, Token>> {
        self.get(index).map(Cow::Borrowed)
    }
}

impl TokenSource for Vec<Token> {
    fn fetch_token(&self, index: usize) -> Option<Cow<'_, Token>> {
        self.as_slice().fetch_token(index)
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn fetch_token(&self, index: usize) -> Option<Cow<'_, Token>> {
        (**self).fetch_token(index)
    }
}
