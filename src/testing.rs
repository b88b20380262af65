//! Grammars shared by the unit tests.

use std::{borrow::Cow, collections::HashMap};

use lazy_static::lazy_static;

use crate::lexer::{
    lexer::{Grammar, PatternModifiers},
    tokens::TokenType,
};

pub const NUMBER: TokenType = 1;
pub const IDENTIFIER: TokenType = 2;
pub const STRING: TokenType = 3;
pub const PLUS: TokenType = 4;
pub const DASH: TokenType = 5;
pub const STAR: TokenType = 6;
pub const SLASH: TokenType = 7;
pub const OPEN_PAREN: TokenType = 8;
pub const CLOSE_PAREN: TokenType = 9;
pub const ASSIGNMENT: TokenType = 10;
pub const COMMA: TokenType = 11;
pub const LET: TokenType = 12;
pub const PRINT: TokenType = 13;
pub const UNKNOWN: TokenType = 99;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenType> = {
        let mut map = HashMap::new();
        map.insert("LET", LET);
        map.insert("PRINT", PRINT);
        map
    };
    static ref OPERATOR_LOOKUP: HashMap<&'static str, TokenType> = {
        let mut map = HashMap::new();
        map.insert("+", PLUS);
        map.insert("-", DASH);
        map.insert("*", STAR);
        map.insert("/", SLASH);
        map.insert("(", OPEN_PAREN);
        map.insert(")", CLOSE_PAREN);
        map.insert("=", ASSIGNMENT);
        map.insert(",", COMMA);
        map
    };
}

const CALCULATOR_CATCHABLE: &[&str] = &[
    r"[a-z_][a-z0-9_]*",
    r"[0-9]+(?:\.[0-9]+)?",
    r"'(?:[^']|'')*'",
    r"[-+*/()=,]",
];

const CALCULATOR_NON_CATCHABLE: &[&str] = &[r"\s+", r"#[^\n]*"];

/// A small calculator language: `let x = (1 + 2) * 3 # comment`.
#[derive(Debug, Clone, Copy)]
pub struct Calculator;

impl Grammar for Calculator {
    fn catchable_patterns(&self) -> &[&str] {
        CALCULATOR_CATCHABLE
    }

    fn non_catchable_patterns(&self) -> &[&str] {
        CALCULATOR_NON_CATCHABLE
    }

    fn classify<'a>(&self, value: &'a str) -> (TokenType, Cow<'a, str>) {
        let first = value.chars().next().unwrap_or_default();

        if first.is_ascii_digit() {
            return (NUMBER, Cow::Borrowed(value));
        }

        if first == '\'' {
            let inner = &value[1..value.len() - 1];
            return (STRING, Cow::Owned(inner.replace("''", "'")));
        }

        if let Some(kind) = OPERATOR_LOOKUP.get(value) {
            return (*kind, Cow::Borrowed(value));
        }

        let upper = value.to_ascii_uppercase();
        match RESERVED_LOOKUP.get(upper.as_str()) {
            Some(kind) => (*kind, Cow::Owned(upper)),
            None => (IDENTIFIER, Cow::Borrowed(value)),
        }
    }
}

/// Same rules as [`Calculator`], but unmatched input becomes `UNKNOWN` tokens.
#[derive(Debug, Clone, Copy)]
pub struct StrictCalculator;

impl Grammar for StrictCalculator {
    fn catchable_patterns(&self) -> &[&str] {
        CALCULATOR_CATCHABLE
    }

    fn non_catchable_patterns(&self) -> &[&str] {
        CALCULATOR_NON_CATCHABLE
    }

    fn classify<'a>(&self, value: &'a str) -> (TokenType, Cow<'a, str>) {
        Calculator.classify(value)
    }

    fn unrecognized_kind(&self) -> Option<TokenType> {
        Some(UNKNOWN)
    }
}

/// Lower-case words only, matched case-sensitively.
#[derive(Debug, Clone, Copy)]
pub struct LowerWords;

impl Grammar for LowerWords {
    fn catchable_patterns(&self) -> &[&str] {
        &[r"[a-z]+"]
    }

    fn non_catchable_patterns(&self) -> &[&str] {
        &[r"\s+"]
    }

    fn classify<'a>(&self, value: &'a str) -> (TokenType, Cow<'a, str>) {
        (IDENTIFIER, Cow::Borrowed(value))
    }

    fn pattern_modifiers(&self) -> PatternModifiers {
        PatternModifiers::none()
    }
}
