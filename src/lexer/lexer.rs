use std::{
    any::{type_name, TypeId},
    borrow::Cow,
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use tracing::{debug, error, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    MK_END_TOKEN, MK_TOKEN,
};

use super::tokens::{Token, TokenType};

lazy_static! {
    /// Compiled combined patterns, one per concrete grammar type.
    static ref PATTERN_CACHE: Mutex<HashMap<TypeId, CompiledPattern>> = Mutex::new(HashMap::new());
}

/// Prefix of the named group wrapping each catchable fragment.
const CATCH_GROUP: &str = "__catch";

/// Regex flags applied to the combined pattern of a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternModifiers {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
}

impl Default for PatternModifiers {
    fn default() -> Self {
        PatternModifiers {
            case_insensitive: true,
            multi_line: false,
            dot_matches_new_line: false,
            ignore_whitespace: false,
        }
    }
}

impl PatternModifiers {
    /// No flags at all, matching is case-sensitive.
    pub fn none() -> Self {
        PatternModifiers {
            case_insensitive: false,
            ..Self::default()
        }
    }

    pub fn with_case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    pub fn with_multi_line(mut self, yes: bool) -> Self {
        self.multi_line = yes;
        self
    }

    pub fn with_dot_matches_new_line(mut self, yes: bool) -> Self {
        self.dot_matches_new_line = yes;
        self
    }

    pub fn with_ignore_whitespace(mut self, yes: bool) -> Self {
        self.ignore_whitespace = yes;
        self
    }

    fn apply(&self, builder: &mut RegexBuilder) {
        builder
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace);
    }
}

/// The lexical rules of one concrete language.
///
/// Pattern fragments and modifiers must be fixed for the implementing type:
/// the combined pattern is compiled on the first scan and cached by type.
pub trait Grammar: 'static {
    /// Fragments whose matches become tokens, tried in order.
    fn catchable_patterns(&self) -> &[&str];

    /// Fragments whose matches are consumed and dropped (whitespace, comments).
    fn non_catchable_patterns(&self) -> &[&str];

    /// Returns the kind of a matched fragment and the value to store in the
    /// token. The token position always comes from the original match.
    fn classify<'a>(&self, value: &'a str) -> (TokenType, Cow<'a, str>);

    fn pattern_modifiers(&self) -> PatternModifiers {
        PatternModifiers::default()
    }

    /// Kind given to input matched by neither pattern set.
    ///
    /// `None` drops such input silently.
    fn unrecognized_kind(&self) -> Option<TokenType> {
        None
    }
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    regex: Regex,
    /// Capture group index of every catchable fragment.
    catch_groups: Vec<usize>,
    /// Each fragment on its own, in alternation order.
    fragments: Vec<Fragment>,
}

#[derive(Debug, Clone)]
struct Fragment {
    regex: Regex,
    catchable: bool,
}

impl CompiledPattern {
    fn is_catchable(&self, captures: &regex::Captures<'_>) -> bool {
        self.catch_groups
            .iter()
            .any(|&group| captures.get(group).is_some())
    }

    /// Finds the first fragment, in order, with a non-empty match starting
    /// exactly at `start`. Returns the match end and whether it is catchable.
    fn non_empty_at(&self, input: &str, start: usize) -> Option<(usize, bool)> {
        self.fragments.iter().find_map(|fragment| {
            fragment
                .regex
                .find_at(input, start)
                .filter(|found| found.start() == start && !found.is_empty())
                .map(|found| (found.end(), fragment.catchable))
        })
    }
}

fn combined_pattern<G: Grammar>(grammar: &G) -> String {
    let catchable = grammar
        .catchable_patterns()
        .iter()
        .enumerate()
        .map(|(index, fragment)| format!("(?P<{CATCH_GROUP}{index}>{fragment})"));
    let non_catchable = grammar
        .non_catchable_patterns()
        .iter()
        .map(|fragment| format!("(?:{fragment})"));

    catchable.chain(non_catchable).collect::<Vec<_>>().join("|")
}

fn compiled_pattern<G: Grammar>(grammar: &G) -> Result<CompiledPattern, Error> {
    // The lock is held across compilation so each grammar compiles once.
    let mut cache = PATTERN_CACHE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    if let Some(compiled) = cache.get(&TypeId::of::<G>()) {
        trace!("pattern cache hit");
        return Ok(compiled.clone());
    }

    let modifiers = grammar.pattern_modifiers();
    let build = |pattern: &str| {
        let mut builder = RegexBuilder::new(pattern);
        modifiers.apply(&mut builder);
        builder.build().map_err(|err| {
            let err = Error::new(ErrorImpl::from_regex(err, pattern), type_name::<G>());
            error!(%err, "grammar pattern failed to compile");
            err
        })
    };

    let regex = build(&combined_pattern(grammar))?;

    let catchable = grammar.catchable_patterns().iter().map(|f| (f, true));
    let non_catchable = grammar.non_catchable_patterns().iter().map(|f| (f, false));
    let fragments = catchable
        .chain(non_catchable)
        .map(|(fragment, catchable)| {
            build(&format!("(?:{fragment})")).map(|regex| Fragment { regex, catchable })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let catch_groups = regex
        .capture_names()
        .enumerate()
        .filter(|(_, name)| name.is_some_and(|name| name.starts_with(CATCH_GROUP)))
        .map(|(index, _)| index)
        .collect::<Vec<_>>();

    debug!(
        catchable = catch_groups.len(),
        groups = regex.captures_len(),
        "compiled grammar pattern"
    );

    let compiled = CompiledPattern {
        regex,
        catch_groups,
        fragments,
    };
    cache.insert(TypeId::of::<G>(), compiled.clone());
    Ok(compiled)
}

/// Converts increasing byte offsets of one input into character offsets.
struct CharOffsets<'a> {
    input: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(input: &'a str) -> Self {
        CharOffsets {
            input,
            byte: 0,
            chars: 0,
        }
    }

    /// `byte` must not be lower than the previous call's.
    fn at(&mut self, byte: usize) -> usize {
        self.chars += self.input[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}

/// The token sequence of one input, scanned eagerly on construction.
#[derive(Debug, Clone)]
pub struct Lexer<G: Grammar> {
    grammar: G,
    input: String,
    tokens: Vec<Token>,
    pos: usize,
}

impl<G: Grammar> Lexer<G> {
    /// Scans `input` with `grammar`.
    ///
    /// Fails only when the grammar's fragments do not form a valid pattern.
    #[tracing::instrument(level = "debug", skip_all, fields(grammar = type_name::<G>(), len = input.len()))]
    pub fn new(grammar: G, input: String) -> Result<Self, Error> {
        let pattern = compiled_pattern(&grammar)?;
        let tokens = scan(&grammar, &pattern, &input);

        debug!(tokens = tokens.len(), "scan complete");

        Ok(Lexer {
            grammar,
            input,
            tokens,
            pos: 0,
        })
    }

    pub fn reset(&mut self) {
        self.pos = 0;
    }

    pub fn reset_position(&mut self, position: usize) {
        self.pos = position;
    }

    /// Returns the token under the lexer's own cursor.
    pub fn get_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Advances the cursor, returning whether a token exists at the new position.
    pub fn move_next(&mut self) -> bool {
        self.pos += 1;
        self.pos < self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn token_at(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Number of tokens, the END_OF_STRING sentinel included.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn grammar(&self) -> &G {
        &self.grammar
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

fn scan<G: Grammar>(grammar: &G, pattern: &CompiledPattern, input: &str) -> Vec<Token> {
    let mut tokens = vec![];
    let mut offsets = CharOffsets::new(input);
    let mut last_end = 0;
    let mut at = 0;

    while at <= input.len() {
        let Some(captures) = pattern.regex.captures_at(input, at) else {
            break;
        };
        let Some(matched) = captures.get(0) else {
            break;
        };
        let start = matched.start();

        // Empty matches never become tokens: retry the fragments for a
        // non-empty match at the same offset, else step one character.
        let (end, catchable) = if matched.is_empty() {
            match pattern.non_empty_at(input, start) {
                Some(found) => found,
                None => {
                    at = next_char_boundary(input, start);
                    continue;
                }
            }
        } else {
            (matched.end(), pattern.is_catchable(&captures))
        };

        if start > last_end {
            let position = offsets.at(last_end);
            unmatched(grammar, &input[last_end..start], position, &mut tokens);
        }

        let position = offsets.at(start);
        last_end = end;
        at = end;

        if !catchable {
            continue;
        }

        let (kind, value) = grammar.classify(&input[start..end]);
        tokens.push(MK_TOKEN!(kind, value.into_owned(), position));
    }

    if last_end < input.len() {
        let position = offsets.at(last_end);
        unmatched(grammar, &input[last_end..], position, &mut tokens);
    }

    tokens.push(MK_END_TOKEN!(input));
    tokens
}

/// Byte offset right after the character at `at`, past the end once the
/// input is exhausted.
fn next_char_boundary(input: &str, at: usize) -> usize {
    input[at..]
        .chars()
        .next()
        .map_or(input.len() + 1, |c| at + c.len_utf8())
}

fn unmatched<G: Grammar>(grammar: &G, text: &str, position: usize, tokens: &mut Vec<Token>) {
    match grammar.unrecognized_kind() {
        Some(kind) => tokens.push(MK_TOKEN!(kind, text.to_string(), position)),
        None => trace!(position, text, "dropping unmatched input"),
    }
}

/// Scans `input` and returns its tokens, END_OF_STRING included.
pub fn tokenize<G: Grammar>(grammar: G, input: String) -> Result<Vec<Token>, Error> {
    Lexer::new(grammar, input).map(Lexer::into_tokens)
}

#[cfg(test)]
pub(crate) fn is_cached<G: Grammar>() -> bool {
    PATTERN_CACHE
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(&TypeId::of::<G>())
}
