//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_END_TOKEN!` - Creates the END_OF_STRING sentinel for an input

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenType
/// * `$value` - The token's string value
/// * `$position` - Character offset of the token in the input
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(IDENT, "users".to_string(), 14);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $position:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            position: $position,
        }
    };
}

/// Creates the END_OF_STRING sentinel for an input.
///
/// The position is the character count of `$input`, not its byte length.
#[macro_export]
macro_rules! MK_END_TOKEN {
    ($input:expr) => {
        $crate::MK_TOKEN!(
            $crate::lexer::tokens::END_OF_STRING,
            String::new(),
            $input.chars().count()
        )
    };
}
