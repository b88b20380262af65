#![allow(clippy::module_inception)]

pub mod errors;
pub mod lexer;
pub mod macros;
pub mod screener;

#[cfg(test)]
mod testing;

/// Finds the line holding the character at `position`.
///
/// Returns the 1-based line number, the line itself (newline included) and
/// the 0-based character column, or `None` when `position` is past the end.
pub fn get_line_at_position(input: &str, position: usize) -> Option<(usize, String, usize)> {
    let mut start = 0;

    for (index, line) in input.split_inclusive('\n').enumerate() {
        let end = start + line.chars().count();

        if (start..end).contains(&position) {
            return Some((index + 1, line.to_string(), position - start));
        }

        start = end;
    }

    None
}

/// Renders a marker pointing at the character at `position`:
///
/// ```text
/// 1 | SELECT a FORM b
///   | ---------^
/// ```
pub fn display_position(input: &str, position: usize) -> Option<String> {
    let (line, line_text, line_pos) = get_line_at_position(input, position)?;

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    Some(format!(
        "{} | {}\n{:>padding$} {:->arrows$}",
        line_string,
        line_text_removed.trim_end(),
        "|",
        "^"
    ))
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (&string[start..], start)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_line_at_position() {
        let input = "Hello, world!\nfoo\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(input, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(input, 27).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);

        assert_eq!(super::get_line_at_position(input, 31), None);
    }

    #[test]
    fn test_get_line_counts_characters() {
        let (line_number, line, line_pos) = super::get_line_at_position("é\nüx", 3).unwrap();

        assert_eq!(line_number, 2);
        assert_eq!(line, "üx");
        assert_eq!(line_pos, 1);
    }

    #[test]
    fn test_display_position() {
        let rendered = super::display_position("SELECT a\n  FORM b", 16).unwrap();

        assert_eq!(rendered, "2 | FORM b\n  | -----^");
        assert_eq!(super::display_position("a", 5), None);
    }
}
