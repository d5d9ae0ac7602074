use crate::ast::*;
use winnow::combinator::{opt, preceded};
use winnow::token::{rest, take_till};
use winnow::{ModalResult, Parser};

/// Splits a script into 1-based numbered lines.
///
/// Splitting is literal on `\n`, so text ending in a newline yields a final
/// empty line. A trailing `\r` is dropped from each line and a leading
/// byte-order mark from the first.
pub fn split_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    input
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
}

pub fn parse_line(line: &str) -> Line<'_> {
    let Some(first) = line.chars().next() else {
        return Line::Blank;
    };
    let remainder = line[first.len_utf8()..].trim();

    if let Some(rune) = Rune::from_char(first) {
        return Line::Rune {
            rune,
            text: remainder,
        };
    }

    match first {
        '<' => Line::TagOpen(remainder),
        '{' => Line::ScopeOpen(remainder),
        _ => Line::Action(line.trim()),
    }
}

pub fn parse_field(line: &str) -> Field<'_> {
    let mut input = line;
    match key_value(&mut input) {
        Ok((key, Some(value))) if !value.is_empty() => Field::Entry {
            key: key.trim(),
            value: value.trim(),
        },
        _ => Field::End,
    }
}

fn key_value<'s>(input: &mut &'s str) -> ModalResult<(&'s str, Option<&'s str>)> {
    (take_till(0.., ':'), opt(preceded(':', rest))).parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runes_take_the_trimmed_remainder() {
        assert_eq!(
            parse_line("@  Ty "),
            Line::Rune {
                rune: Rune::Character,
                text: "Ty"
            }
        );
        assert_eq!(
            parse_line("> a > b"),
            Line::Rune {
                rune: Rune::Quote,
                text: "a > b"
            }
        );
    }

    #[test]
    fn indented_rune_is_prose() {
        assert_eq!(parse_line("  # not a heading"), Line::Action("# not a heading"));
    }

    #[test]
    fn tag_and_scope_openers() {
        assert_eq!(parse_line("<hyper-link"), Line::TagOpen("hyper-link"));
        assert_eq!(parse_line("{ prefs "), Line::ScopeOpen("prefs"));
    }

    #[test]
    fn only_an_empty_line_is_blank() {
        assert_eq!(parse_line(""), Line::Blank);
        assert_eq!(parse_line(" \t "), Line::Action(""));
    }

    #[test]
    fn field_splits_on_first_colon() {
        assert_eq!(
            parse_field("src: https://example.com"),
            Field::Entry {
                key: "src",
                value: "https://example.com"
            }
        );
    }

    #[test]
    fn only_a_missing_value_ends_section() {
        assert_eq!(parse_field(""), Field::End);
        assert_eq!(parse_field("no separator"), Field::End);
        assert_eq!(parse_field("key:"), Field::End);
        assert_eq!(
            parse_field("key:   "),
            Field::Entry {
                key: "key",
                value: ""
            }
        );
    }

    #[test]
    fn split_lines_is_literal() {
        let lines: Vec<_> = split_lines("\u{feff}a\r\nb\n").collect();
        assert_eq!(lines, vec![(1, "a"), (2, "b"), (3, "")]);
    }
}
