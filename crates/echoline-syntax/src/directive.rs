//! Directive tokens: the lexer output folded into a closed set of directive
//! kinds plus literal runs.
//!
//! Everything that fails to form a valid directive becomes
//! [`Directive::Unrecognized`], carrying the original slice so downstream
//! stages can emit it verbatim. Tokenizing never fails.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexer::{Lexeme, lex};

/// `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` or a CSS-style color keyword.
static COLOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})|[A-Za-z]+)$").unwrap()
});

/// The four flippable boolean style flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFlag {
    Bold,
    Italic,
    Underline,
    Strike,
}

/// A recognized (or explicitly unrecognized) `@` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    /// Flip one boolean flag.
    Toggle(StyleFlag),
    /// Set the color, or clear it when `None` (`@[]`).
    Color(Option<&'a str>),
    /// Add to the size delta; negative for `@-`.
    Size(i32),
    /// Reset every style field to its default.
    Reset,
    /// An emoji/image placeholder leaf.
    Emoji(&'a str),
    /// A class tag. `raw` is set for the `@<:name>` form.
    Class { name: &'a str, raw: bool },
    /// Input that looked like a directive but isn't one; emitted as literal text.
    Unrecognized(&'a str),
}

/// One element of the directive token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),
    Directive(Directive<'a>),
}

impl<'a> Token<'a> {
    /// The text this token contributes when treated as literal output, if any.
    pub fn literal_text(&self) -> Option<&'a str> {
        match self {
            Token::Literal(text) | Token::Directive(Directive::Unrecognized(text)) => Some(text),
            Token::Directive(_) => None,
        }
    }
}

/// Tokenize operator text into literal runs and directives.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    lex(input)
        .into_iter()
        .filter_map(|(lexeme, slice)| match lexeme {
            Ok(lexeme) => classify(lexeme, slice),
            Err(()) => Some(Token::Directive(Directive::Unrecognized(slice))),
        })
        .collect()
}

fn classify<'a>(lexeme: Lexeme<'a>, slice: &'a str) -> Option<Token<'a>> {
    let directive = match lexeme {
        Lexeme::Text | Lexeme::Backslash => return Some(Token::Literal(slice)),
        Lexeme::EscapedAt => return Some(Token::Literal("@")),
        Lexeme::Bold => Directive::Toggle(StyleFlag::Bold),
        Lexeme::Italic => Directive::Toggle(StyleFlag::Italic),
        Lexeme::Underline => Directive::Toggle(StyleFlag::Underline),
        Lexeme::Strike => Directive::Toggle(StyleFlag::Strike),
        Lexeme::Reset => Directive::Reset,
        Lexeme::Grow(count) => Directive::Size(sign_count(count)),
        Lexeme::Shrink(count) => Directive::Size(-sign_count(count)),
        Lexeme::Color(inner) => color(inner.trim(), slice),
        Lexeme::Emoji(inner) => {
            let id = inner.trim();
            if id.is_empty() {
                return None;
            }
            Directive::Emoji(id)
        }
        Lexeme::Class(inner) => class(inner.trim(), slice),
        Lexeme::At => Directive::Unrecognized(slice),
    };
    Some(Token::Directive(directive))
}

fn sign_count(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

fn color<'a>(value: &'a str, slice: &'a str) -> Directive<'a> {
    if value.is_empty() {
        Directive::Color(None)
    } else if COLOR_PATTERN.is_match(value) {
        Directive::Color(Some(value))
    } else {
        Directive::Unrecognized(slice)
    }
}

fn class<'a>(value: &'a str, slice: &'a str) -> Directive<'a> {
    let (name, raw) = match value.strip_prefix(':') {
        Some(stripped) => (stripped.trim(), true),
        None => (value, false),
    };
    if name.is_empty() {
        Directive::Unrecognized(slice)
    } else {
        Directive::Class { name, raw }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn directive(d: Directive<'_>) -> Token<'_> {
        Token::Directive(d)
    }

    #[test]
    fn escaped_at_is_literal() {
        assert_eq!(tokenize("\\@"), vec![Token::Literal("@")]);
    }

    #[test]
    fn escaped_at_is_not_reinterpreted() {
        assert_eq!(
            tokenize("\\@b"),
            vec![Token::Literal("@"), Token::Literal("b")]
        );
    }

    #[test]
    fn toggles_and_text() {
        assert_eq!(
            tokenize("@bhello@r"),
            vec![
                directive(Directive::Toggle(StyleFlag::Bold)),
                Token::Literal("hello"),
                directive(Directive::Reset),
            ]
        );
    }

    #[rstest]
    #[case("@+", 1)]
    #[case("@++", 2)]
    #[case("@-", -1)]
    #[case("@---", -3)]
    fn size_runs(#[case] input: &str, #[case] delta: i32) {
        assert_eq!(tokenize(input), vec![directive(Directive::Size(delta))]);
    }

    #[rstest]
    #[case("@[#fff]", Some("#fff"))]
    #[case("@[#FF8800]", Some("#FF8800"))]
    #[case("@[#11223344]", Some("#11223344"))]
    #[case("@[ red ]", Some("red"))]
    #[case("@[]", None)]
    fn valid_colors(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(tokenize(input), vec![directive(Directive::Color(expected))]);
    }

    #[rstest]
    #[case("@[#ggg]")]
    #[case("@[light blue]")]
    #[case("@[#12345]")]
    fn invalid_colors_are_unrecognized(#[case] input: &str) {
        assert_eq!(tokenize(input), vec![directive(Directive::Unrecognized(input))]);
    }

    #[test]
    fn unclosed_color_passes_through() {
        let tokens = tokenize("@[red");
        let text: String = tokens.iter().filter_map(Token::literal_text).collect();
        assert_eq!(text, "@[red");
    }

    #[test]
    fn emoji_placeholder() {
        assert_eq!(tokenize("@{ wave }"), vec![directive(Directive::Emoji("wave"))]);
    }

    #[test]
    fn empty_emoji_is_dropped() {
        assert_eq!(tokenize("a@{}b"), vec![Token::Literal("a"), Token::Literal("b")]);
    }

    #[rstest]
    #[case("@<shake>", "shake", false)]
    #[case("@<:my-class>", "my-class", true)]
    fn class_tags(#[case] input: &str, #[case] name: &str, #[case] raw: bool) {
        assert_eq!(tokenize(input), vec![directive(Directive::Class { name, raw })]);
    }

    #[rstest]
    #[case("@<>")]
    #[case("@<:>")]
    fn empty_class_is_unrecognized(#[case] input: &str) {
        assert_eq!(tokenize(input), vec![directive(Directive::Unrecognized(input))]);
    }

    #[test]
    fn unclosed_class_passes_through() {
        let text: String = tokenize("@<shake now")
            .iter()
            .filter_map(Token::literal_text)
            .collect();
        assert_eq!(text, "@<shake now");
    }

    #[test]
    fn unknown_directive_is_literal() {
        let tokens = tokenize("@z");
        assert_eq!(
            tokens,
            vec![directive(Directive::Unrecognized("@")), Token::Literal("z")]
        );
        let text: String = tokens.iter().filter_map(Token::literal_text).collect();
        assert_eq!(text, "@z");
    }
}
