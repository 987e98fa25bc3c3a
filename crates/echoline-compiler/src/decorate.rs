//! Decorative wrapping applied after styling: quotes, parentheses, the
//! auto-suffix and username brackets.
//!
//! Wrappers attach to the first and last literal-bearing segments so they
//! inherit the style at the edges of the message. The suffix is a separate
//! default-style segment outside any wrapper.

use crate::{
    config::CompilerConfig,
    style::{StyledSegment, plain_text},
};

const QUOTES: (&str, &str) = ("“", "”");
const ASCII_QUOTES: (&str, &str) = ("\"", "\"");
const PARENTHESES: (&str, &str) = ("（", "）");
const ASCII_PARENTHESES: (&str, &str) = ("(", ")");
const USERNAME_BRACKETS: (&str, &str) = ("【", "】");

pub fn decorate(mut segments: Vec<StyledSegment>, config: &CompilerConfig) -> Vec<StyledSegment> {
    if config.auto_quotes {
        let text = plain_text(&segments);
        if !is_wrapped(&text, QUOTES) && !is_wrapped(&text, ASCII_QUOTES) {
            wrap(&mut segments, QUOTES);
        }
    }

    if config.wants_parentheses() {
        let text = plain_text(&segments);
        if !is_wrapped(&text, PARENTHESES) && !is_wrapped(&text, ASCII_PARENTHESES) {
            wrap(&mut segments, PARENTHESES);
        }
    }

    if config.auto_suffix && wants_suffix(&segments, &config.auto_suffix_value) {
        append_suffix(&mut segments, &config.auto_suffix_value);
    }

    segments
}

/// Trims the username and, when enabled, wraps it in `【】`.
///
/// A name that is already bracketed is kept as is; an empty name becomes
/// the bare brackets.
pub fn format_username(name: &str, brackets: bool) -> String {
    let name = name.trim();
    if !brackets || is_wrapped(name, USERNAME_BRACKETS) {
        return name.to_string();
    }
    let (open, close) = USERNAME_BRACKETS;
    format!("{open}{name}{close}")
}

fn is_wrapped(text: &str, (open, close): (&str, &str)) -> bool {
    text.len() >= open.len() + close.len() && text.starts_with(open) && text.ends_with(close)
}

/// Adds `open`/`close` to the outermost literal-bearing segments. Messages
/// made only of emoji are left alone.
fn wrap(segments: &mut [StyledSegment], (open, close): (&str, &str)) {
    let mut literal = segments.iter().enumerate().filter(|(_, s)| !s.is_emoji());
    let Some((first, _)) = literal.next() else {
        return;
    };
    let last = literal.last().map_or(first, |(i, _)| i);

    segments[first].text.insert_str(0, open);
    segments[last].text.push_str(close);
}

fn wants_suffix(segments: &[StyledSegment], suffix: &str) -> bool {
    if suffix.is_empty() {
        return false;
    }
    let text = plain_text(segments);
    let trimmed = text.trim_end();
    if trimmed.ends_with(suffix) {
        return false;
    }
    trimmed.chars().any(char::is_alphanumeric) || segments.iter().any(StyledSegment::is_emoji)
}

/// Appends the suffix as its own segment, ahead of any trailing whitespace.
fn append_suffix(segments: &mut Vec<StyledSegment>, suffix: &str) {
    let mut trailing = None;
    if let Some(last) = segments.last_mut()
        && !last.is_emoji()
    {
        let kept = last.text.trim_end().len();
        if kept < last.text.len() {
            let tail = last.text.split_off(kept);
            trailing = Some(StyledSegment::new(tail, last.style.clone()));
        }
        if last.text.is_empty() {
            segments.pop();
        }
    }

    segments.push(StyledSegment::plain(suffix));
    segments.extend(trailing);
}
