use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Emphasis, Escape},
    types::{InlineNode, Span},
};

/// Parses one segment's text into a sequence of [`InlineNode`]s.
///
/// # Precedence
/// At each position: backslash escape, code span, strong, emphasis. Code
/// spans are raw zones, so `` `**x**` `` is code, not bold.
///
/// # Returns
/// Nodes covering the entire input. Anything that does not form a closed
/// construct is emitted as `InlineNode::Text`.
pub fn parse_inline(s: &str) -> Vec<InlineNode> {
    let mut cur = Cursor::new(s);
    let mut out = vec![];
    let mut text_start = 0;

    fn flush_text(out: &mut Vec<InlineNode>, start: usize, end: usize) {
        if end > start {
            out.push(InlineNode::Text(Span { start, end }));
        }
    }

    while !cur.eof() {
        let parsers: [fn(&mut Cursor<'_>) -> Option<InlineNode>; 4] = [
            try_parse_escape,
            try_parse_code_span,
            try_parse_strong,
            try_parse_emphasis,
        ];
        if let Some(node) = parsers.into_iter().find_map(|parse| parse(&mut cur)) {
            let full = node.full();
            flush_text(&mut out, text_start, full.start);
            text_start = full.end;
            out.push(node);
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, text_start, cur.i);
    out
}

fn try_parse_escape(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(Escape::BACKSLASH) {
        return None;
    }
    let escaped = cur.peek_at(1)?;
    if !Escape::ESCAPABLE.contains(&escaped) {
        return None;
    }

    let start = cur.i;
    cur.bump_n(2);
    Some(InlineNode::Escaped {
        full: Span {
            start,
            end: start + 2,
        },
        inner: Span {
            start: start + 1,
            end: start + 2,
        },
    })
}

/// Attempts to parse a non-empty code span at the current position.
///
/// On failure the cursor is restored.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    if cur.peek() != Some(CodeSpan::TICK) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.i;
    cur.bump(); // `
    let inner_start = cur.i;

    while !cur.eof() {
        if cur.peek() == Some(CodeSpan::TICK) {
            break;
        }
        cur.bump();
    }
    let inner_end = cur.i;

    if cur.peek() != Some(CodeSpan::TICK) || inner_end == inner_start {
        *cur = saved;
        return None;
    }
    cur.bump(); // closing `

    Some(InlineNode::Code {
        full: Span { start, end: cur.i },
        inner: Span {
            start: inner_start,
            end: inner_end,
        },
    })
}

/// Attempts to parse `**strong**` or `__strong__`.
fn try_parse_strong(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let delim = cur.peek().filter(|b| Emphasis::DELIMITERS.contains(b))?;
    let pair = [delim, delim];
    if !cur.starts_with(&pair) {
        return None;
    }

    let start = cur.i;
    let inner_start = start + pair.len();
    if !opens(cur, start, inner_start, delim) {
        return None;
    }

    let s = cur.s;
    let bytes = s.as_bytes();
    let mut j = inner_start + 1;
    while j + pair.len() <= bytes.len() {
        if bytes[j..].starts_with(&pair) {
            // Inside a longer run like `***`, the last two close.
            let mut close = j;
            while bytes.get(close + pair.len()) == Some(&delim) {
                close += 1;
            }
            if closes(cur, close, close + pair.len(), delim) {
                cur.i = close + pair.len();
                return Some(InlineNode::Strong {
                    full: Span { start, end: cur.i },
                    inner: Span {
                        start: inner_start,
                        end: close,
                    },
                });
            }
            j = close + pair.len();
            continue;
        }
        j += 1;
    }
    None
}

/// Attempts to parse `*emphasis*` or `_emphasis_`.
fn try_parse_emphasis(cur: &mut Cursor<'_>) -> Option<InlineNode> {
    let delim = cur.peek().filter(|b| Emphasis::DELIMITERS.contains(b))?;
    if cur.peek_at(1) == Some(delim) {
        return None;
    }

    let start = cur.i;
    let inner_start = start + 1;
    if !opens(cur, start, inner_start, delim) {
        return None;
    }

    let s = cur.s;
    let bytes = s.as_bytes();
    for j in inner_start + 1..bytes.len() {
        let lone = bytes[j] == delim
            && bytes[j - 1] != delim
            && bytes.get(j + 1) != Some(&delim);
        if lone && closes(cur, j, j + 1, delim) {
            cur.i = j + 1;
            return Some(InlineNode::Emphasis {
                full: Span { start, end: cur.i },
                inner: Span {
                    start: inner_start,
                    end: j,
                },
            });
        }
    }
    None
}

/// A delimiter run opens when followed by non-whitespace.
fn opens(cur: &Cursor<'_>, start: usize, after: usize, delim: u8) -> bool {
    let Some(next) = cur.char_at(after) else {
        return false;
    };
    if next.is_whitespace() {
        return false;
    }
    !(Emphasis::is_intraword_sensitive(delim)
        && cur.char_before(start).is_some_and(char::is_alphanumeric))
}

/// A delimiter run closes when preceded by non-whitespace.
fn closes(cur: &Cursor<'_>, start: usize, after: usize, delim: u8) -> bool {
    let Some(prev) = cur.char_before(start) else {
        return false;
    };
    if prev.is_whitespace() {
        return false;
    }
    !(Emphasis::is_intraword_sensitive(delim)
        && cur.char_at(after).is_some_and(char::is_alphanumeric))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sp(start: usize, end: usize) -> Span {
        Span { start, end }
    }

    #[test]
    fn parse_simple_text() {
        assert_eq!(parse_inline("hello world"), vec![InlineNode::Text(sp(0, 11))]);
    }

    #[test]
    fn parse_code_span() {
        assert_eq!(
            parse_inline("`code`"),
            vec![InlineNode::Code {
                full: sp(0, 6),
                inner: sp(1, 5)
            }]
        );
    }

    #[test]
    fn code_span_suppresses_emphasis() {
        let nodes = parse_inline("`**not bold**`");
        assert_eq!(nodes.len(), 1);
        assert!(matches!(nodes[0], InlineNode::Code { .. }));
    }

    #[test]
    fn empty_code_span_is_text() {
        assert_eq!(parse_inline("``"), vec![InlineNode::Text(sp(0, 2))]);
    }

    #[test]
    fn parse_strong_both_delimiters() {
        for input in ["**bold**", "__bold__"] {
            assert_eq!(
                parse_inline(input),
                vec![InlineNode::Strong {
                    full: sp(0, 8),
                    inner: sp(2, 6)
                }],
                "failed for {input:?}"
            );
        }
    }

    #[test]
    fn parse_emphasis_between_text() {
        assert_eq!(
            parse_inline("a *b* c"),
            vec![
                InlineNode::Text(sp(0, 2)),
                InlineNode::Emphasis {
                    full: sp(2, 5),
                    inner: sp(3, 4)
                },
                InlineNode::Text(sp(5, 7)),
            ]
        );
    }

    #[test]
    fn triple_run_closes_strong_on_last_two() {
        assert_eq!(
            parse_inline("***x***"),
            vec![InlineNode::Strong {
                full: sp(0, 7),
                inner: sp(2, 5)
            }]
        );
    }

    #[test]
    fn unclosed_strong_is_text() {
        assert_eq!(parse_inline("**open"), vec![InlineNode::Text(sp(0, 6))]);
    }

    #[test]
    fn spaced_delimiters_do_not_open() {
        assert_eq!(parse_inline("2 * 3 * 4"), vec![InlineNode::Text(sp(0, 9))]);
    }

    #[test]
    fn intraword_underscores_are_text() {
        assert_eq!(
            parse_inline("snake_case_name"),
            vec![InlineNode::Text(sp(0, 15))]
        );
    }

    #[test]
    fn intraword_stars_still_emphasise() {
        let nodes = parse_inline("a*b*c");
        assert!(matches!(nodes[1], InlineNode::Emphasis { .. }));
    }

    #[test]
    fn escape_produces_literal_delimiter() {
        assert_eq!(
            parse_inline("\\*x*"),
            vec![
                InlineNode::Escaped {
                    full: sp(0, 2),
                    inner: sp(1, 2)
                },
                InlineNode::Text(sp(2, 4)),
            ]
        );
    }

    #[test]
    fn backslash_before_other_char_is_text() {
        assert_eq!(parse_inline("C:\\dir"), vec![InlineNode::Text(sp(0, 6))]);
    }

    #[test]
    fn cjk_content_keeps_char_boundaries() {
        let s = "你**好**吗";
        let nodes = parse_inline(s);
        assert_eq!(nodes.len(), 3);
        match &nodes[1] {
            InlineNode::Strong { inner, .. } => assert_eq!(inner.slice(s), "好"),
            other => panic!("expected Strong, got {other:?}"),
        }
    }
}
