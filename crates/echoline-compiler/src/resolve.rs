//! Folds the directive token stream into styled segments.
//!
//! There is one current style value, not a scope stack: a directive changes
//! the style of everything after it until another directive changes it back.
//! Nothing needs closing at end of input.

use echoline_syntax::{Directive, Token};

use crate::style::{StyleAttributes, StyledSegment, push_literal};

pub fn resolve(tokens: &[Token<'_>]) -> Vec<StyledSegment> {
    let mut style = StyleAttributes::default();
    let mut buffer = String::new();
    let mut out = Vec::new();

    for token in tokens {
        if let Some(text) = token.literal_text() {
            buffer.push_str(text);
            continue;
        }
        let Token::Directive(directive) = token else {
            continue;
        };

        push_literal(&mut out, &buffer, &style);
        buffer.clear();

        match directive {
            Directive::Emoji(id) => out.push(StyledSegment::emoji(*id, style.clone())),
            other => style = style.apply(other),
        }
    }

    push_literal(&mut out, &buffer, &style);
    out
}
