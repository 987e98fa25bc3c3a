//! # Markdown Overlay
//!
//! Cursor-based re-scan of each segment's text for a markdown emphasis
//! subset, layered on top of the directive styling.
//!
//! ## Modules
//!
//! - **`types`**: `InlineNode` enum (Text, Escaped, Code, Strong, Emphasis)
//! - **`kinds`**: delimiter constants owned by each inline kind
//! - **`cursor`**: `Cursor` for byte-by-byte scanning with char-aware neighbours
//! - **`parser`**: `parse_inline()` with `try_parse_*` helpers
//!
//! ## Composition
//!
//! Markdown never replaces directive styling: a matched span gets the
//! directive style with bold/italic/code OR'd in. Strong and emphasis bodies
//! are re-scanned one level deep; deeper markers are left as written. Code
//! spans are raw zones.

pub mod cursor;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::InlineNode;

use crate::style::{StyleAttributes, StyledSegment, push_literal};

/// Strong/emphasis spans nested deeper than this are left as written.
const MAX_NESTING: usize = 1;

/// Splits and augments segments according to markdown emphasis.
pub fn overlay(segments: Vec<StyledSegment>) -> Vec<StyledSegment> {
    let mut out = Vec::with_capacity(segments.len());
    for segment in segments {
        if segment.is_emoji() {
            out.push(segment);
            continue;
        }
        emit(&mut out, &segment.text, &segment.style, 0);
    }
    out
}

fn emit(out: &mut Vec<StyledSegment>, text: &str, style: &StyleAttributes, depth: usize) {
    for node in parse_inline(text) {
        match node {
            InlineNode::Text(span) => push_literal(out, span.slice(text), style),
            InlineNode::Escaped { inner, .. } => push_literal(out, inner.slice(text), style),
            InlineNode::Code { inner, .. } => {
                let code = StyleAttributes {
                    code: true,
                    ..style.clone()
                };
                push_literal(out, inner.slice(text), &code);
            }
            InlineNode::Strong { full, .. } | InlineNode::Emphasis { full, .. }
                if depth > MAX_NESTING =>
            {
                push_literal(out, full.slice(text), style);
            }
            InlineNode::Strong { inner, .. } => {
                let bold = StyleAttributes {
                    bold: true,
                    ..style.clone()
                };
                emit(out, inner.slice(text), &bold, depth + 1);
            }
            InlineNode::Emphasis { inner, .. } => {
                let italic = StyleAttributes {
                    italic: true,
                    ..style.clone()
                };
                emit(out, inner.slice(text), &italic, depth + 1);
            }
        }
    }
}
