/// A byte range into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn slice<'a>(&self, s: &'a str) -> &'a str {
        &s[self.start..self.end]
    }
}

/// A parsed inline node with byte spans into the segment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineNode {
    /// Text that isn't part of any markdown construct.
    Text(Span),
    /// A backslash escape; `inner` is the escaped delimiter.
    Escaped { full: Span, inner: Span },
    /// A code span. Raw zone: no parsing inside.
    Code { full: Span, inner: Span },
    /// `**strong**` or `__strong__`.
    Strong { full: Span, inner: Span },
    /// `*emphasis*` or `_emphasis_`.
    Emphasis { full: Span, inner: Span },
}

impl InlineNode {
    /// The full span of the node, delimiters included.
    pub fn full(&self) -> Span {
        match self {
            InlineNode::Text(sp) => *sp,
            InlineNode::Escaped { full, .. }
            | InlineNode::Code { full, .. }
            | InlineNode::Strong { full, .. }
            | InlineNode::Emphasis { full, .. } => *full,
        }
    }
}
