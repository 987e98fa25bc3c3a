use echoline_syntax::{Directive, StyleFlag};

/// Prefix applied to class tags written without the raw `:` marker.
pub const CLASS_PREFIX: &str = "echo-text-";

/// A class tag from `@<name>` (prefixed) or `@<:name>` (raw).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassName {
    pub name: String,
    pub prefixed: bool,
}

impl ClassName {
    /// The class as the client sees it.
    pub fn css_class(&self) -> String {
        if self.prefixed {
            format!("{CLASS_PREFIX}{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Fully resolved style of one segment.
///
/// Fields are independent and compose: directives flip or set them, the
/// markdown overlay ORs bold/italic/code on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleAttributes {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strike: bool,
    /// Monospace marker set by markdown code spans.
    pub code: bool,
    pub color: Option<String>,
    /// Accumulated `@+`/`@-` presses. Unclamped; the renderer clamps.
    pub size_delta: i32,
    pub class_name: Option<ClassName>,
    /// Set only on emoji placeholder segments.
    pub emoji_id: Option<String>,
}

impl StyleAttributes {
    /// Returns the style that results from applying `directive` to `self`.
    ///
    /// Emoji and unrecognized directives leave the style untouched.
    pub fn apply(self, directive: &Directive<'_>) -> Self {
        match *directive {
            Directive::Toggle(flag) => self.flipped(flag),
            Directive::Color(color) => Self {
                color: color.map(str::to_owned),
                ..self
            },
            Directive::Size(delta) => Self {
                size_delta: self.size_delta.saturating_add(delta),
                ..self
            },
            Directive::Reset => Self::default(),
            Directive::Class { name, raw } => Self {
                class_name: Some(ClassName {
                    name: name.to_owned(),
                    prefixed: !raw,
                }),
                ..self
            },
            Directive::Emoji(_) | Directive::Unrecognized(_) => self,
        }
    }

    fn flipped(mut self, flag: StyleFlag) -> Self {
        let field = match flag {
            StyleFlag::Bold => &mut self.bold,
            StyleFlag::Italic => &mut self.italic,
            StyleFlag::Underline => &mut self.underline,
            StyleFlag::Strike => &mut self.strike,
        };
        *field = !*field;
        self
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// A run of text sharing one fully resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSegment {
    pub text: String,
    pub style: StyleAttributes,
}

impl StyledSegment {
    pub fn new(text: impl Into<String>, style: StyleAttributes) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// A literal segment with the default style.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, StyleAttributes::default())
    }

    /// A zero-length placeholder segment for an emoji.
    pub fn emoji(id: impl Into<String>, style: StyleAttributes) -> Self {
        Self {
            text: String::new(),
            style: StyleAttributes {
                emoji_id: Some(id.into()),
                ..style
            },
        }
    }

    pub fn is_emoji(&self) -> bool {
        self.style.emoji_id.is_some()
    }
}

/// Appends a literal segment, merging it into the previous one when the
/// styles match. Empty text is dropped.
pub fn push_literal(out: &mut Vec<StyledSegment>, text: &str, style: &StyleAttributes) {
    if text.is_empty() {
        return;
    }
    if let Some(last) = out.last_mut()
        && !last.is_emoji()
        && last.style == *style
    {
        last.text.push_str(text);
        return;
    }
    out.push(StyledSegment::new(text, style.clone()));
}

/// Concatenated text of all segments; emoji placeholders contribute nothing.
pub fn plain_text(segments: &[StyledSegment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggles_flip_rather_than_push() {
        let style = StyleAttributes::default()
            .apply(&Directive::Toggle(StyleFlag::Bold))
            .apply(&Directive::Toggle(StyleFlag::Bold));
        assert!(!style.bold);
    }

    #[test]
    fn size_deltas_accumulate() {
        let style = StyleAttributes::default()
            .apply(&Directive::Size(2))
            .apply(&Directive::Size(-1))
            .apply(&Directive::Size(3));
        assert_eq!(style.size_delta, 4);
    }

    #[test]
    fn reset_clears_everything() {
        let style = StyleAttributes::default()
            .apply(&Directive::Toggle(StyleFlag::Italic))
            .apply(&Directive::Color(Some("red")))
            .apply(&Directive::Class {
                name: "shake",
                raw: false,
            })
            .apply(&Directive::Reset);
        assert!(style.is_default());
    }

    #[test]
    fn empty_color_clears() {
        let style = StyleAttributes::default()
            .apply(&Directive::Color(Some("red")))
            .apply(&Directive::Color(None));
        assert_eq!(style.color, None);
    }

    #[test]
    fn class_names_render_with_prefix_unless_raw() {
        let prefixed = ClassName {
            name: "shake".to_string(),
            prefixed: true,
        };
        let raw = ClassName {
            name: "shake".to_string(),
            prefixed: false,
        };
        assert_eq!(prefixed.css_class(), "echo-text-shake");
        assert_eq!(raw.css_class(), "shake");
    }

    #[test]
    fn push_literal_merges_equal_styles() {
        let mut out = vec![];
        let bold = StyleAttributes {
            bold: true,
            ..Default::default()
        };
        push_literal(&mut out, "a", &bold);
        push_literal(&mut out, "", &StyleAttributes::default());
        push_literal(&mut out, "b", &bold);
        push_literal(&mut out, "c", &StyleAttributes::default());
        assert_eq!(
            out,
            vec![
                StyledSegment::new("ab", bold),
                StyledSegment::plain("c"),
            ]
        );
    }

    #[test]
    fn push_literal_never_merges_into_emoji() {
        let mut out = vec![StyledSegment::emoji("cat", StyleAttributes::default())];
        push_literal(&mut out, "x", &StyleAttributes::default());
        assert_eq!(out.len(), 2);
    }
}
