//! Markdown delimiters owned by the inline kinds that use them.
//!
//! The parser calls these constants; it never hardcodes `*` or `` ` ``.

/// Code spans are raw zones: nothing inside them is interpreted.
pub struct CodeSpan;

impl CodeSpan {
    pub const TICK: u8 = b'`';
}

/// `**strong**` / `__strong__` and `*emphasis*` / `_emphasis_`.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    pub const DELIMITERS: [u8; 2] = [Self::STAR, Self::UNDERSCORE];

    /// Underscores do not open or close inside a word (`snake_case_name`).
    pub fn is_intraword_sensitive(delim: u8) -> bool {
        delim == Self::UNDERSCORE
    }
}

/// Backslash escapes for the markdown delimiters.
pub struct Escape;

impl Escape {
    pub const BACKSLASH: u8 = b'\\';
    pub const ESCAPABLE: &'static [u8] = b"*_`";
}
