//! # Lexer - Breaking Operator Text into Lexemes
//!
//! This is the first stage of message compilation: the raw console line is
//! split into lexemes using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Lossless Slices
//!
//! Every byte of the input appears in exactly one lexeme slice, so the
//! directive layer can always fall back to emitting the original text:
//!
//! ```
//! use echoline_syntax::lexer::lex;
//!
//! let input = "@bhello @[red]world@r";
//! let reconstructed: String = lex(input).iter().map(|(_, text)| *text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Enclosed Directives
//!
//! `@[...]`, `@{...}` and `@<...>` are matched on their opener only. A
//! callback then looks for the closing delimiter in the remainder and bumps
//! the lexer past it. When there is no closer the callback fails and the
//! opener comes back as an error slice, which the directive layer turns into
//! literal text.

use logos::{Lexer, Logos};

/// Lexemes produced by the Logos lexer.
///
/// These are context-free: the lexer does not validate color names or class
/// names. That happens in [`crate::directive`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme<'s> {
    /// `\@` - an escaped at-sign
    #[token("\\@")]
    EscapedAt,

    /// `@b`
    #[token("@b")]
    Bold,

    /// `@i`
    #[token("@i")]
    Italic,

    /// `@u`
    #[token("@u")]
    Underline,

    /// `@s`
    #[token("@s")]
    Strike,

    /// `@r`
    #[token("@r")]
    Reset,

    /// `@+`, `@++`, ... carrying the number of plus signs
    #[regex(r"@\++", sign_run)]
    Grow(usize),

    /// `@-`, `@--`, ... carrying the number of minus signs
    #[regex(r"@-+", sign_run)]
    Shrink(usize),

    /// `@[...]` carrying the bracket contents
    #[token("@[", |lex| enclosed(lex, ']'))]
    Color(&'s str),

    /// `@{...}` carrying the brace contents
    #[token("@{", |lex| enclosed(lex, '}'))]
    Emoji(&'s str),

    /// `@<...>` carrying the angle-bracket contents
    #[token("@<", |lex| enclosed(lex, '>'))]
    Class(&'s str),

    /// A bare `@` that starts no known directive
    #[token("@")]
    At,

    /// A backslash that escapes nothing
    #[token("\\")]
    Backslash,

    /// Plain text - anything without `@` or `\`
    #[regex(r"[^@\\]+")]
    Text,
}

fn sign_run<'s>(lex: &mut Lexer<'s, Lexeme<'s>>) -> usize {
    lex.slice().len() - 1
}

/// Consumes everything up to and including `close`, returning the inner text.
fn enclosed<'s>(lex: &mut Lexer<'s, Lexeme<'s>>, close: char) -> Option<&'s str> {
    let rest = lex.remainder();
    let end = rest.find(close)?;
    lex.bump(end + close.len_utf8());
    Some(&rest[..end])
}

/// Lex the input into `(lexeme, slice)` pairs.
///
/// Unclosed enclosed directives are returned as `Err(())` with the opener as
/// the slice.
pub fn lex(input: &str) -> Vec<(Result<Lexeme<'_>, ()>, &str)> {
    let mut out = Vec::new();
    let mut lexer = Lexeme::lexer(input);

    while let Some(result) = lexer.next() {
        out.push((result, lexer.slice()));
    }

    out
}
