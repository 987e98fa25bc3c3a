//! # echoline-syntax
//!
//! The fast-formatting directive grammar used by echoline messages.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Lexemes → Directive layer → Tokens
//!               (Logos)            (validation, fail-soft)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! Logos splits the input into context-free lexemes. Every byte ends up in
//! exactly one lexeme slice.
//!
//! ### 2. Directive layer ([`directive`] module)
//!
//! Lexemes are folded into [`Token`]s: literal runs and a closed set of
//! [`Directive`] kinds. Colors are validated here and class tags are split
//! into prefixed/raw forms. Anything malformed becomes
//! [`Directive::Unrecognized`] and is later rendered as literal text.
//!
//! ## Grammar
//!
//! | Input        | Meaning                                   |
//! |--------------|-------------------------------------------|
//! | `\@`         | literal `@`                               |
//! | `@b @i @u @s`| flip bold / italic / underline / strike   |
//! | `@[color]`   | set color (`@[]` clears)                  |
//! | `@+` `@-`    | size delta, one step per sign             |
//! | `@r`         | reset all styles                          |
//! | `@{id}`      | emoji placeholder                         |
//! | `@<name>`    | class tag (`@<:name>` for a raw class)    |
//!
//! ## Quick Start
//!
//! ```
//! use echoline_syntax::{tokenize, Directive, StyleFlag, Token};
//!
//! let tokens = tokenize("@bhi");
//! assert_eq!(tokens[0], Token::Directive(Directive::Toggle(StyleFlag::Bold)));
//! assert_eq!(tokens[1], Token::Literal("hi"));
//! ```

pub mod directive;
pub mod lexer;

pub use directive::{Directive, StyleFlag, Token, tokenize};
