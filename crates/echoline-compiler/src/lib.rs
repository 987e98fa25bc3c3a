//! # echoline-compiler
//!
//! Turns one line of operator text into styled segments and timed display
//! events.
//!
//! ## Pipeline
//!
//! Each stage is a pure function of the previous stage's output and the
//! [`CompilerConfig`] snapshot:
//!
//! 1. **tokenize** (`echoline-syntax`): directives and literal runs
//! 2. **`resolve`**: fold directives into [`StyledSegment`]s
//! 3. **`markdown`**: overlay `**bold**`, `*italic*` and `` `code` ``
//! 4. **`decorate`**: quotes, parentheses, suffix, username brackets
//! 5. **`typewriting`**: per-character phonetic data for CJK text
//! 6. **`autopause`**: pause events at trigger characters
//! 7. **`message`**: assemble the [`CompiledMessage`]
//!
//! `wire` renders a compiled message as the client JSON payload and
//! `timing` estimates how long the client takes to play it.
//!
//! The only shared state is the read-only [`phonetic`] model, built once on
//! first use. Call [`phonetic::warm_up`] at start-up to avoid paying for it
//! on the first message.

pub mod autopause;
pub mod config;
pub mod decorate;
pub mod markdown;
pub mod message;
pub mod phonetic;
pub mod resolve;
pub mod style;
pub mod timing;
pub mod typewriting;
pub mod wire;

pub use config::{CompilerConfig, ConfigError, TypewritingScheme};
pub use message::{CompiledMessage, Event};
pub use style::{ClassName, StyleAttributes, StyledSegment};

use log::debug;

/// Compiles `raw` as sent by `username`.
///
/// Never fails on message content: anything that is not a well-formed
/// directive or markdown span is kept as literal text.
///
/// # Errors
/// [`ConfigError::ZeroPrintSpeed`] if `config.print_speed_ms` is zero.
pub fn compile(
    raw: &str,
    username: &str,
    config: &CompilerConfig,
) -> Result<CompiledMessage, ConfigError> {
    config.validate()?;

    let tokens = echoline_syntax::tokenize(raw);
    let segments = resolve::resolve(&tokens);
    let segments = markdown::overlay(segments);
    let segments = decorate::decorate(segments, config);
    let username = decorate::format_username(username, config.username_brackets);

    let text = style::plain_text(&segments);
    let typewriting = typewriting::generate(&text, config);
    let pauses = autopause::pauses(&text, config);

    debug!(
        "compiled {} tokens into {} segments, {} pauses, typewriting: {}",
        tokens.len(),
        segments.len(),
        pauses.len(),
        typewriting.is_some()
    );

    Ok(message::assemble(
        username,
        segments,
        typewriting,
        pauses,
        config.start_paragraph,
    ))
}
