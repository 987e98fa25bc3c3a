use crate::{
    config::CompilerConfig,
    message::Event,
    phonetic::{PhoneticModel, is_cjk},
};

/// Separator between per-character phonetic tokens.
pub const SEPARATOR: char = '\'';

/// Token emitted for a separator character in the source text, so every
/// character keeps exactly one token.
pub const SEPARATOR_STANDIN: &str = "\u{2019}";

/// Builds the typewriting event for `text`, or `None` when typewriting is
/// off or the text has no ideographs to type.
pub fn generate(text: &str, config: &CompilerConfig) -> Option<Event> {
    if !config.typewriting_enabled || !text.chars().any(is_cjk) {
        return None;
    }

    let scheme = config.typewriting_scheme;
    let separator = SEPARATOR.to_string();
    let tokens: Vec<String> = PhoneticModel::global()
        .transcribe(text, scheme)
        .into_iter()
        .map(|token| {
            if token == separator {
                SEPARATOR_STANDIN.to_string()
            } else {
                token
            }
        })
        .collect();
    log::debug!("typewriting {} characters as {scheme}", tokens.len());

    Some(Event::Typewriting {
        scheme,
        phonetic_data: tokens.join(&separator),
        delay_ms: config.print_speed_ms,
        source_text: text.to_string(),
    })
}
