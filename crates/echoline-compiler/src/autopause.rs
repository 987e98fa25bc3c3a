use crate::{config::CompilerConfig, message::Event};

/// One pause per trigger character in `text`, in text order.
pub fn pauses(text: &str, config: &CompilerConfig) -> Vec<Event> {
    if !config.autopause_enabled {
        return vec![];
    }
    let duration_ms = config
        .autopause_multiplier
        .saturating_mul(config.print_speed_ms);
    text.chars()
        .filter(|c| config.is_pause_trigger(*c))
        .map(|_| Event::Pause { duration_ms })
        .collect()
}
