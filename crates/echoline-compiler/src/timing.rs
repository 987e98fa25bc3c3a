use crate::message::CompiledMessage;

/// Rough time in milliseconds a client needs to play `message` back.
///
/// ASCII letters take one print interval, any other character two, an emoji
/// one. Pauses add their own duration.
pub fn estimate_playback_ms(message: &CompiledMessage, print_speed_ms: u32) -> u64 {
    let speed = u64::from(print_speed_ms);
    let text: u64 = message
        .segments
        .iter()
        .map(|segment| {
            if segment.is_emoji() {
                return speed;
            }
            segment
                .text
                .chars()
                .map(|c| if c.is_ascii_alphabetic() { speed } else { speed * 2 })
                .sum()
        })
        .sum();
    let pauses: u64 = message.pauses().map(u64::from).sum();
    text + pauses
}
