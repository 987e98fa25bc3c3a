use crate::{
    config::TypewritingScheme,
    style::{StyledSegment, plain_text},
};

/// A timed display instruction for the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pause {
        duration_ms: u32,
    },
    Typewriting {
        scheme: TypewritingScheme,
        /// One token per source character, joined with `'`.
        phonetic_data: String,
        delay_ms: u32,
        source_text: String,
    },
}

/// The result of one compile call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledMessage {
    pub username: String,
    pub segments: Vec<StyledSegment>,
    /// Typewriting first (if any), then pauses in text order.
    pub events: Vec<Event>,
    pub start_paragraph: bool,
}

impl CompiledMessage {
    pub fn plain_text(&self) -> String {
        plain_text(&self.segments)
    }

    pub fn typewriting(&self) -> Option<&Event> {
        self.events
            .iter()
            .find(|e| matches!(e, Event::Typewriting { .. }))
    }

    pub fn pauses(&self) -> impl Iterator<Item = u32> + '_ {
        self.events.iter().filter_map(|e| match e {
            Event::Pause { duration_ms } => Some(*duration_ms),
            Event::Typewriting { .. } => None,
        })
    }
}

pub fn assemble(
    username: String,
    segments: Vec<StyledSegment>,
    typewriting: Option<Event>,
    pauses: Vec<Event>,
    start_paragraph: bool,
) -> CompiledMessage {
    let mut events = Vec::with_capacity(pauses.len() + 1);
    events.extend(typewriting);
    events.extend(pauses);
    CompiledMessage {
        username,
        segments,
        events,
        start_paragraph,
    }
}
