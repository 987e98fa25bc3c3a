//! Operator console for echoline.
//!
//! - **`commands`**: command catalog, parsing and suggestions
//! - **`console`**: dispatches input lines to messages or settings changes
//! - **`transport`**: where compiled payloads go

pub mod commands;
pub mod console;
pub mod transport;
