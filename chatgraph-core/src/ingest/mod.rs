//! Ingestion layer for chat transcripts
//!
//! Turns a transcript file into the canonical [`Message`](crate::types::Message)
//! sequence consumed by the [`graph`](crate::graph) pipeline.
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────────┐     ┌─────────────┐
//! │ Transcript file │ ──► │ TranscriptParser     │ ──► │ Transcript  │
//! │ (result.json)   │     │ ├─ TelegramExport    │     │ (messages)  │
//! └─────────────────┘     │ └─ JsonLines         │     └─────────────┘
//!                         └──────────────────────┘
//! ```

mod parser;
pub mod parsers;

pub use parser::TranscriptParser;
pub use parsers::parser_for;

use crate::error::Result;
use crate::types::{Transcript, TranscriptFormat};
use std::path::Path;

/// Load a transcript from disk with the parser for `format`.
pub fn load_transcript(path: &Path, format: TranscriptFormat) -> Result<Transcript> {
    tracing::info!(path = %path.display(), %format, "Loading chat transcript");

    let transcript = parser_for(format).parse(path)?;

    for warning in &transcript.warnings {
        tracing::warn!(path = %path.display(), "{}", warning);
    }
    tracing::info!(
        messages = transcript.messages.len(),
        warnings = transcript.warnings.len(),
        "Transcript loaded"
    );

    Ok(transcript)
}
