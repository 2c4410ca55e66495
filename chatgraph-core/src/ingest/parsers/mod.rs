//! Format-specific transcript parsers
//!
//! | Format | Module | Source |
//! |--------|--------|--------|
//! | `telegram` | [`telegram`] | Telegram Desktop "Export chat history" JSON |
//! | `jsonl` | [`jsonl`] | One canonical message record per line |

mod jsonl;
mod telegram;

pub use jsonl::JsonLinesParser;
pub use telegram::TelegramExportParser;

use super::TranscriptParser;
use crate::types::TranscriptFormat;

/// Get the parser for a transcript format.
pub fn parser_for(format: TranscriptFormat) -> Box<dyn TranscriptParser> {
    match format {
        TranscriptFormat::Telegram => Box::new(TelegramExportParser::new()),
        TranscriptFormat::JsonLines => Box::new(JsonLinesParser::new()),
    }
}
