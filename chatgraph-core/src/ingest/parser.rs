//! Parser trait abstraction
//!
//! All transcript parsers implement the [`TranscriptParser`] trait so the
//! graph builder never sees the on-disk representation of a chat.
//!
//! ## Error Handling
//!
//! - A record without an identifier or kind tag is fatal: the whole parse
//!   fails with [`Error::Parse`](crate::error::Error::Parse) naming the record.
//! - Cosmetic problems (e.g. an unreadable timestamp) are recorded in
//!   [`Transcript::warnings`] and parsing continues.

use crate::error::Result;
use crate::types::{Transcript, TranscriptFormat};
use std::path::Path;

/// Trait implemented by all transcript parsers.
///
/// ## Example
///
/// ```rust,ignore
/// use chatgraph_core::ingest::{parser_for, TranscriptParser};
/// use chatgraph_core::TranscriptFormat;
///
/// let parser = parser_for(TranscriptFormat::Telegram);
/// let transcript = parser.parse(Path::new("result.json"))?;
/// ```
pub trait TranscriptParser: Send + Sync {
    /// Which format this parser handles
    fn format(&self) -> TranscriptFormat;

    /// Parse an in-memory transcript.
    fn parse_str(&self, content: &str) -> Result<Transcript>;

    /// Read and parse a transcript file.
    fn parse(&self, path: &Path) -> Result<Transcript> {
        let content = std::fs::read_to_string(path)?;
        self.parse_str(&content)
    }
}
