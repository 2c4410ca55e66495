//! Telegram Desktop JSON export parser
//!
//! Parses the `result.json` written by "Export chat history" in Telegram
//! Desktop with the machine-readable JSON option:
//!
//! ```json
//! {
//!   "name": "Rust Study Group",
//!   "type": "public_supergroup",
//!   "id": 1234567890,
//!   "messages": [
//!     {"id": 1, "type": "message", "date": "2024-03-01T09:00:00",
//!      "from": "Alice", "from_id": "user111", "text": "hi"},
//!     {"id": 2, "type": "message", "date": "2024-03-01T09:01:12",
//!      "from": "Bob", "from_id": "user222", "reply_to_message_id": 1, "text": "hey"}
//!   ]
//! }
//! ```
//!
//! Service events carry `actor`/`actor_id` instead of `from`/`from_id`; both
//! spellings are accepted. Old exports write `from_id` as a bare integer,
//! which is normalized to its decimal string.

use crate::error::{Error, Result};
use crate::ingest::TranscriptParser;
use crate::types::{Message, MessageKind, Transcript, TranscriptFormat};
use chrono::NaiveDateTime;
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parser for Telegram Desktop JSON exports.
#[derive(Debug, Default)]
pub struct TelegramExportParser;

impl TelegramExportParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_error(message: String) -> Error {
        Error::Parse {
            format: TranscriptFormat::Telegram.to_string(),
            message,
        }
    }

    /// Read an author identifier that may be a string or an integer.
    fn author_id(record: &Value) -> Option<String> {
        match record.get("from_id").or_else(|| record.get("actor_id"))? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn author_name(record: &Value) -> Option<String> {
        record
            .get("from")
            .or_else(|| record.get("actor"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn parse_record(
        position: usize,
        record: &Value,
        warnings: &mut Vec<String>,
    ) -> Result<Message> {
        if !record.is_object() {
            return Err(Self::parse_error(format!(
                "record #{} is not a JSON object",
                position
            )));
        }

        let id = record.get("id").and_then(Value::as_i64).ok_or_else(|| {
            Self::parse_error(format!("record #{} has no integer `id`", position))
        })?;

        let kind = record
            .get("type")
            .and_then(Value::as_str)
            .map(MessageKind::from_tag)
            .ok_or_else(|| {
                Self::parse_error(format!("message {} has no `type` tag", id))
            })?;

        let sent_at = match record.get("date").and_then(Value::as_str) {
            Some(raw) => match NaiveDateTime::parse_from_str(raw, DATE_FORMAT) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    warnings.push(format!("message {}: unreadable date {:?}: {}", id, raw, e));
                    None
                }
            },
            None => None,
        };

        let reply_to = match record.get("reply_to_message_id") {
            None | Some(Value::Null) => None,
            Some(raw) => match raw.as_i64() {
                Some(target) => Some(target),
                None => {
                    warnings.push(format!(
                        "message {}: unreadable reply_to_message_id {}",
                        id, raw
                    ));
                    None
                }
            },
        };

        Ok(Message {
            id,
            kind,
            author_id: Self::author_id(record),
            author_name: Self::author_name(record),
            reply_to,
            sent_at,
            text: record.get("text").and_then(Self::text),
        })
    }

    /// Flatten `text`, which is either a string or an array mixing plain
    /// strings and entity objects (`{"type": "bold", "text": "..."}`).
    fn text(value: &Value) -> Option<String> {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Array(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    Value::String(s) => Some(s.as_str()),
                    other => other.get("text").and_then(Value::as_str),
                })
                .collect(),
            _ => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

impl TranscriptParser for TelegramExportParser {
    fn format(&self) -> TranscriptFormat {
        TranscriptFormat::Telegram
    }

    fn parse_str(&self, content: &str) -> Result<Transcript> {
        let export: Value = serde_json::from_str(content)?;

        let records = export
            .get("messages")
            .and_then(Value::as_array)
            .ok_or_else(|| Self::parse_error("export has no `messages` array".to_string()))?;

        let mut warnings = Vec::new();
        let messages = records
            .iter()
            .enumerate()
            .map(|(position, record)| Self::parse_record(position, record, &mut warnings))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            messages = messages.len(),
            warnings = warnings.len(),
            "Parsed Telegram export"
        );

        Ok(Transcript {
            name: export.get("name").and_then(Value::as_str).map(str::to_string),
            messages,
            warnings,
        })
    }
}
