//! JSON Lines transcript parser
//!
//! Each non-blank line is one canonical message record:
//!
//! ```json
//! {"id": 1, "kind": "message", "author_id": "u1", "author_name": "Alice"}
//! {"id": 2, "kind": "message", "author_id": "u2", "reply_to": 1, "sent_at": "2024-03-01T09:01:00"}
//! {"id": 3, "kind": "message", "author_id": "u1", "text": "see you tomorrow"}
//! ```
//!
//! Only `id` and `kind` are required. Unlike the Telegram parser there is
//! no leniency: a line that does not deserialize fails the whole parse.

use crate::error::{Error, Result};
use crate::ingest::TranscriptParser;
use crate::types::{Message, MessageId, MessageKind, Transcript, TranscriptFormat};
use chrono::NaiveDateTime;
use serde::Deserialize;

/// Parser for JSON Lines transcripts.
#[derive(Debug, Default)]
pub struct JsonLinesParser;

impl JsonLinesParser {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Deserialize)]
struct MessageRecord {
    id: MessageId,
    kind: String,
    #[serde(default)]
    author_id: Option<String>,
    #[serde(default)]
    author_name: Option<String>,
    #[serde(default)]
    reply_to: Option<MessageId>,
    #[serde(default)]
    sent_at: Option<NaiveDateTime>,
    #[serde(default)]
    text: Option<String>,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Message {
            id: record.id,
            kind: MessageKind::from_tag(&record.kind),
            author_id: record.author_id,
            author_name: record.author_name,
            reply_to: record.reply_to,
            sent_at: record.sent_at,
            text: record.text,
        }
    }
}

impl TranscriptParser for JsonLinesParser {
    fn format(&self) -> TranscriptFormat {
        TranscriptFormat::JsonLines
    }

    fn parse_str(&self, content: &str) -> Result<Transcript> {
        let mut messages = Vec::new();

        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: MessageRecord =
                serde_json::from_str(line).map_err(|e| Error::Parse {
                    format: self.format().to_string(),
                    message: format!("line {}: {}", index + 1, e),
                })?;
            messages.push(record.into());
        }

        tracing::debug!(messages = messages.len(), "Parsed JSON Lines transcript");

        Ok(Transcript {
            name: None,
            messages,
            warnings: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines() {
        let content = r#"
{"id": 1, "kind": "message", "author_id": "u1", "author_name": "Alice"}

{"id": 2, "kind": "message", "author_id": "u2", "reply_to": 1, "sent_at": "2024-03-01T09:01:00"}
{"id": 3, "kind": "service"}
{"id": 4, "kind": "message", "author_id": "u1", "text": "see you tomorrow"}
"#;
        let transcript = JsonLinesParser::new().parse_str(content).unwrap();

        assert_eq!(transcript.messages.len(), 4);
        assert_eq!(transcript.messages[0].author_name.as_deref(), Some("Alice"));
        assert_eq!(transcript.messages[1].reply_to, Some(1));
        assert!(transcript.messages[1].sent_at.is_some());
        assert_eq!(transcript.messages[2].kind, MessageKind::Service);
        assert_eq!(transcript.messages[2].author_id, None);
        assert_eq!(transcript.messages[3].text.as_deref(), Some("see you tomorrow"));
    }

    #[test]
    fn test_missing_id_names_the_line() {
        let content = "{\"id\": 1, \"kind\": \"message\"}\n{\"kind\": \"message\"}\n";
        let err = JsonLinesParser::new().parse_str(content).unwrap_err();

        match err {
            Error::Parse { message, .. } => assert!(message.starts_with("line 2")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
