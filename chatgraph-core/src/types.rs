//! Core domain types for chatgraph
//!
//! These types represent the canonical message model that every transcript
//! format is normalized into before the interaction graph is built.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Message** | One record of a chat transcript, real or service event |
//! | **Participant** | A chat author with at least one authored real message |
//! | **Reply edge** | Participant X replied to a message last known to be authored by Y |
//! | **Activity value** | A participant's total interaction count plus one |

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Identifier of a message inside one transcript.
pub type MessageId = i64;

/// Identifier of a chat author (e.g. `user123456` in Telegram exports).
pub type ParticipantId = String;

// ============================================
// Messages
// ============================================

/// Tag distinguishing real user messages from service events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// A message typed by a participant
    Message,
    /// Service event (joins, pins, calls, title changes)
    Service,
    /// Any other tag, preserved verbatim
    Other(String),
}

impl MessageKind {
    /// Map a transcript type tag to a kind.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "message" => MessageKind::Message,
            "service" => MessageKind::Service,
            other => MessageKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Message => "message",
            MessageKind::Service => "service",
            MessageKind::Other(tag) => tag,
        }
    }

    /// Whether this record is a real participant message.
    pub fn is_message(&self) -> bool {
        matches!(self, MessageKind::Message)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single transcript record, normalized across input formats.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Unique identifier within the transcript
    pub id: MessageId,
    /// Real message or service event
    pub kind: MessageKind,
    /// Author identifier (absent for some service events)
    pub author_id: Option<ParticipantId>,
    /// Author display name as exported (may contain emoji, may be absent)
    pub author_name: Option<String>,
    /// Identifier of the message this one replies to
    pub reply_to: Option<MessageId>,
    /// When the message was sent, in the exporter's local time
    pub sent_at: Option<NaiveDateTime>,
    /// Plain text body, formatting entities flattened
    pub text: Option<String>,
}

impl Message {
    /// Create a real message authored by `author_id`.
    pub fn new(id: MessageId, author_id: impl Into<ParticipantId>) -> Self {
        Self {
            id,
            kind: MessageKind::Message,
            author_id: Some(author_id.into()),
            author_name: None,
            reply_to: None,
            sent_at: None,
            text: None,
        }
    }

    /// Set the author display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.author_name = Some(name.into());
        self
    }

    /// Mark this message as a reply to `target`.
    pub fn replying_to(mut self, target: MessageId) -> Self {
        self.reply_to = Some(target);
        self
    }

    /// Set the plain text body.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Override the message kind.
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self
    }
}

// ============================================
// Participants
// ============================================

/// A chat author registered from the transcript.
///
/// Created the first time a real message by this author is seen; the
/// display name from that first message is kept for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Display name with emoji and other decorative characters removed.
    /// Empty when the export carried no name.
    pub display_name: String,
}

impl Participant {
    /// Label for rendering: the display name, or the id when the name is empty.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.id
        } else {
            &self.display_name
        }
    }
}

// ============================================
// Transcripts
// ============================================

/// Supported transcript formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum TranscriptFormat {
    /// Telegram Desktop JSON export (`result.json`)
    #[default]
    #[serde(rename = "telegram")]
    Telegram,
    /// One canonical message record per line
    #[serde(rename = "jsonl")]
    JsonLines,
}

impl TranscriptFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranscriptFormat::Telegram => "telegram",
            TranscriptFormat::JsonLines => "jsonl",
        }
    }
}

impl fmt::Display for TranscriptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranscriptFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "telegram" => Ok(TranscriptFormat::Telegram),
            "jsonl" => Ok(TranscriptFormat::JsonLines),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// A fully loaded transcript.
#[derive(Debug, Default)]
pub struct Transcript {
    /// Chat name, when the format carries one
    pub name: Option<String>,
    /// Messages in transcript order
    pub messages: Vec<Message>,
    /// Non-fatal problems found while parsing
    pub warnings: Vec<String>,
}

impl Transcript {
    /// First and last message timestamps, if any message carries one.
    pub fn span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let mut stamps = self.messages.iter().filter_map(|m| m.sent_at);
        let first = stamps.next()?;
        Some(stamps.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_message_kind_tags() {
        assert_eq!(MessageKind::from_tag("message"), MessageKind::Message);
        assert_eq!(MessageKind::from_tag("service"), MessageKind::Service);
        assert_eq!(
            MessageKind::from_tag("sticker"),
            MessageKind::Other("sticker".to_string())
        );
        assert!(MessageKind::Message.is_message());
        assert!(!MessageKind::Service.is_message());
        assert_eq!(MessageKind::Other("x".into()).to_string(), "x");
    }

    #[test]
    fn test_participant_label_falls_back_to_id() {
        let named = Participant {
            id: "user1".into(),
            display_name: "Alice".into(),
        };
        let unnamed = Participant {
            id: "user2".into(),
            display_name: String::new(),
        };
        assert_eq!(named.label(), "Alice");
        assert_eq!(unnamed.label(), "user2");
    }

    #[test]
    fn test_transcript_format_from_str() {
        assert_eq!(
            "telegram".parse::<TranscriptFormat>().unwrap(),
            TranscriptFormat::Telegram
        );
        assert_eq!(
            "jsonl".parse::<TranscriptFormat>().unwrap(),
            TranscriptFormat::JsonLines
        );
        assert!("whatsapp".parse::<TranscriptFormat>().is_err());
    }

    #[test]
    fn test_transcript_span() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let early = day.and_hms_opt(9, 0, 0).unwrap();
        let late = day.and_hms_opt(18, 30, 0).unwrap();

        let mut a = Message::new(1, "user1");
        a.sent_at = Some(late);
        let b = Message::new(2, "user2");
        let mut c = Message::new(3, "user1");
        c.sent_at = Some(early);

        let transcript = Transcript {
            messages: vec![a, b, c],
            ..Default::default()
        };
        assert_eq!(transcript.span(), Some((early, late)));
        assert_eq!(Transcript::default().span(), None);
    }
}
