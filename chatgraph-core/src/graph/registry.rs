//! Participant registry
//!
//! Registers every author of a real message exactly once, in order of first
//! appearance. The display name seen first is kept for the rest of the run,
//! even if the author renames themselves mid-transcript.

use crate::types::{Message, Participant, ParticipantId};
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Participants in first-appearance order.
#[derive(Debug, Default)]
pub struct ParticipantRegistry {
    participants: Vec<Participant>,
    positions: HashMap<ParticipantId, usize>,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the author of `message` if it is a real message by an author
    /// not seen before. Returns `true` when a participant was added.
    pub fn observe(&mut self, message: &Message) -> bool {
        if !message.kind.is_message() {
            return false;
        }
        let Some(author_id) = message.author_id.as_ref() else {
            return false;
        };
        if self.positions.contains_key(author_id) {
            return false;
        }

        let display_name = message
            .author_name
            .as_deref()
            .map(strip_decorations)
            .unwrap_or_default();

        tracing::trace!(
            participant = %author_id,
            display_name = %display_name,
            "Registered participant"
        );

        self.positions.insert(author_id.clone(), self.participants.len());
        self.participants.push(Participant {
            id: author_id.clone(),
            display_name,
        });
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.positions.get(id).map(|&pos| &self.participants[pos])
    }

    /// Participants in first-appearance order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn into_participants(self) -> Vec<Participant> {
        self.participants
    }
}

/// Remove emoji from a display name.
///
/// Works on extended grapheme clusters so flag pairs, keycaps, ZWJ
/// sequences and skin-tone variants go as a whole. Symbols that are not
/// emoji (★, ✓, ⌘) are kept. Surrounding whitespace left behind is trimmed.
pub fn strip_decorations(name: &str) -> String {
    name.graphemes(true)
        .filter(|g| !is_emoji(g))
        .collect::<String>()
        .trim()
        .to_string()
}

fn is_emoji(grapheme: &str) -> bool {
    if emojis::get(grapheme).is_some() {
        return true;
    }
    // Retry without presentation selectors and skin-tone modifiers.
    let base: String = grapheme.chars().filter(|&c| !is_modifier(c)).collect();
    !base.is_empty() && base != grapheme && emojis::get(&base).is_some()
}

fn is_modifier(c: char) -> bool {
    matches!(c as u32, 0xFE0E | 0xFE0F | 0x1F3FB..=0x1F3FF)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageKind;

    #[test]
    fn test_strip_decorations() {
        assert_eq!(strip_decorations("Alice 🔥"), "Alice");
        assert_eq!(strip_decorations("⭐ Bob ⭐"), "Bob");
        assert_eq!(strip_decorations("👩‍💻 Dev"), "Dev");
        assert_eq!(strip_decorations("Ali 🇮🇷"), "Ali");
        assert_eq!(strip_decorations("👍🏽"), "");
        assert_eq!(strip_decorations("علی رضایی"), "علی رضایی");
        assert_eq!(strip_decorations("plain"), "plain");
        assert_eq!(strip_decorations("Team 1️⃣"), "Team");
        assert_eq!(strip_decorations("Hash #️⃣"), "Hash");
        assert_eq!(strip_decorations("Road ↔️"), "Road");
    }

    #[test]
    fn test_strip_decorations_keeps_non_emoji_symbols() {
        assert_eq!(strip_decorations("Sara ★"), "Sara ★");
        assert_eq!(strip_decorations("Done ✓"), "Done ✓");
        assert_eq!(strip_decorations("Mac ⌘"), "Mac ⌘");
        assert_eq!(strip_decorations("■ Box"), "■ Box");
    }

    #[test]
    fn test_first_seen_name_wins() {
        let mut registry = ParticipantRegistry::new();
        assert!(registry.observe(&Message::new(1, "u1").with_name("Alice 🌸")));
        assert!(!registry.observe(&Message::new(2, "u1").with_name("Alicia")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("u1").unwrap().display_name, "Alice");
    }

    #[test]
    fn test_skips_service_and_anonymous_records() {
        let mut registry = ParticipantRegistry::new();
        registry.observe(&Message::new(1, "u1").with_kind(MessageKind::Service));
        let mut anonymous = Message::new(2, "u2");
        anonymous.author_id = None;
        registry.observe(&anonymous);

        assert!(registry.is_empty());
    }

    #[test]
    fn test_missing_name_registers_with_empty_name() {
        let mut registry = ParticipantRegistry::new();
        registry.observe(&Message::new(1, "u9"));

        let participant = registry.get("u9").unwrap();
        assert_eq!(participant.display_name, "");
        assert_eq!(participant.label(), "u9");
    }

    #[test]
    fn test_first_appearance_order() {
        let mut registry = ParticipantRegistry::new();
        for (id, author) in [(1, "u3"), (2, "u1"), (3, "u3"), (4, "u2")] {
            registry.observe(&Message::new(id, author));
        }

        let ids: Vec<_> = registry.participants().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["u3", "u1", "u2"]);
        assert!(registry.contains("u2"));
        assert!(!registry.contains("u4"));
    }
}
