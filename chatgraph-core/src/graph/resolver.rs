//! Reply resolution
//!
//! The [`MessageAuthorIndex`] remembers who wrote every real message seen so
//! far. A reply is resolved against that index at the moment it is visited,
//! so a reply to a message that appears later in the transcript (or not at
//! all, e.g. a truncated export) is dropped.

use crate::types::{Message, MessageId, ParticipantId};
use std::collections::HashMap;

/// A reply whose responder and original author are both known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReply {
    pub responder: ParticipantId,
    pub original_author: ParticipantId,
}

/// Outcome of resolving one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The message does not reply to anything
    NotAReply,
    Resolved(ResolvedReply),
    /// The target was never indexed, or was indexed without an author
    MissingTarget(MessageId),
    /// The reply itself carries no author
    MissingResponder,
}

/// Message id to author id, built incrementally during the forward pass.
#[derive(Debug, Default)]
pub struct MessageAuthorIndex {
    authors: HashMap<MessageId, Option<ParticipantId>>,
}

impl MessageAuthorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the author of a real message. A repeated id overwrites the
    /// earlier entry, so lookups return the last known author.
    pub fn record(&mut self, message: &Message) {
        if message.kind.is_message() {
            self.authors.insert(message.id, message.author_id.clone());
        }
    }

    /// Author of an indexed message, if it had one.
    pub fn author_of(&self, id: MessageId) -> Option<&ParticipantId> {
        self.authors.get(&id).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Resolve `message` into a (responder, original author) pair.
    pub fn resolve(&self, message: &Message) -> Resolution {
        let Some(target) = message.reply_to else {
            return Resolution::NotAReply;
        };
        let Some(responder) = message.author_id.as_ref() else {
            return Resolution::MissingResponder;
        };
        match self.author_of(target) {
            Some(original_author) => Resolution::Resolved(ResolvedReply {
                responder: responder.clone(),
                original_author: original_author.clone(),
            }),
            None => Resolution::MissingTarget(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageKind;

    #[test]
    fn test_resolves_against_indexed_author() {
        let mut index = MessageAuthorIndex::new();
        index.record(&Message::new(1, "alice"));

        let reply = Message::new(2, "bob").replying_to(1);
        assert_eq!(
            index.resolve(&reply),
            Resolution::Resolved(ResolvedReply {
                responder: "bob".into(),
                original_author: "alice".into(),
            })
        );
    }

    #[test]
    fn test_forward_reference_is_unresolved() {
        let mut index = MessageAuthorIndex::new();
        let reply = Message::new(1, "bob").replying_to(2);
        assert_eq!(index.resolve(&reply), Resolution::MissingTarget(2));

        // Indexing the target afterwards does not retroactively help the
        // earlier visit; the caller never revisits.
        index.record(&Message::new(2, "alice"));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_service_messages_are_not_indexed() {
        let mut index = MessageAuthorIndex::new();
        index.record(&Message::new(1, "alice").with_kind(MessageKind::Service));
        assert!(index.is_empty());

        let reply = Message::new(2, "bob").replying_to(1);
        assert_eq!(index.resolve(&reply), Resolution::MissingTarget(1));
    }

    #[test]
    fn test_authorless_target_is_a_lookup_miss() {
        let mut index = MessageAuthorIndex::new();
        let mut anonymous = Message::new(1, "ghost");
        anonymous.author_id = None;
        index.record(&anonymous);

        assert_eq!(index.len(), 1);
        assert_eq!(index.author_of(1), None);
        let reply = Message::new(2, "bob").replying_to(1);
        assert_eq!(index.resolve(&reply), Resolution::MissingTarget(1));
    }

    #[test]
    fn test_authorless_reply() {
        let mut index = MessageAuthorIndex::new();
        index.record(&Message::new(1, "alice"));

        let mut reply = Message::new(2, "x").replying_to(1);
        reply.author_id = None;
        assert_eq!(index.resolve(&reply), Resolution::MissingResponder);
    }

    #[test]
    fn test_duplicate_id_uses_last_known_author() {
        let mut index = MessageAuthorIndex::new();
        index.record(&Message::new(1, "alice"));
        index.record(&Message::new(1, "carol"));

        assert_eq!(index.author_of(1).map(String::as_str), Some("carol"));
    }

    #[test]
    fn test_plain_message_is_not_a_reply() {
        let index = MessageAuthorIndex::new();
        assert_eq!(index.resolve(&Message::new(1, "a")), Resolution::NotAReply);
    }
}
