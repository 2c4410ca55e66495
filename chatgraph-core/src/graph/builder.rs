//! Single-pass interaction graph builder
//!
//! [`GraphBuilder`] is the mutable context of one run: it owns the
//! participant registry, the message author index and the interaction
//! aggregator. Messages are fed once, in transcript order, and
//! [`GraphBuilder::finish`] turns the accumulated state into an immutable
//! [`InteractionGraph`].

use super::aggregate::{InteractionAggregator, InteractionEdge};
use super::filter::filter_edges;
use super::rank::ActivityRanking;
use super::registry::ParticipantRegistry;
use super::resolver::{MessageAuthorIndex, Resolution};
use crate::types::{Message, Participant};
use serde::Serialize;

/// Counters collected during the forward pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Records visited
    pub messages: usize,
    /// Records carrying a reply reference
    pub replies: usize,
    /// Replies turned into an interaction
    pub resolved: usize,
    /// Replies whose target was not indexed (or had no author)
    pub unresolved_targets: usize,
    /// Replies without an author of their own
    pub anonymous_replies: usize,
}

/// A participant with its rank-derived attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    #[serde(flatten)]
    pub participant: Participant,
    /// Interaction total + 1
    pub activity: u64,
    /// Hex color from the activity gradient
    pub color: String,
}

/// The finished graph handed to an emitter.
#[derive(Debug, Clone)]
pub struct InteractionGraph {
    /// Nodes in first-appearance order
    pub nodes: Vec<GraphNode>,
    /// Edges to render: after top-N filtering, both endpoints registered
    pub edges: Vec<InteractionEdge>,
    /// Every resolved interaction, unfiltered
    pub interactions: InteractionAggregator,
    /// Activity values sorted descending
    pub sorted_activity: Vec<u64>,
    /// Top-N limit applied to `edges`, if any
    pub top_n: Option<usize>,
    pub stats: BuildStats,
}

impl InteractionGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.participant.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Mutable state of one forward pass over a transcript.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    registry: ParticipantRegistry,
    index: MessageAuthorIndex,
    interactions: InteractionAggregator,
    stats: BuildStats,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process the next message in transcript order.
    ///
    /// Registration and indexing happen before reply resolution, so a
    /// message that replies to its own id resolves as a self-reply.
    pub fn observe(&mut self, message: &Message) {
        self.stats.messages += 1;
        self.registry.observe(message);
        self.index.record(message);

        match self.index.resolve(message) {
            Resolution::NotAReply => {}
            Resolution::Resolved(reply) => {
                self.stats.replies += 1;
                self.stats.resolved += 1;
                self.interactions.record(&reply);
            }
            Resolution::MissingTarget(target) => {
                self.stats.replies += 1;
                self.stats.unresolved_targets += 1;
                tracing::trace!(
                    message_id = message.id,
                    reply_to = target,
                    "Reply target not indexed"
                );
            }
            Resolution::MissingResponder => {
                self.stats.replies += 1;
                self.stats.anonymous_replies += 1;
                tracing::trace!(message_id = message.id, "Reply without author");
            }
        }
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn interactions(&self) -> &InteractionAggregator {
        &self.interactions
    }

    /// Rank, color and filter the accumulated state.
    pub fn finish(self, top_n: Option<usize>) -> InteractionGraph {
        let stats = self.stats;
        if stats.unresolved_targets + stats.anonymous_replies > 0 {
            tracing::warn!(
                unresolved_targets = stats.unresolved_targets,
                anonymous_replies = stats.anonymous_replies,
                "Dropped replies that could not be resolved"
            );
        }

        let ranking = ActivityRanking::compute(
            self.registry.participants(),
            self.interactions.totals(),
        );

        let mut edges = filter_edges(self.interactions.edges(), top_n);
        edges.retain(|e| {
            self.registry.contains(&e.responder) && self.registry.contains(&e.original_author)
        });

        let ActivityRanking {
            values,
            sorted_values,
            colors,
            ..
        } = ranking;

        let nodes = self
            .registry
            .into_participants()
            .into_iter()
            .zip(values)
            .zip(colors)
            .map(|((participant, activity), color)| GraphNode {
                participant,
                activity,
                color,
            })
            .collect::<Vec<_>>();

        tracing::info!(
            participants = nodes.len(),
            interactions = self.interactions.edges().len(),
            rendered_edges = edges.len(),
            "Interaction graph built"
        );

        InteractionGraph {
            nodes,
            edges,
            interactions: self.interactions,
            sorted_activity: sorted_values,
            top_n,
            stats,
        }
    }
}

/// Build the interaction graph for a whole transcript in one call.
pub fn build_graph(messages: &[Message], top_n: Option<usize>) -> InteractionGraph {
    let mut builder = GraphBuilder::new();
    for message in messages {
        builder.observe(message);
    }
    builder.finish(top_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MessageKind;
    use std::collections::HashSet;

    fn hub_transcript() -> Vec<Message> {
        vec![
            Message::new(1, "hub").with_name("Hub"),
            Message::new(2, "a").with_name("A").replying_to(1),
            Message::new(3, "a").replying_to(1),
            Message::new(4, "b").with_name("B").replying_to(1),
            Message::new(5, "b").replying_to(1),
            Message::new(6, "hub").replying_to(2),
            Message::new(7, "b"),
            Message::new(8, "a").replying_to(7),
        ]
    }

    #[test]
    fn test_two_person_exchange() {
        let messages = vec![
            Message::new(1, "A"),
            Message::new(2, "B").replying_to(1),
            Message::new(3, "A").replying_to(2),
        ];
        let graph = build_graph(&messages, None);

        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.interactions.weight("B", "A"), 1);
        assert_eq!(graph.interactions.weight("A", "B"), 1);
        assert_eq!(graph.interactions.total("A"), Some(2));
        assert_eq!(graph.interactions.total("B"), Some(2));
        assert_eq!(graph.node("A").unwrap().activity, 3);
        assert_eq!(graph.node("B").unwrap().activity, 3);
        // Equal values share the color of the lower-ranked position.
        assert_eq!(graph.node("A").unwrap().color, "#800080");
        assert_eq!(graph.node("B").unwrap().color, "#800080");
        assert_eq!(graph.edges.len(), 2);
    }

    #[test]
    fn test_unresolvable_reply_is_dropped() {
        crate::logging::init_test();
        let messages = vec![
            Message::new(1, "A"),
            Message::new(2, "B").replying_to(99),
        ];
        let graph = build_graph(&messages, None);

        assert!(graph.interactions.edges().is_empty());
        assert!(graph.interactions.totals().is_empty());
        assert_eq!(graph.stats.replies, 1);
        assert_eq!(graph.stats.unresolved_targets, 1);
        assert!(graph.nodes.iter().all(|n| n.activity == 1));
    }

    #[test]
    fn test_reply_to_later_message_is_dropped() {
        let messages = vec![
            Message::new(1, "A").replying_to(2),
            Message::new(2, "B"),
        ];
        let graph = build_graph(&messages, None);
        assert!(graph.interactions.edges().is_empty());
        assert_eq!(graph.stats.unresolved_targets, 1);
    }

    #[test]
    fn test_self_reply_counts_twice() {
        let messages = vec![
            Message::new(1, "A"),
            Message::new(2, "A").replying_to(1),
        ];
        let graph = build_graph(&messages, None);

        assert_eq!(graph.interactions.weight("A", "A"), 1);
        assert_eq!(graph.node("A").unwrap().activity, 3);
        assert_eq!(graph.edges.len(), 1);
    }

    #[test]
    fn test_participant_count_matches_distinct_authors() {
        let mut service = Message::new(5, "svc").with_kind(MessageKind::Service);
        service.author_name = Some("Service".into());
        let mut anonymous = Message::new(6, "x");
        anonymous.author_id = None;

        let mut messages = hub_transcript();
        messages.push(service);
        messages.push(anonymous);

        let expected: HashSet<_> = messages
            .iter()
            .filter(|m| m.kind.is_message())
            .filter_map(|m| m.author_id.clone())
            .collect();

        let graph = build_graph(&messages, None);
        assert_eq!(graph.nodes.len(), expected.len());
        assert!(graph.nodes.iter().all(|n| n.activity >= 1));
    }

    #[test]
    fn test_top_one_keeps_hub_edges() {
        let graph = build_graph(&hub_transcript(), Some(1));

        let pairs: Vec<_> = graph
            .edges
            .iter()
            .map(|e| (e.responder.as_str(), e.original_author.as_str()))
            .collect();
        assert_eq!(pairs, vec![("a", "hub"), ("b", "hub"), ("hub", "a")]);
        // Aggregation is unaffected by filtering.
        assert_eq!(graph.interactions.weight("a", "b"), 1);
    }

    #[test]
    fn test_top_n_at_least_participant_count_is_unfiltered() {
        let unfiltered = build_graph(&hub_transcript(), None);
        for n in [3, 4, 50] {
            let filtered = build_graph(&hub_transcript(), Some(n));
            assert_eq!(filtered.edges, unfiltered.edges);
        }
    }

    #[test]
    fn test_rebuild_is_identical() {
        let first = build_graph(&hub_transcript(), Some(2));
        let second = build_graph(&hub_transcript(), Some(2));

        assert_eq!(first.nodes, second.nodes);
        assert_eq!(first.edges, second.edges);
        assert_eq!(first.sorted_activity, second.sorted_activity);
        assert_eq!(first.stats, second.stats);
    }

    #[test]
    fn test_service_reply_is_counted_but_not_rendered() {
        let messages = vec![
            Message::new(1, "A"),
            Message::new(2, "bot")
                .with_kind(MessageKind::Service)
                .replying_to(1),
        ];
        let graph = build_graph(&messages, None);

        assert_eq!(graph.interactions.weight("bot", "A"), 1);
        assert_eq!(graph.node("A").unwrap().activity, 2);
        assert!(graph.node("bot").is_none());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_empty_transcript() {
        let graph = build_graph(&[], Some(3));
        assert!(graph.is_empty());
        assert!(graph.edges.is_empty());
        assert!(graph.sorted_activity.is_empty());
    }

    #[test]
    fn test_builder_exposes_pass_state() {
        let mut builder = GraphBuilder::new();
        builder.observe(&Message::new(1, "A"));
        builder.observe(&Message::new(2, "B").replying_to(1));

        assert_eq!(builder.registry().len(), 2);
        assert_eq!(builder.interactions().weight("B", "A"), 1);
    }
}
