//! Interaction aggregation
//!
//! Accumulates directed reply counts per (responder, original author) pair
//! and a per-participant interaction total. One reply credits both ends
//! once; a self-reply credits the same participant twice.

use super::resolver::ResolvedReply;
use crate::types::ParticipantId;
use serde::Serialize;
use std::collections::HashMap;

/// Directed, weighted reply relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionEdge {
    pub responder: ParticipantId,
    pub original_author: ParticipantId,
    /// Number of times `responder` replied to `original_author`
    pub weight: u64,
}

impl InteractionEdge {
    /// Whether `id` is either endpoint.
    pub fn touches(&self, id: &str) -> bool {
        self.responder == id || self.original_author == id
    }

    pub fn is_self_loop(&self) -> bool {
        self.responder == self.original_author
    }
}

/// Edge weights in first-insertion order plus interaction totals.
#[derive(Debug, Default, Clone)]
pub struct InteractionAggregator {
    edges: Vec<InteractionEdge>,
    positions: HashMap<(ParticipantId, ParticipantId), usize>,
    totals: HashMap<ParticipantId, u64>,
}

impl InteractionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, reply: &ResolvedReply) {
        let key = (reply.responder.clone(), reply.original_author.clone());
        match self.positions.get(&key) {
            Some(&pos) => self.edges[pos].weight += 1,
            None => {
                self.positions.insert(key, self.edges.len());
                self.edges.push(InteractionEdge {
                    responder: reply.responder.clone(),
                    original_author: reply.original_author.clone(),
                    weight: 1,
                });
            }
        }

        *self.totals.entry(reply.responder.clone()).or_insert(0) += 1;
        *self
            .totals
            .entry(reply.original_author.clone())
            .or_insert(0) += 1;
    }

    /// Weight of the directed edge `responder -> original_author`, 0 if absent.
    pub fn weight(&self, responder: &str, original_author: &str) -> u64 {
        self.positions
            .get(&(responder.to_string(), original_author.to_string()))
            .map_or(0, |&pos| self.edges[pos].weight)
    }

    /// Interaction total for a participant, `None` if they never interacted.
    pub fn total(&self, id: &str) -> Option<u64> {
        self.totals.get(id).copied()
    }

    /// Edges in the order their pair was first seen.
    pub fn edges(&self) -> &[InteractionEdge] {
        &self.edges
    }

    pub fn totals(&self) -> &HashMap<ParticipantId, u64> {
        &self.totals
    }
}
