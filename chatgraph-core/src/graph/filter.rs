//! Top-N edge filter
//!
//! Scores each participant by the summed weight of every edge they appear
//! on (either direction; a self-loop counts for both ends), keeps the N
//! highest scorers and retains only edges touching at least one of them.
//! Equal scores keep the order in which participants were first encountered
//! while walking the edges.

use super::aggregate::InteractionEdge;
use crate::types::ParticipantId;
use std::collections::{HashMap, HashSet};

/// Undirected interaction score per participant, in encounter order.
pub fn interaction_scores(edges: &[InteractionEdge]) -> Vec<(ParticipantId, u64)> {
    let mut scores: Vec<(ParticipantId, u64)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for edge in edges {
        for endpoint in [&edge.responder, &edge.original_author] {
            match positions.get(endpoint.as_str()) {
                Some(&pos) => scores[pos].1 += edge.weight,
                None => {
                    positions.insert(endpoint.as_str(), scores.len());
                    scores.push((endpoint.clone(), edge.weight));
                }
            }
        }
    }

    scores
}

/// The `n` participants with the highest interaction score.
///
/// Fewer than `n` are returned when fewer participants have edges.
pub fn top_participants(edges: &[InteractionEdge], n: usize) -> Vec<ParticipantId> {
    let mut scores = interaction_scores(edges);
    // Stable: ties stay in encounter order.
    scores.sort_by(|a, b| b.1.cmp(&a.1));
    scores.into_iter().take(n).map(|(id, _)| id).collect()
}

/// Edges to render. `None` keeps everything.
pub fn filter_edges(edges: &[InteractionEdge], top_n: Option<usize>) -> Vec<InteractionEdge> {
    let Some(n) = top_n else {
        return edges.to_vec();
    };

    let selected: HashSet<ParticipantId> = top_participants(edges, n).into_iter().collect();
    tracing::info!(top_n = n, selected = selected.len(), "Filtering by top participants");

    edges
        .iter()
        .filter(|e| selected.contains(&e.responder) || selected.contains(&e.original_author))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, weight: u64) -> InteractionEdge {
        InteractionEdge {
            responder: from.to_string(),
            original_author: to.to_string(),
            weight,
        }
    }

    fn hub_edges() -> Vec<InteractionEdge> {
        vec![
            edge("a", "hub", 2),
            edge("b", "hub", 2),
            edge("hub", "a", 1),
            edge("a", "b", 1),
        ]
    }

    #[test]
    fn test_interaction_scores() {
        let scores = interaction_scores(&hub_edges());
        assert_eq!(
            scores,
            vec![
                ("a".to_string(), 4),
                ("hub".to_string(), 5),
                ("b".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_self_loop_scores_both_ends() {
        let scores = interaction_scores(&[edge("a", "a", 3)]);
        assert_eq!(scores, vec![("a".to_string(), 6)]);
    }

    #[test]
    fn test_top_one_keeps_hub_edges() {
        let kept = filter_edges(&hub_edges(), Some(1));
        assert_eq!(kept.len(), 3);
        assert!(kept.iter().all(|e| e.touches("hub")));
        assert!(!kept.contains(&edge("a", "b", 1)));
    }

    #[test]
    fn test_ties_follow_encounter_order() {
        let edges = vec![edge("x", "y", 1), edge("z", "w", 1)];
        assert_eq!(top_participants(&edges, 1), vec!["x".to_string()]);
        assert_eq!(
            top_participants(&edges, 3),
            vec!["x".to_string(), "y".to_string(), "z".to_string()]
        );
    }

    #[test]
    fn test_large_n_and_none_keep_everything() {
        let edges = hub_edges();
        assert_eq!(filter_edges(&edges, None), edges);
        assert_eq!(filter_edges(&edges, Some(3)), edges);
        assert_eq!(filter_edges(&edges, Some(100)), edges);
    }

    #[test]
    fn test_zero_keeps_nothing() {
        assert!(filter_edges(&hub_edges(), Some(0)).is_empty());
    }
}
