//! Interaction graph construction
//!
//! Turns a transcript's messages into a directed, weighted reply graph:
//!
//! 1. [`registry`]: participants in first-appearance order, decorated names stripped
//! 2. [`resolver`]: message id to author index, reply resolution
//! 3. [`aggregate`]: directed edge weights and per-participant totals
//! 4. [`rank`]: activity values and the red-to-blue color assignment
//! 5. [`filter`]: optional top-N restriction of rendered edges
//!
//! [`builder::GraphBuilder`] drives steps 1-3 in a single forward pass and
//! runs 4-5 in [`builder::GraphBuilder::finish`].

pub mod aggregate;
pub mod builder;
pub mod filter;
pub mod rank;
pub mod registry;
pub mod resolver;

pub use aggregate::{InteractionAggregator, InteractionEdge};
pub use builder::{build_graph, BuildStats, GraphBuilder, GraphNode, InteractionGraph};
pub use filter::{filter_edges, interaction_scores, top_participants};
pub use rank::{activity_value, red_to_blue, ActivityRanking};
pub use registry::{strip_decorations, ParticipantRegistry};
pub use resolver::{MessageAuthorIndex, Resolution, ResolvedReply};
