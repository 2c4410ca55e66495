//! # chatgraph-core
//!
//! Core library for chatgraph - a chat interaction graph builder.
//!
//! This library provides:
//! - Domain types for messages, participants and transcripts
//! - Transcript parsers (Telegram JSON export, JSON Lines)
//! - The interaction graph builder, activity ranking and top-N filter
//! - JSON and HTML graph emitters
//! - Word-frequency and participant statistics
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Pipeline
//!
//! Data flows strictly forward:
//! - **Ingest:** transcript file to [`Message`] sequence
//! - **Build:** one pass registers participants, resolves replies, aggregates interactions
//! - **Rank:** activity values, red-to-blue colors, optional top-N edge filter
//! - **Emit:** [`emit::GraphDocument`] written as JSON or HTML
//!
//! ## Example
//!
//! ```rust,no_run
//! use chatgraph_core::emit::{self, GraphDocument, OutputFormat};
//! use chatgraph_core::{build_graph, ingest, TranscriptFormat};
//! use std::path::Path;
//!
//! let transcript = ingest::load_transcript(Path::new("result.json"), TranscriptFormat::Telegram)
//!     .expect("failed to load transcript");
//! let graph = build_graph(&transcript.messages, Some(20));
//! let doc = GraphDocument::new(&graph).with_transcript(&transcript);
//! emit::write(&doc, Path::new("graph.html"), OutputFormat::Html).expect("failed to write graph");
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use graph::{build_graph, GraphBuilder, InteractionGraph};
pub use types::*;

// Public modules
pub mod config;
pub mod emit;
pub mod error;
pub mod graph;
pub mod ingest;
pub mod logging;
pub mod stats;
pub mod types;
