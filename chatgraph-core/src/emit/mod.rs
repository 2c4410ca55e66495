//! Graph emission
//!
//! Writes an [`InteractionGraph`] as a serializable [`GraphDocument`],
//! either as pretty JSON or as a standalone HTML page rendered by
//! vis-network in the browser.

mod html;

pub use html::render_html;

use crate::error::{Error, Result};
use crate::graph::InteractionGraph;
use crate::stats::ChatStats;
use crate::types::Transcript;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
}

impl OutputFormat {
    /// Infer the format from a file extension (`.html`/`.htm`, `.json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "html" | "htm" => Some(OutputFormat::Html),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// A rendered node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentNode {
    pub id: String,
    /// Display name, or the id when the name is empty
    pub label: String,
    /// Activity value
    pub value: u64,
    pub color: String,
}

/// A rendered directed edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEdge {
    pub from: String,
    pub to: String,
    pub weight: u64,
}

/// Summary information about the run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentMeta {
    pub chat_name: Option<String>,
    pub participants: usize,
    pub interactions: usize,
    pub top_n: Option<usize>,
    pub first_message_at: Option<NaiveDateTime>,
    pub last_message_at: Option<NaiveDateTime>,
}

/// Everything an emitter needs to draw the graph.
#[derive(Debug, Clone, Serialize)]
pub struct GraphDocument {
    pub meta: DocumentMeta,
    pub nodes: Vec<DocumentNode>,
    pub edges: Vec<DocumentEdge>,
}

impl GraphDocument {
    pub fn new(graph: &InteractionGraph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|n| DocumentNode {
                id: n.participant.id.clone(),
                label: n.participant.label().to_string(),
                value: n.activity,
                color: n.color.clone(),
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|e| DocumentEdge {
                from: e.responder.clone(),
                to: e.original_author.clone(),
                weight: e.weight,
            })
            .collect();

        Self {
            meta: DocumentMeta {
                participants: graph.nodes.len(),
                interactions: graph.interactions.edges().len(),
                top_n: graph.top_n,
                ..Default::default()
            },
            nodes,
            edges,
        }
    }

    /// Attach chat name and time span from the source transcript.
    pub fn with_transcript(mut self, transcript: &Transcript) -> Self {
        self.meta.chat_name = transcript.name.clone();
        if let Some((first, last)) = transcript.span() {
            self.meta.first_message_at = Some(first);
            self.meta.last_message_at = Some(last);
        }
        self
    }
}

/// Write `doc` as pretty-printed JSON.
pub fn write_json(doc: &GraphDocument, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Write `doc` as a standalone HTML page.
pub fn write_html(doc: &GraphDocument, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, render_html(doc)?)?;
    Ok(())
}

/// Write text statistics as pretty-printed JSON.
pub fn write_stats(stats: &ChatStats, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(stats)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Saved statistics");
    Ok(())
}

/// Write `doc` to `path` in the given format.
pub fn write(doc: &GraphDocument, path: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Html => write_html(doc, path)?,
        OutputFormat::Json => write_json(doc, path)?,
    }
    tracing::info!(path = %path.display(), %format, "Saved graph");
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
