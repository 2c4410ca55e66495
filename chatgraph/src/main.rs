//! chatgraph - build a reply interaction graph from a chat export
//!
//! Reads a transcript, works out who replied to whom, ranks participants by
//! interaction volume and writes the graph as HTML or JSON. With `--stats`
//! it also writes word-frequency and per-participant message counts.

use anyhow::{Context, Result};
use chatgraph_core::config::GraphConfig;
use chatgraph_core::emit::{self, GraphDocument, OutputFormat};
use chatgraph_core::stats::{self, Stopwords};
use chatgraph_core::{build_graph, ingest, Config, TranscriptFormat};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chatgraph")]
#[command(about = "Build a reply interaction graph from a chat export")]
#[command(version)]
struct Args {
    /// Path to the chat export (Telegram result.json or JSON Lines)
    #[arg(long)]
    chat_json: PathBuf,

    /// Path of the graph file to write
    #[arg(long)]
    output: PathBuf,

    /// Only keep edges touching the N most active participants
    #[arg(long)]
    top_n: Option<usize>,

    /// Output format: html or json (default: from the output extension, else html)
    #[arg(long)]
    format: Option<String>,

    /// Input format: telegram or jsonl (default: from config, else telegram)
    #[arg(long)]
    input_format: Option<String>,

    /// Also write word and participant statistics as JSON to this path
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Stopword list for --stats, one word per line (default: from config)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Config file to use instead of ~/.config/chatgraph/config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    let _log_guard = chatgraph_core::logging::init(&config.logging).ok();

    let input_format = match args.input_format.as_deref() {
        Some(name) => name
            .parse::<TranscriptFormat>()
            .context("invalid --input-format (use 'telegram' or 'jsonl')")?,
        None => config.ingest.format,
    };

    let graph_config = GraphConfig {
        top_n: args.top_n.or(config.graph.top_n),
        output_format: match args.format.as_deref() {
            Some(name) => Some(
                name.parse::<OutputFormat>()
                    .context("invalid --format (use 'html' or 'json')")?,
            ),
            None => config.graph.output_format,
        },
    };
    graph_config.validate().context("invalid graph options")?;

    let output_format = graph_config
        .output_format
        .or_else(|| OutputFormat::from_path(&args.output))
        .unwrap_or_default();

    let transcript = ingest::load_transcript(&args.chat_json, input_format)
        .with_context(|| format!("failed to load chat from {}", args.chat_json.display()))?;

    let graph = build_graph(&transcript.messages, graph_config.top_n);
    if graph.is_empty() {
        tracing::warn!("Transcript has no participants");
    }

    let doc = GraphDocument::new(&graph).with_transcript(&transcript);
    emit::write(&doc, &args.output, output_format)
        .with_context(|| format!("failed to write graph to {}", args.output.display()))?;

    println!(
        "Built graph: {} participants, {} interactions ({} replies dropped)",
        graph.nodes.len(),
        graph.interactions.edges().len(),
        graph.stats.unresolved_targets + graph.stats.anonymous_replies
    );
    if let Some(n) = graph.top_n {
        println!("Showing {} edges touching the top {} participants", graph.edges.len(), n);
    }
    println!("Saved {} graph to {}", output_format, args.output.display());

    if let Some(stats_path) = &args.stats {
        let stopwords = match args.stopwords.as_ref().or(config.stats.stopwords.as_ref()) {
            Some(path) => Stopwords::load(path)
                .with_context(|| format!("failed to read stopwords from {}", path.display()))?,
            None => Stopwords::default(),
        };
        let chat_stats =
            stats::compute_stats(&transcript.messages, &stopwords, &config.stats.options());
        emit::write_stats(&chat_stats, stats_path)
            .with_context(|| format!("failed to write statistics to {}", stats_path.display()))?;
        println!(
            "Saved statistics ({} words, {} distinct) to {}",
            chat_stats.words,
            chat_stats.distinct_words,
            stats_path.display()
        );
    }

    Ok(())
}
