//! vlog-inspect - print the visible part of a commit log
//!
//! Usage:
//!   vlog-inspect <commits.json> [--grep <regex>] [--hide <commit-id>]... [--config <file>]
//!
//! Input: JSON array of commits in log order (children before parents):
//!   [{"id": "...", "parents": ["..."], "timestamp": 0, "subject": "..."}]
//!
//! Output: one line per visible commit:
//!   <visible index> <layout index> <head layout index> <id> <timestamp> <subject> -> <parents>
//! where parents are visible indices and `..` marks a parent outside the log.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use regex_lite::Regex;
use serde::Deserialize;
use tracing::Level;

use vlog_graph::{GraphCommit, IndexConfig, LinearGraph, LogGraph, NodeRef, PrintedLinearGraph};

#[derive(Debug, Deserialize)]
struct CommitRecord {
    id: String,
    #[serde(default)]
    parents: Vec<String>,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    subject: String,
}

struct Args {
    input: PathBuf,
    grep: Option<Regex>,
    hide: HashSet<String>,
    config: Option<PathBuf>,
}

fn usage() -> ! {
    eprintln!("Usage: vlog-inspect <commits.json> [--grep <regex>] [--hide <commit-id>]... [--config <file>]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <commits.json>  JSON array of commits, children before parents");
    eprintln!("  --grep          Show only commits whose subject matches");
    eprintln!("  --hide          Hide a commit by id (repeatable)");
    eprintln!("  --config        Index config JSON (default: VLOG_* environment)");
    std::process::exit(1);
}

fn parse_args() -> Result<Args> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut grep = None;
    let mut hide = HashSet::new();
    let mut config = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--grep" => {
                let pattern = args.next().unwrap_or_else(|| usage());
                grep = Some(Regex::new(&pattern).with_context(|| format!("bad --grep pattern {:?}", pattern))?);
            }
            "--hide" => {
                hide.insert(args.next().unwrap_or_else(|| usage()));
            }
            "--config" => config = Some(PathBuf::from(args.next().unwrap_or_else(|| usage()))),
            "-h" | "--help" => usage(),
            other if other.starts_with("--") => bail!("unknown option {}", other),
            other => {
                if input.replace(PathBuf::from(other)).is_some() {
                    bail!("more than one input file given");
                }
            }
        }
    }

    let input = input.unwrap_or_else(|| usage());
    Ok(Args { input, grep, hide, config })
}

fn init_logging() {
    // VLOG_DEBUG=1 turns on index update tracing
    let level = if std::env::var("VLOG_DEBUG").is_ok() { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn format_parents(graph: &LogGraph<String>, row: usize) -> String {
    graph
        .down_nodes(row)
        .into_iter()
        .map(|parent| match parent {
            NodeRef::Index(index) => index.to_string(),
            NodeRef::NotLoaded => "..".to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn main() -> Result<()> {
    let args = parse_args()?;
    init_logging();

    let config = match &args.config {
        Some(path) => IndexConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {:?}", path))?,
        None => IndexConfig::from_env()?,
    };

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read {:?}", args.input))?;
    let records: Vec<CommitRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse {:?}", args.input))?;

    let commits: Vec<GraphCommit<String>> = records
        .iter()
        .map(|r| GraphCommit::new(r.id.clone(), r.parents.clone(), r.timestamp))
        .collect();
    let mut graph = LogGraph::from_commits(&commits, config)?;

    let shown: Vec<bool> = records
        .iter()
        .map(|r| {
            !args.hide.contains(&r.id)
                && args.grep.as_ref().map_or(true, |re| re.is_match(&r.subject))
        })
        .collect();
    if let Some(range) = graph.printed_mut().set_visibility_by(|i| shown[i]) {
        tracing::info!("Filter applied to permanent rows {}..={}", range.up, range.down);
    }

    tracing::info!("{} of {} commits visible", graph.nodes_count(), records.len());

    for row in 0..graph.nodes_count() {
        let permanent = graph.printed().permanent_index(row);
        println!(
            "{:>5} {:>3} {:>3} {} {} {} -> {}",
            row,
            graph.layout_index(row),
            graph.head_layout_index(row),
            graph.commit_id(row),
            graph.timestamp(row),
            records[permanent].subject,
            format_parents(&graph, row)
        );
    }

    Ok(())
}
