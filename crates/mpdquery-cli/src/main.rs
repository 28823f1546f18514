use std::fmt::Write as _;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mpdquery::{Attribute, Config, Document, Node};

#[derive(Debug, Parser)]
#[command(
    name = "mpdquery",
    version,
    about = "Parse a manifest and run path queries against it"
)]
struct Args {
    /// Input file (defaults to stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Path expression to evaluate, e.g. '//Representation' (repeatable)
    #[arg(short, long = "query", value_name = "PATH")]
    queries: Vec<String>,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,
    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,
    /// Maximum element nesting depth (0 means unlimited)
    #[arg(long, default_value_t = Config::default().max_depth)]
    max_depth: u16,
    /// Maximum input size in bytes (0 means unlimited)
    #[arg(long, default_value_t = Config::default().max_size)]
    max_size: usize,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented subtree of every match
    Tree,
    /// Opening tag of every match
    Tags,
    Json,
}

/// JSON shape of one node and its subtree
#[derive(Debug, Serialize)]
struct NodeOutput<'a> {
    name: &'a str,
    attributes: &'a [Attribute],
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
    children: Vec<NodeOutput<'a>>,
}

impl<'a> From<Node<'a>> for NodeOutput<'a> {
    fn from(node: Node<'a>) -> Self {
        Self {
            name: node.name(),
            attributes: node.attributes(),
            value: node.value(),
            children: node.children().map(Self::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    matches: Vec<NodeOutput<'a>>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let text = read_input(&args.input)?;
    let config = Config::new(args.max_depth, args.max_size);
    let doc = mpdquery::parse_with_config(&text, config).context("failed to parse document")?;
    info!(nodes = doc.node_count(), "document parsed");

    let rendered = if args.queries.is_empty() {
        render_document(&doc, args.format)?
    } else {
        render_queries(&doc, &args.queries, args.format)?
    };

    write_output(&args.output, rendered.as_bytes())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn render_document(doc: &Document, format: OutputFormat) -> Result<String> {
    let root = doc.root();
    let mut out = String::new();
    match format {
        OutputFormat::Tree => writeln!(out, "{root}")?,
        OutputFormat::Tags => {
            for (index, node) in root.all_nodes(0).iter().enumerate() {
                writeln!(
                    out,
                    "Node number: {}; node content: {}",
                    index + 1,
                    node.to_open_tag_xml()
                )?;
            }
        }
        OutputFormat::Json => {
            out = serde_json::to_string_pretty(&NodeOutput::from(root))?;
            out.push('\n');
        }
    }
    Ok(out)
}

fn render_queries(doc: &Document, queries: &[String], format: OutputFormat) -> Result<String> {
    let mut results = Vec::with_capacity(queries.len());
    for query in queries {
        let matches = doc
            .query(query)
            .with_context(|| format!("invalid query: {query}"))?;
        debug!(query = query.as_str(), matches = matches.len(), "query evaluated");
        results.push((query.as_str(), matches));
    }

    if format == OutputFormat::Json {
        let output: Vec<QueryOutput<'_>> = results
            .into_iter()
            .map(|(query, matches)| QueryOutput {
                query,
                matches: matches.into_iter().map(NodeOutput::from).collect(),
            })
            .collect();
        let mut out = serde_json::to_string_pretty(&output)?;
        out.push('\n');
        return Ok(out);
    }

    let with_headers = results.len() > 1;
    let mut out = String::new();
    for (query, matches) in results {
        if with_headers {
            writeln!(out, "# {query}")?;
        }
        for node in matches {
            match format {
                OutputFormat::Tags => writeln!(out, "{}", node.to_open_tag_xml())?,
                _ => writeln!(out, "{}", node.print_content(""))?,
            }
        }
    }
    Ok(out)
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: &Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, data)
            .with_context(|| format!("failed to write output file {}", path.display())),
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}
