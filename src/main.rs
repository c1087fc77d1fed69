use anyhow::{Context, Result};
use ast_xpath::config::{discover, load_from_path};
use ast_xpath::ts::{read_source, ParsedSource, RustParser, TsHost};
use ast_xpath::{
    display_column, Axis, GeneratorConfig, HostTree, Location, NodeKind, PathQueryGenerator,
    QueryNode, QueryTree,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "ast-xpath")]
#[command(about = "Query Rust syntax trees with XPath-style axes and paths", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical path query of every node at a location
    Suppress {
        /// Rust source file
        file: PathBuf,

        /// Target as LINE:COLUMN, both 1-based, tabs expanded
        location: Location,

        /// Only consider nodes of this kind
        #[arg(short, long)]
        kind: Option<String>,

        /// Columns between tab stops (overrides the config file)
        #[arg(short, long)]
        tab_width: Option<usize>,

        /// Generator config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a JSON array instead of one path per line
        #[arg(long)]
        json: bool,
    },

    /// Print the query tree of a file
    Tree {
        /// Rust source file
        file: PathBuf,

        /// Generator config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the nodes along an axis, starting from the first node at a location
    Axis {
        /// Rust source file
        file: PathBuf,

        /// Start node as LINE:COLUMN
        location: Location,

        /// Axis name, e.g. `ancestor` or `following-sibling`
        axis: String,

        /// Only consider start nodes of this kind
        #[arg(short, long)]
        kind: Option<String>,

        /// Generator config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print a JSON array instead of one node per line
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Suppress {
            file,
            location,
            kind,
            tab_width,
            config,
            json,
        } => cmd_suppress(&file, with_kind(location, kind), tab_width, config, json),

        Commands::Tree { file, config } => cmd_tree(&file, config),

        Commands::Axis {
            file,
            location,
            axis,
            kind,
            config,
            json,
        } => cmd_axis(&file, with_kind(location, kind), &axis, config, json),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ast_xpath=warn".into()),
        ))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn with_kind(location: Location, kind: Option<String>) -> Location {
    match kind {
        Some(kind) => location.with_kind(kind),
        None => location,
    }
}

/// Explicit `--config`, else the nearest `ast-xpath.toml` above the source file.
fn load_config(path: Option<PathBuf>, file: &Path) -> Result<GeneratorConfig> {
    let path = path.or_else(|| file.parent().and_then(discover));
    match path {
        Some(path) => {
            load_from_path(&path).with_context(|| format!("loading {}", path.display()))
        }
        None => Ok(GeneratorConfig::default()),
    }
}

/// Parse `source`, warning about syntax errors rather than failing on them.
fn parse<'a>(file: &Path, source: &'a str) -> Result<ParsedSource<'a>> {
    let mut parser = RustParser::new()?;
    let parsed = parser
        .parse_with_source(source)
        .with_context(|| format!("parsing {}", file.display()))?;

    if parsed.has_errors() {
        for error in parsed.error_nodes() {
            tracing::warn!(
                file = %file.display(),
                line = error.line,
                column = error.column,
                "syntax error; paths below this point may not be stable"
            );
        }
    }
    Ok(parsed)
}

fn build_host<'a>(parsed: &'a ParsedSource<'_>, config: &GeneratorConfig) -> TsHost<'a> {
    let host = TsHost::new(parsed);
    match &config.text_kinds {
        Some(kinds) => host.with_text_kinds(kinds.iter().cloned()),
        None => host,
    }
}

#[derive(Serialize)]
struct PathEntry {
    line: usize,
    column: usize,
    kind: String,
    path: String,
}

fn cmd_suppress(
    file: &Path,
    location: Location,
    tab_width: Option<usize>,
    config: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = load_config(config, file)?;
    let source = read_source(file)?;
    let parsed = parse(file, &source)?;
    let host = build_host(&parsed, &config);

    let mut generator = PathQueryGenerator::new(&host, location.clone()).with_config(&config);
    if let Some(width) = tab_width {
        generator = generator.with_tab_width(width);
    }

    let nodes = generator.matching_nodes();
    let paths = generator.paths_for(&nodes);
    if paths.is_empty() {
        tracing::info!(%location, file = %file.display(), "no node starts at location");
    }

    if json {
        let entries: Vec<_> = nodes
            .iter()
            .zip(paths)
            .map(|(&node, path)| PathEntry {
                line: location.line,
                column: location.column,
                kind: host.kind(node).to_string(),
                path,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for path in paths {
            println!("{path}");
        }
    }
    Ok(())
}

fn cmd_tree(file: &Path, config: Option<PathBuf>) -> Result<()> {
    let config = load_config(config, file)?;
    let source = read_source(file)?;
    let parsed = parse(file, &source)?;
    let host = build_host(&parsed, &config);
    let tree = QueryTree::new(&host);

    for node in tree.document().axis(Axis::Descendant)? {
        let indent = "  ".repeat(node.depth().saturating_sub(1));
        println!("{indent}{}", describe(tree.host(), &node, config.tab_width));
    }
    Ok(())
}

#[derive(Serialize)]
struct NodeEntry<'a> {
    kind: String,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

fn cmd_axis(
    file: &Path,
    location: Location,
    axis: &str,
    config: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let config = load_config(config, file)?;
    let source = read_source(file)?;
    let parsed = parse(file, &source)?;
    let host = build_host(&parsed, &config);

    let generator = PathQueryGenerator::new(&host, location.clone()).with_config(&config);
    let Some(start) = generator.matching_nodes().into_iter().next() else {
        tracing::info!(%location, file = %file.display(), "no node starts at location");
        if json {
            println!("[]");
        }
        return Ok(());
    };

    let tree = QueryTree::new(&host);
    let start = tree
        .element_for(start)
        .context("matched node is missing from the query tree")?;
    let nodes = start
        .axis_named(axis)
        .with_context(|| format!("walking `{axis}` from {location}"))?;

    if json {
        let entries: Vec<_> = nodes
            .map(|node| NodeEntry {
                kind: node.kind().to_string(),
                name: node.name(),
                line: node.line(),
                column: node
                    .host_node()
                    .map(|n| display_column(tree.host(), n, config.tab_width)),
                text: node.text_value(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for node in nodes {
            println!("{}", describe(tree.host(), &node, config.tab_width));
        }
    }
    Ok(())
}

fn describe<H: HostTree>(host: &H, node: &QueryNode<'_, H>, tab_width: usize) -> String {
    match node.kind() {
        NodeKind::Document => "(document)".dimmed().to_string(),
        NodeKind::Attribute => format!("@text='{}'", node.text_value().unwrap_or_default()),
        NodeKind::Element => {
            let mut line = node.name().bold().to_string();
            let column = node.host_node().map(|n| display_column(host, n, tab_width));
            if let (Some(row), Some(column)) = (node.line(), column) {
                line.push_str(&format!(" {}", format!("[{row}:{column}]").dimmed()));
            }
            if let Some(text) = node.text_value() {
                line.push_str(&format!(" {}", text.green()));
            }
            line
        }
    }
}
