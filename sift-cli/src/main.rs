//! sift: parse markup and query it from the command line.
//!
//! Run with: cargo run --bin sift -- page.html -s 'div.article p'
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod json;
mod tree;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sift_dom::{Document, NodeRef};
use sift_html::TreeBuilder;
use sift_select::{MatchMode, Select, SelectorChain};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// sift: tolerant HTML/XML parser and selector runner
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the parsed tree of a file
    sift ./index.html

    # Parse inline markup
    sift --html '<ul><li>a<li>b</ul>'

    # Extract paragraph text from an article body
    sift page.html -s '.article-body > p' --format text

    # First match wins, in selector order
    sift page.html --first -s 'meta[property=og:title]' -s title

    # Read from stdin and show structural issues
    curl -s https://example.com | sift --issues
"#)]
struct Cli {
    /// Path to a markup file; stdin is read when neither this nor --html is given
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Parse this markup string instead of a file
    #[arg(long, value_name = "MARKUP")]
    html: Option<String>,

    /// Base URL stored on the document root (default: the file path)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Selector to run; repeat to take the union of several
    #[arg(short, long = "select", value_name = "SELECTOR")]
    selectors: Vec<String>,

    /// Print only the first match, trying selectors in the order given
    #[arg(long)]
    first: bool,

    /// Stop after this many matches
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Output format (default: tree for documents, html for matches)
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// How predicates within one selector step combine
    #[arg(long, value_name = "MODE", default_value_t)]
    match_mode: MatchMode,

    /// Print structural parse issues to stderr
    #[arg(long)]
    issues: bool,
}

/// How documents and matches are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented, coloured outline
    Tree,
    /// Serialized markup
    Html,
    /// Flattened text content
    Text,
    /// Pretty-printed JSON
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let doc = load_doc(&cli)?;

    if cli.selectors.is_empty() {
        print_node(doc.root(), cli.format.unwrap_or(Format::Tree))?;
        return Ok(());
    }

    let matches = run_selectors(&cli, &doc)?;
    debug!("{} matches", matches.len());
    let format = cli.format.unwrap_or(Format::Html);
    if format == Format::Json {
        println!("{}", json::render_matches(&matches)?);
    } else {
        for node in matches {
            print_node(node, format)?;
        }
    }
    Ok(())
}

/// Parse the document named by the CLI arguments
fn load_doc(cli: &Cli) -> Result<Document> {
    let base_url = cli.base_url.clone().unwrap_or_else(|| {
        cli.path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default()
    });

    let reader: Box<dyn BufRead + '_> = if let Some(ref markup) = cli.html {
        Box::new(markup.as_bytes())
    } else if let Some(ref path) = cli.path {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        Box::new(BufReader::new(file))
    } else {
        Box::new(io::stdin().lock())
    };

    let (doc, issues) = TreeBuilder::new(base_url, reader)
        .run_with_issues()
        .context("failed to parse markup")?;

    if cli.issues {
        if issues.is_empty() {
            eprintln!("No parse issues");
        } else {
            eprintln!("=== Parse Issues ===");
            for issue in &issues {
                eprintln!("  - {issue}");
            }
        }
    }
    Ok(doc)
}

fn run_selectors<'a>(cli: &Cli, doc: &'a Document) -> Result<Vec<NodeRef<'a>>> {
    let chains = cli
        .selectors
        .iter()
        .map(|selector| {
            SelectorChain::parse(selector)
                .map(|chain| chain.with_match_mode(cli.match_mode))
                .with_context(|| format!("invalid selector {selector:?}"))
        })
        .collect::<Result<Vec<_>>>()?;
    let limit = cli.limit.unwrap_or(usize::MAX);

    let mut matches: Vec<NodeRef<'a>> = if cli.first {
        doc.select_first_of_chains(&chains).into_iter().collect()
    } else {
        doc.select_any_chains(&chains)
    };
    matches.truncate(limit);
    Ok(matches)
}

fn print_node(node: NodeRef<'_>, format: Format) -> Result<()> {
    match format {
        Format::Tree => print!("{}", tree::render(node)),
        Format::Html => println!("{node}"),
        Format::Text => println!("{}", node.flattened_text()),
        Format::Json => println!("{}", json::render_node(node)?),
    }
    Ok(())
}
