//! sprig: scan and build markup from the command line
//!
//! Usage:
//!   sprig <file>              Print the tree
//!   sprig <file> --json       Print the tree as JSON
//!   sprig <file> --tokens     Print the token stream
//!   sprig <file> --strict     Fail on a close tag that does not match
//!   sprig <file> --recover    Opt into the scanner and builder recoveries
//!
//! Examples:
//!   sprig page.html
//!   sprig --html '<h1>Hello</h1>' --tokens --json

mod json;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use sprig_dom::MarkupTree;
use sprig_markup::{ParseIssue, Scanner, Token, TreeBuilder, print_tree};

/// sprig: permissive markup scanner and tree builder
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of a file
    sprig ./index.html

    # Print the token stream of inline markup
    sprig --html '<p class="x">hi</p>' --tokens

    # Tree as JSON, failing on mismatched close tags
    sprig --json --strict ./index.html

    # Close `<input disabled>` and keep text at the end of the input
    sprig --recover --html '<input disabled>trailing'
"#)]
struct Cli {
    /// Path to a markup file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse a markup string directly instead of a file
    #[arg(long, value_name = "MARKUP")]
    html: Option<String>,

    /// Print the token stream instead of the tree
    #[arg(short, long)]
    tokens: bool,

    /// Print JSON instead of text
    #[arg(short, long)]
    json: bool,

    /// Fail on the first close tag that does not match its element
    #[arg(long)]
    strict: bool,

    /// End attribute lists on `>` and `/>` after a bare attribute name, and
    /// keep text left at the end of the input
    #[arg(short, long)]
    recover: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let source = load_source(&cli)?;
    let tokens = scan_source(&source, cli.recover);

    if cli.tokens {
        return print_tokens(&tokens, cli.json);
    }

    let mut builder = TreeBuilder::new(&tokens);
    if cli.recover {
        builder = builder.with_attribute_list_recovery();
    }
    let (tree, issues) = if cli.strict {
        let tree = builder
            .with_strict_mode()
            .try_run()
            .context("strict build failed")?;
        (tree, Vec::new())
    } else {
        builder.run_with_issues()
    };

    if cli.json {
        println!("{}", json::tree_to_json(&tree));
    } else {
        print_document(&tree, &issues);
    }
    Ok(())
}

/// Read markup from `--html` or the file argument.
fn load_source(cli: &Cli) -> anyhow::Result<String> {
    if let Some(markup) = &cli.html {
        Ok(markup.clone())
    } else if let Some(path) = &cli.path {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        anyhow::bail!("no input: pass a FILE or --html")
    }
}

fn scan_source(source: &str, recover: bool) -> Vec<Token> {
    let mut scanner = Scanner::new(source);
    if recover {
        scanner = scanner.with_tag_end_recovery().with_trailing_text();
    }
    scanner.run();
    scanner.into_tokens()
}

fn print_tokens(tokens: &[Token], as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(tokens)?);
        return Ok(());
    }
    println!("{}", format!("=== Tokens ({}) ===", tokens.len()).bold());
    for (i, token) in tokens.iter().enumerate() {
        println!("  {i:3}: {token}");
    }
    Ok(())
}

fn print_document(tree: &MarkupTree, issues: &[ParseIssue]) {
    println!("{}", "=== Tree ===".bold());
    print_tree(tree, tree.root(), 0);

    if !issues.is_empty() {
        println!("\n{}", "=== Parse Issues ===".bold());
        for issue in issues {
            println!("  - {}", issue.message.yellow());
        }
    }
}
