//! qshift — the query library converter CLI
//!
//! Loads a stored query library, rewrites each admitted record into the UI
//! dialect, and writes the importable document.
//!
//! # Usage
//!
//! ```bash
//! # Convert a whole library
//! qshift queries.json -o customqueries.json
//!
//! # Only the kerberoasting and ACL groups
//! qshift queries.json -g kerberoasting,acls
//!
//! # Inspect the output without writing it
//! qshift queries.json --dry-run
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use colored::*;
use qshift::prelude::*;

#[derive(Parser)]
#[command(name = "qshift")]
#[command(version)]
#[command(about = "Convert stored Cypher query libraries into UI-importable documents", long_about = None)]
#[command(after_help = "EXAMPLES:
    qshift queries.json
    qshift queries.json -g kerberoasting,acls -o customqueries.json
    qshift queries.json --dry-run --indent 4")]
struct Cli {
    /// Source query library (JSON)
    source: PathBuf,

    /// Where to write the converted document
    #[arg(short, long, default_value = "converted_queries.json", env = "QSHIFT_OUTPUT")]
    output: PathBuf,

    /// Only convert records in these groups (comma-separated, repeatable)
    #[arg(short, long, value_delimiter = ',')]
    group: Vec<String>,

    /// Spaces per indentation level in the output document
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Print the converted document to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(0) => {}
        // Partial success: the document was still written, but some admitted
        // record failed conversion.
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            process::exit(2);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<usize> {
    let (records, skipped) = load_library(&cli.source)?;
    for entry in &skipped {
        eprintln!(
            "{} entry {} skipped: {}",
            "Warning:".yellow().bold(),
            entry.index,
            entry.reason
        );
    }
    if cli.verbose {
        println!(
            "{} {} record(s) from {}",
            "Loaded:".dimmed(),
            records.len(),
            cli.source.display().to_string().cyan()
        );
    }

    let inclusion_set: HashSet<String> = build_inclusion_set(&cli.group);
    let batch = convert(&records, &inclusion_set);

    if cli.verbose {
        for record in &batch.converted {
            println!("{} {}", "✓".green(), record.name.dimmed());
        }
    }
    for failure in &batch.failures {
        eprintln!(
            "{} record {} ({}): {}",
            "Failed:".red().bold(),
            failure.index,
            failure.description.yellow(),
            failure.reason
        );
    }

    let failed = batch.failure_count();
    let converted = batch.converted.len();
    let document = batch.into_document();
    let json = document.to_json(cli.indent)?;

    if cli.dry_run {
        println!("{json}");
    } else {
        fs::write(&cli.output, &json)
            .with_context(|| format!("failed to write {}", cli.output.display()))?;
        println!(
            "{} wrote {}",
            "✓".green(),
            cli.output.display().to_string().cyan()
        );
    }

    let failed_label = format!("{failed} failed");
    println!(
        "{} converted, {}",
        converted.to_string().green().bold(),
        if failed > 0 {
            failed_label.red().bold().to_string()
        } else {
            failed_label.dimmed().to_string()
        }
    );

    Ok(failed)
}
