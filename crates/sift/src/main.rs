//! Command-line interface for the sift search-query scanner.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use sift_query::{ParseResult, scan_search_text, scan_search_text_forced};

mod names;
mod output;

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Scan document search queries into filter tokens and suggestions")]
/// Top-level CLI options.
struct Cli {
    #[command(subcommand)]
    /// Subcommand to execute.
    command: Commands,
}

#[derive(Subcommand)]
/// Supported `sift` subcommands.
enum Commands {
    /// Scan a search-box buffer and show the active segment's parse state
    Scan {
        /// The search-box text
        text: String,

        /// Force the active segment complete (blur semantics)
        #[arg(long)]
        complete: bool,

        /// Output JSON instead of a rendered summary
        #[arg(long)]
        json: bool,
    },

    /// Scan and resolve value suggestions against a name-source file
    Suggest {
        /// The search-box text
        text: String,

        /// JSON file with tags/categories/users/field_names lists
        #[arg(long)]
        names: PathBuf,

        /// Output JSON instead of a rendered summary
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            text,
            complete,
            json,
        } => cmd_scan(&text, complete, json),
        Commands::Suggest { text, names, json } => cmd_suggest(&text, &names, json),
    }
}

/// Runs the scanner over `text`.
fn scan(text: &str, complete: bool) -> ParseResult {
    if complete {
        scan_search_text_forced(text)
    } else {
        scan_search_text(text)
    }
}

/// Implements `sift scan`.
fn cmd_scan(text: &str, complete: bool, json: bool) -> ExitCode {
    let result = scan(text, complete);

    if json {
        return print_json(&result);
    }

    output::print_result(&result);
    ExitCode::SUCCESS
}

/// Implements `sift suggest`.
fn cmd_suggest(text: &str, names_path: &Path, json: bool) -> ExitCode {
    let names = match names::load_names(names_path) {
        Ok(names) => names,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = scan(text, false);

    if json {
        return print_json(&result);
    }

    output::print_resolved(&result, &names);
    ExitCode::SUCCESS
}

/// Serializes a parse result to pretty JSON on stdout.
fn print_json(result: &ParseResult) -> ExitCode {
    match serde_json::to_string_pretty(result) {
        Ok(json_str) => {
            println!("{json_str}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}
