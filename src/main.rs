use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{LevelFilter, debug};

use flaarum_stmt::lexer::special_split_line;
use flaarum_stmt::serializer::{canonicalize, structure_changed};
use flaarum_stmt::{parse_search_stmt, parse_table_structure};

/// Parse and format flaarum structure and search statements.
#[derive(Parser, Debug)]
#[command(name = "flaarum-stmt", version)]
struct Cli {
    /// Log parser decisions (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the canonical form of a structure statement
    Format {
        /// Statement file, or `-` for stdin
        file: String,
    },
    /// Report whether a new structure statement changes a stored one
    Compare {
        /// Statement currently stored
        stored: String,
        /// Statement to apply
        new: String,
    },
    /// Parse a structure statement and print it as JSON
    Table {
        file: String,
        #[arg(long)]
        pretty: bool,
    },
    /// Parse a search statement and print it as JSON
    Search {
        file: String,
        #[arg(long)]
        pretty: bool,
    },
    /// Split one line into words and print them as JSON
    Split { line: String },
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .parse_default_env()
        .init();
    debug!("command: {:?}", cli.command);

    match cli.command {
        Command::Format { file } => {
            let input = read_input(&file)?;
            let canonical = canonicalize(&input).with_context(|| format!("Parse error in {}", file))?;
            print!("{}", canonical);
        }
        Command::Compare { stored, new } => {
            let stored_stmt = read_input(&stored)?;
            let new_stmt = read_input(&new)?;
            let table =
                parse_table_structure(&new_stmt).with_context(|| format!("Parse error in {}", new))?;
            let changed = structure_changed(&stored_stmt, &table)
                .with_context(|| format!("Parse error in {}", stored))?;
            println!("{}", if changed { "changed" } else { "unchanged" });
        }
        Command::Table { file, pretty } => {
            let input = read_input(&file)?;
            let table =
                parse_table_structure(&input).with_context(|| format!("Parse error in {}", file))?;
            println!("{}", to_json(&table, pretty)?);
        }
        Command::Search { file, pretty } => {
            let input = read_input(&file)?;
            let search = parse_search_stmt(&input).with_context(|| format!("Parse error in {}", file))?;
            println!("{}", to_json(&search, pretty)?);
        }
        Command::Split { line } => {
            let words = special_split_line(&line).context("Lex error")?;
            println!("{}", serde_json::to_string(&words)?);
        }
    }

    Ok(())
}
