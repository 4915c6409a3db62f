#![warn(missing_docs)]
//! fieldflat CLI Library
//!
//! Command-line front end over the flatteners and the results table. Inputs
//! are JSON files: objects are treated as records, arrays as lists.
//!
//! # Example
//!
//! ```ignore
//! fn main() -> anyhow::Result<()> {
//!     fieldflat_cli::run()
//! }
//! ```

mod config;
mod json;

pub use config::*;
pub use json::{Experiment, experiments, from_json, read_json};

use anyhow::Context;
use clap::{Parser, Subcommand};
use fieldflat_core::{
    Value, flatten_paths_with_separator, flatten_sequence, flatten_values, to_mapping,
};
use fieldflat_report::{OutputFormat, ResultsTable, Summary, render};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// fieldflat CLI arguments
#[derive(Parser, Debug)]
#[command(name = "fieldflat")]
#[command(author, version, about = "fieldflat - flatten nested benchmark records")]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Keep only paths and columns matching this regex
    #[arg(long, global = true)]
    pub filter: Option<String>,

    /// Configuration file (discovered from the current directory if not given)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one column path per leaf of a JSON record
    Paths {
        /// JSON file holding a single object
        file: PathBuf,
    },
    /// Print the nested mapping of a JSON record
    Mapping {
        /// JSON file holding a single object
        file: PathBuf,
        /// Print the mapping as JSON instead of `{key: value}` text
        #[arg(long)]
        json: bool,
    },
    /// Print `path = value` for every leaf of a JSON record
    Values {
        /// JSON file holding a single object
        file: PathBuf,
    },
    /// Flatten an arbitrarily nested JSON array
    Sequence {
        /// JSON file holding an array
        file: PathBuf,
    },
    /// Build a results table from `{"input": ..., "output": ...}` experiments
    Table {
        /// JSON file holding an array of experiments
        file: PathBuf,
        /// Output format: human, json, csv
        #[arg(long)]
        format: Option<String>,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also save the report under the configured output directory
        #[arg(long)]
        save: bool,
    },
    /// Print a default fieldflat.toml
    Init,
}

/// Run the fieldflat CLI.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the fieldflat CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let default_filter = if cli.verbose {
        "fieldflat=debug"
    } else {
        "fieldflat=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => FieldflatConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FieldflatConfig::discover().unwrap_or_default(),
    };
    let filter = compile_filter(cli.filter.as_deref());

    match &cli.command {
        Commands::Paths { file } => {
            let value = read_json(file)?;
            for path in paths_lines(&value, &config.paths.separator, filter.as_ref())? {
                println!("{}", path);
            }
        }
        Commands::Mapping { file, json } => {
            let value = read_json(file)?;
            println!("{}", mapping_text(&value, *json)?);
        }
        Commands::Values { file } => {
            let value = read_json(file)?;
            for line in values_lines(&value, &config.paths.separator, filter.as_ref())? {
                println!("{}", line);
            }
        }
        Commands::Sequence { file } => {
            let value = read_json(file)?;
            for leaf in flatten_sequence(&value)? {
                println!("{}", leaf);
            }
        }
        Commands::Table {
            file,
            format,
            output,
            save,
        } => {
            let (format, rendered) = run_table(file, format.as_deref(), &config, filter.as_ref())?;

            match output {
                Some(path) => write_report(path, &rendered)?,
                None => print!("{}", rendered),
            }
            if *save {
                write_report(&save_path(&config, format), &rendered)?;
            }
        }
        Commands::Init => {
            print!("{}", FieldflatConfig::default_toml());
        }
    }

    Ok(())
}

fn compile_filter(pattern: Option<&str>) -> Option<Regex> {
    let pattern = pattern?;
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "ignoring invalid filter");
            None
        }
    }
}

fn keep(filter: Option<&Regex>, path: &str) -> bool {
    filter.is_none_or(|re| re.is_match(path))
}

fn paths_lines(
    value: &Value,
    separator: &str,
    filter: Option<&Regex>,
) -> anyhow::Result<Vec<String>> {
    let paths = flatten_paths_with_separator(value, separator)?;
    Ok(paths.into_iter().filter(|p| keep(filter, p)).collect())
}

fn mapping_text(value: &Value, as_json: bool) -> anyhow::Result<String> {
    let mapping = to_mapping(value)?;
    if as_json {
        Ok(serde_json::to_string_pretty(&mapping)?)
    } else {
        Ok(mapping.to_string())
    }
}

fn values_lines(
    value: &Value,
    separator: &str,
    filter: Option<&Regex>,
) -> anyhow::Result<Vec<String>> {
    let paths = flatten_paths_with_separator(value, separator)?;
    let values = flatten_values(value)?;
    Ok(paths
        .into_iter()
        .zip(values)
        .filter(|(p, _)| keep(filter, p))
        .map(|(p, v)| format!("{} = {}", p, v))
        .collect())
}

fn build_table(
    experiments: &[Experiment],
    filter: Option<&Regex>,
) -> anyhow::Result<ResultsTable> {
    let mut table = ResultsTable::new();
    for (i, experiment) in experiments.iter().enumerate() {
        table
            .push(&experiment.input, &experiment.output)
            .with_context(|| format!("Experiment {} rejected", i))?;
    }
    Ok(match filter {
        Some(_) => table.select(|c| keep(filter, c)),
        None => table,
    })
}

/// Build and render the results table for `file`.
///
/// `format` falls back to the configured one. Human output ends with one
/// summary digest per row when summary fields are configured, so the digest
/// goes wherever the report goes.
fn run_table(
    file: &Path,
    format: Option<&str>,
    config: &FieldflatConfig,
    filter: Option<&Regex>,
) -> anyhow::Result<(OutputFormat, String)> {
    let format: OutputFormat = format
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(anyhow::Error::msg)?;
    let experiments = experiments(&read_json(file)?)?;
    let table = build_table(&experiments, filter)?;
    let mut rendered = render(&table, format)?;

    if format == OutputFormat::Human && !config.summary.fields.is_empty() {
        let summary = Summary::new()
            .fields(config.summary.fields.iter().cloned())
            .with_precision(config.summary.precision);
        for (i, row) in table.rows().iter().enumerate() {
            let digest = summary
                .render_row(row)
                .with_context(|| format!("Summary of experiment {} failed", i))?;
            rendered.push_str(&digest);
            rendered.push('\n');
        }
    }

    Ok((format, rendered))
}

fn save_path(config: &FieldflatConfig, format: OutputFormat) -> PathBuf {
    Path::new(&config.output.directory).join(report_file_name(format))
}

fn report_file_name(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Human => "results.txt",
        OutputFormat::Json => "results.json",
        OutputFormat::Csv => "results.csv",
    }
}

fn write_report(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "report written");
    Ok(())
}
