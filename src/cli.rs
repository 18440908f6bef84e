//! Command-line interface components.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;
use walkdir::WalkDir;

use crate::batch::BatchLoader;
use crate::config::LoaderConfig;
use crate::constants::{DEFAULT_INITIAL_CAPACITY, DEFAULT_SAMPLE_LINES, TRACE_FILE_EXTENSIONS};
use crate::delimiter::Delimiter;
use crate::loader::TableLoader;
use crate::models::{FileOutcome, Table};
use crate::msp::{MspEntry, MspLibrary};

#[derive(Parser, Debug)]
#[command(name = "trace-loader")]
#[command(about = "Load two-column chromatogram traces and MSP spectral libraries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors and hide progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load trace files and report what was extracted
    Load(LoadArgs),

    /// Index an MSP spectral library
    Msp(MspArgs),
}

#[derive(ClapArgs, Debug)]
pub struct LoadArgs {
    /// Files, directories or glob patterns to load
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<String>,

    /// Fixed separator (comma, tab or space) instead of detection
    #[arg(short, long)]
    pub delimiter: Option<Delimiter>,

    /// Lines sampled for separator detection
    #[arg(long, default_value_t = DEFAULT_SAMPLE_LINES)]
    pub sample_lines: usize,

    /// Starting row capacity of the column buffer
    #[arg(long, default_value_t = DEFAULT_INITIAL_CAPACITY)]
    pub initial_capacity: usize,

    /// Maximum concurrent loads (defaults to the number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the extracted rows after the summary
    #[arg(long)]
    pub print: bool,
}

#[derive(ClapArgs, Debug)]
pub struct MspArgs {
    /// Path to the .msp library
    #[arg(value_name = "LIBRARY")]
    pub library: PathBuf,

    /// Show a single entry
    #[arg(short, long)]
    pub name: Option<String>,
}

impl Args {
    /// Log level implied by the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}

impl LoadArgs {
    pub fn loader_config(&self) -> LoaderConfig {
        let config = LoaderConfig::default()
            .with_sample_lines(self.sample_lines)
            .with_initial_capacity(self.initial_capacity);
        match self.delimiter {
            Some(delimiter) => config.with_delimiter(delimiter),
            None => config,
        }
    }
}

/// Totals reported back to `main`
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub files_loaded: usize,
    pub files_failed: usize,
    pub total_rows: usize,
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("trace_loader={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Dispatch the parsed command
pub async fn run(args: Args) -> Result<RunSummary> {
    match &args.command {
        Command::Load(load_args) => run_load(load_args, args.quiet).await,
        Command::Msp(msp_args) => run_msp(msp_args),
    }
}

/// Expand files, directories and glob patterns into a sorted file list
pub fn collect_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            for entry in WalkDir::new(path) {
                let entry = entry.context("Failed to walk directory")?;
                if entry.file_type().is_file() && has_trace_extension(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else if path.exists() {
            files.push(path.to_path_buf());
        } else {
            let matches =
                glob::glob(input).with_context(|| format!("Invalid glob pattern: {}", input))?;
            let before = files.len();
            for matched in matches {
                let matched = matched.context("Failed to read glob match")?;
                if matched.is_file() {
                    files.push(matched);
                }
            }
            if files.len() == before {
                // Keep it so the load reports the missing source
                files.push(path.to_path_buf());
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn has_trace_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TRACE_FILE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

async fn run_load(args: &LoadArgs, quiet: bool) -> Result<RunSummary> {
    let config = args.loader_config();
    config.validate().context("Invalid loader settings")?;

    let files = collect_inputs(&args.inputs)?;
    if files.is_empty() {
        anyhow::bail!("No trace files found in the given inputs");
    }

    let jobs = args.jobs.unwrap_or_else(num_cpus::get);
    let batch = BatchLoader::new(TableLoader::new(config), jobs);

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        bar
    };

    let outcomes = batch
        .load_all(files, |outcome| {
            progress.set_message(file_label(&outcome.path));
            progress.inc(1);
        })
        .await;
    progress.finish_and_clear();

    let mut summary = RunSummary::default();
    for outcome in &outcomes {
        report_outcome(outcome, args.print, &mut summary);
    }

    println!(
        "\n{} {} files, {} rows{}",
        "Loaded".bright_green().bold(),
        summary.files_loaded.to_string().bright_white().bold(),
        summary.total_rows.to_string().bright_white().bold(),
        if summary.files_failed > 0 {
            format!(", {} failed", summary.files_failed)
                .bright_red()
                .to_string()
        } else {
            String::new()
        }
    );

    Ok(summary)
}

fn report_outcome(outcome: &FileOutcome, print_rows: bool, summary: &mut RunSummary) {
    match &outcome.result {
        Ok(loaded) => {
            summary.files_loaded += 1;
            summary.total_rows += loaded.table.len();

            let stats = &loaded.stats;
            println!(
                "  {} {} rows ({} skipped, {} delimiter)",
                outcome.path.display().to_string().bright_cyan(),
                loaded.table.len().to_string().bright_white().bold(),
                stats.rows_rejected,
                stats.delimiter.map_or("no", Delimiter::name)
            );
            if print_rows {
                print_table(&loaded.table);
            }
        }
        Err(e) => {
            summary.files_failed += 1;
            println!(
                "  {} {}",
                outcome.path.display().to_string().bright_cyan(),
                e.to_string().bright_red()
            );
        }
    }
}

fn print_table(table: &Table) {
    let [position, value] = Table::column_names();
    println!("{}\t{}", position, value);
    for (p, v) in table.rows() {
        println!("{}\t{}", p, v);
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_msp(args: &MspArgs) -> Result<RunSummary> {
    let library = MspLibrary::load(&args.library)
        .with_context(|| format!("Failed to read library {}", args.library.display()))?;

    match &args.name {
        Some(name) => {
            let entry = library
                .get(name)
                .with_context(|| format!("No entry named '{}' in library", name))?;
            print_entry(entry);
            Ok(RunSummary {
                files_loaded: 1,
                files_failed: 0,
                total_rows: entry.peaks.len(),
            })
        }
        None => {
            println!(
                "{} {} entries in {}",
                "Indexed".bright_green().bold(),
                library.len().to_string().bright_white().bold(),
                args.library.display()
            );
            Ok(RunSummary {
                files_loaded: 1,
                files_failed: 0,
                total_rows: library.entries().map(|e| e.peaks.len()).sum(),
            })
        }
    }
}

fn print_entry(entry: &MspEntry) {
    println!("{}", entry.name.bright_green().bold());
    for (key, value) in &entry.metadata {
        println!("  {}: {}", key.bright_cyan(), value);
    }
    println!("  {}\t{}", "m/z".bright_yellow(), "intensity".bright_yellow());
    for (mz, intensity) in entry.peaks.rows() {
        println!("  {}\t{}", mz, intensity);
    }
}
