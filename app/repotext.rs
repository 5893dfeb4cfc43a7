//! Command-line interface for repotext.
//!
//! Walks a repository and writes its file paths, contents and git history
//! into a single report file.

use clap::{Parser, ValueEnum};
use repotext::{
    BinaryDetection, DEFAULT_GIT_PROGRAM, DEFAULT_IGNORE_FILE, DEFAULT_OUTPUT, HistoryPolicy,
    RepoTextBuilder, RepoTextOptions, ReportFormat, convert,
};
use std::path::PathBuf;
use std::process::exit;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// repotext — convert a local repository into a text file
#[derive(Parser)]
#[command(name = "repotext", version, about, long_about = None)]
struct Cli {
    /// Repository root to convert
    root: PathBuf,

    /// Output file name
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// What to do when `git log` fails
    #[arg(long, value_enum, default_value_t = History::BestEffort)]
    history: History,

    /// Seconds to wait for `git log` (0 waits forever)
    #[arg(long, default_value_t = 30)]
    history_timeout: u64,

    /// Git executable used for the history section
    #[arg(long, default_value = DEFAULT_GIT_PROGRAM)]
    git_program: PathBuf,

    /// Extra ignore patterns (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Ignore-spec file at the repository root
    #[arg(long, default_value = DEFAULT_IGNORE_FILE)]
    ignore_file: String,

    /// Do not read the ignore-spec file
    #[arg(long)]
    no_ignore_file: bool,

    /// Max depth (unlimited if not set)
    #[arg(long)]
    max_depth: Option<usize>,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Binary detection strategy
    #[arg(long, default_value = "simple", value_parser = parse_binary_detection)]
    binary_detection: BinaryDetection,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Markdown,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum History {
    Required,
    BestEffort,
    Off,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

impl Cli {
    fn into_options(self) -> RepoTextOptions {
        let format = match self.format {
            Format::Text => ReportFormat::Text,
            Format::Markdown => ReportFormat::Markdown,
            Format::Json => ReportFormat::Json,
        };
        let history = match self.history {
            History::Required => HistoryPolicy::Required,
            History::BestEffort => HistoryPolicy::BestEffort,
            History::Off => HistoryPolicy::Disabled,
        };
        let timeout = (self.history_timeout > 0).then(|| Duration::from_secs(self.history_timeout));

        let mut builder = RepoTextBuilder::new(self.root)
            .output(self.output)
            .format(format)
            .ignore_patterns(self.ignore_patterns)
            .follow_links(self.follow_links)
            .binary_detection(self.binary_detection)
            .history(history)
            .history_timeout(timeout)
            .git_program(self.git_program);

        builder = if self.no_ignore_file {
            builder.no_ignore_file()
        } else {
            builder.ignore_file(self.ignore_file)
        };

        builder = if let Some(depth) = self.max_depth {
            builder.max_depth(depth)
        } else {
            builder.no_limit_depth()
        };

        builder.build()
    }
}

fn init_logging(verbose: bool) {
    // --verbose forces DEBUG; otherwise RUST_LOG, falling back to WARN.
    let filter = if verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let options = cli.into_options();

    match convert(&options) {
        Ok(path) => println!("Repository contents saved to {}", path.display()),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
