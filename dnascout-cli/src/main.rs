use clap::{error::ErrorKind, CommandFactory, Parser};
use dnascout::{
    render_compact, render_pretty, search, CliOverrides, OutputFormat, SearchConfig, SearchError,
};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, SearchError>;

/// Exact pattern search over a `name,sequence` table
#[derive(Parser, Debug)]
#[command(name = "dnascout", author, version, about, long_about = None)]
struct Cli {
    /// Matching algorithm (kmp|rabin_karp)
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Literal pattern to search for
    #[arg(short, long)]
    pattern: Option<String>,

    /// Input table, one `name,sequence` row per line
    #[arg(short = 'c', long = "csv", value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Number of worker threads (zero or negative means 1)
    #[arg(short = 'j', long, allow_negative_numbers = true)]
    threads: Option<i64>,

    /// Configuration file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level for diagnostics on stderr (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,

    /// Print the report as a single JSON line
    #[arg(long)]
    compact: bool,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            algorithm: self.algorithm.clone(),
            pattern: self.pattern.clone(),
            input_path: self.csv.clone(),
            thread_count: self.threads,
            log_level: self.log_level.clone(),
            output: self.compact.then_some(OutputFormat::Compact),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    let config = match SearchConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config.merge_with_cli(cli.overrides()),
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = config.validate() {
        eprintln!("error: {}", err);
        eprintln!();
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::FAILURE;
    }

    init_tracing(&config.log_level);

    match run(&config) {
        Ok(report) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(err) = stdout.write_all(report.as_bytes()).and_then(|_| stdout.flush()) {
                eprintln!("Error: {}", err);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so stdout only ever carries the report
fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(config: &SearchConfig) -> Result<String> {
    let run = search(config)?;
    if !run.rejected.is_empty() {
        tracing::warn!("{} input rows were skipped", run.rejected.len());
    }

    match config.output {
        OutputFormat::Pretty => Ok(render_pretty(&run.report)),
        OutputFormat::Compact => render_compact(&run.report),
    }
}
