use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{SearchError, SearchResult};

/// Configuration for a search run.
///
/// # Configuration Locations
///
/// Values are layered in order of precedence (last wins):
/// 1. Global `$CONFIG_DIR/dnascout/config.yaml`
/// 2. Local `.dnascout.yaml` in the current directory
/// 3. Custom config file given with `--config`
/// 4. Command-line arguments (see [`SearchConfig::merge_with_cli`])
///
/// # Configuration Format
///
/// ```yaml
/// # kmp or rabin_karp
/// algorithm: "rabin_karp"
///
/// # Literal pattern to look for
/// pattern: "GATTACA"
///
/// # name,sequence table
/// input_path: "samples/reads.csv"
///
/// # Worker hint; zero or negative means 1
/// thread_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
///
/// # pretty or compact
/// output: "pretty"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Algorithm name, resolved when the run starts
    #[serde(default)]
    pub algorithm: String,

    /// The literal search pattern
    #[serde(default)]
    pub pattern: String,

    /// Path to the `name,sequence` input
    #[serde(default)]
    pub input_path: PathBuf,

    /// Requested number of workers. Kept signed: the engine clamps
    /// non-positive hints to 1.
    #[serde(default = "default_thread_count")]
    pub thread_count: i64,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// How the report is rendered
    #[serde(default)]
    pub output: OutputFormat,
}

/// Report rendering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented document with one position list per line
    #[default]
    Pretty,
    /// Single-line JSON
    Compact,
}

fn default_thread_count() -> i64 {
    1
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            algorithm: String::new(),
            pattern: String::new(),
            input_path: PathBuf::new(),
            thread_count: default_thread_count(),
            log_level: default_log_level(),
            output: OutputFormat::default(),
        }
    }
}

impl SearchConfig {
    /// Loads configuration from the default locations plus an optional file
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("dnascout/config.yaml")),
            Some(PathBuf::from(".dnascout.yaml")),
        ];
        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file must exist
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(SearchError::file_not_found(path));
            }
            builder = builder.add_source(File::from(path));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges CLI arguments with configuration file values. `None` leaves
    /// the file value in place.
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(algorithm) = cli.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(pattern) = cli.pattern {
            self.pattern = pattern;
        }
        if let Some(input_path) = cli.input_path {
            self.input_path = input_path;
        }
        if let Some(thread_count) = cli.thread_count {
            self.thread_count = thread_count;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        if let Some(output) = cli.output {
            self.output = output;
        }
        self
    }

    /// Names of required values that are still empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.algorithm.is_empty() {
            missing.push("algorithm");
        }
        if self.pattern.is_empty() {
            missing.push("pattern");
        }
        if self.input_path.as_os_str().is_empty() {
            missing.push("input_path");
        }
        missing
    }

    /// Fails with a configuration error if a required value is missing
    pub fn validate(&self) -> SearchResult<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SearchError::config_error(format!(
                "missing required value(s): {}",
                missing.join(", ")
            )))
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub algorithm: Option<String>,
    pub pattern: Option<String>,
    pub input_path: Option<PathBuf>,
    pub thread_count: Option<i64>,
    pub log_level: Option<String>,
    pub output: Option<OutputFormat>,
}
