//! Configuration loading from fieldflat.toml
//!
//! fieldflat configuration can be specified in a `fieldflat.toml` file in the
//! project root. The configuration is discovered by walking up from the
//! current directory; command-line flags override it.

use fieldflat_core::PATH_SEPARATOR;
use fieldflat_report::DEFAULT_PRECISION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up by [`FieldflatConfig::discover`]
pub const CONFIG_FILE: &str = "fieldflat.toml";

/// fieldflat configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FieldflatConfig {
    /// Path naming
    #[serde(default)]
    pub paths: PathsConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Summary digest configuration
    #[serde(default)]
    pub summary: SummaryConfig,
}

/// Path naming configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// String joining field names into a column path
    #[serde(default = "default_separator")]
    pub separator: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

fn default_separator() -> String {
    PATH_SEPARATOR.to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
    /// Directory for report files written without an explicit path
    #[serde(default = "default_output_dir")]
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            directory: default_output_dir(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}
fn default_output_dir() -> String {
    "target/fieldflat".to_string()
}

/// Summary digest configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryConfig {
    /// Significant digits for floating point values
    #[serde(default = "default_precision")]
    pub precision: usize,
    /// Paths printed in the per-row digest (empty disables the digest)
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
            fields: Vec::new(),
        }
    }
}

fn default_precision() -> usize {
    DEFAULT_PRECISION
}

impl FieldflatConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let dir = std::env::current_dir().ok()?;
        Self::discover_from(&dir)
    }

    /// Walk up from `start` and load the first `fieldflat.toml` found
    pub fn discover_from(start: &Path) -> Option<Self> {
        let config_path = Self::find(start)?;
        tracing::debug!(path = %config_path.display(), "loading configuration");
        match Self::load(&config_path) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid configuration");
                None
            }
        }
    }

    fn find(start: &Path) -> Option<PathBuf> {
        let mut dir = start.to_path_buf();
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# fieldflat Configuration

[paths]
# Separator between field names in column paths
separator = "."

[output]
# Default output format: human, json, csv
format = "human"
# Output directory for reports
directory = "target/fieldflat"

[summary]
# Significant digits for floating point values
precision = 6
# Paths printed in the per-row digest (uncomment to enable)
# fields = ["f", "latency.median_ms"]
"#
        .to_string()
    }
}
