use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::export::files::TableFormat;
use crate::generator::backend::DEFAULT_API_KEY_ENV;
use crate::generator::prompts::PromptConfig;

pub const DEFAULT_CONFIG_FILE: &str = "page-testgen.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "page-testgen",
    version,
    about = "Generate test cases and Selenium scripts for a web page with a text model"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: page-testgen.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Text generator backend
    #[arg(long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// Model name passed to the backend
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Backend API endpoint
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect elements, generate test cases and scripts, write all artifacts
    Run {
        /// Page to test
        #[arg(long)]
        url: String,

        /// Directory for elements.json, test_cases.* and test_scripts.*
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Table format for test cases and scripts
        #[arg(long, value_enum)]
        format: Option<TableFormat>,
    },

    /// Collect a page's interactive elements and write elements.json
    Elements {
        /// Page to inspect
        #[arg(long)]
        url: String,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<String>,
    },

    /// Parse saved generator output into test case records
    ParseCases {
        /// File holding the generator output, or - for stdin
        #[arg(long)]
        input: String,

        /// Print records as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Parse saved generator output into script records
    ParseScripts {
        /// File holding the generator output, or - for stdin
        #[arg(long)]
        input: String,

        /// Print records as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Ollama,
    Gemini,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `page-testgen.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub browser: BrowserConfig,

    /// JSONL pipeline trace, disabled when unset
    #[serde(default)]
    pub trace_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub backend: Backend,

    /// Backend default when unset
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Backend default when unset
    #[serde(default)]
    pub model: Option<String>,

    /// Environment variable holding the Gemini API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            endpoint: None,
            model: None,
            api_key_env: default_api_key_env(),
        }
    }
}

impl GeneratorConfig {
    /// Apply command-line overrides on top of the file settings.
    pub fn with_overrides(
        mut self,
        backend: Option<Backend>,
        endpoint: Option<&str>,
        model: Option<&str>,
    ) -> Self {
        if let Some(b) = backend {
            self.backend = b;
        }
        if let Some(e) = endpoint {
            self.endpoint = Some(e.to_string());
        }
        if let Some(m) = model {
            self.model = Some(m.to_string());
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: String,

    #[serde(default)]
    pub format: TableFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: TableFormat::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Node.js script serving the headless browser
    #[serde(default = "default_server_script")]
    pub server_script: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            server_script: default_server_script(),
        }
    }
}

// Serde default helpers
fn default_api_key_env() -> String { DEFAULT_API_KEY_ENV.to_string() }
fn default_output_dir() -> String { "output".to_string() }
fn default_server_script() -> String { "node/browser_server.js".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing or
/// malformed; a malformed file is reported as a warning.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_FILE);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}
