//! Server configuration.
//!
//! Each setting is taken from the first source that provides it: command-line
//! flag, environment variable, YAML config file, built-in default.
//!
//! ```bash
//! wren --directory /tmp/files
//! LISTEN=127.0.0.1:8080 WREN_LOG=debug wren
//! wren --config wren.yaml
//! ```
//!
//! ```yaml
//! listen_addr: 0.0.0.0:4221
//! directory: /srv/files
//! read_buffer_size: 1048576
//! log_level: debug
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;
use tracing::Level;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";
const DEFAULT_DIRECTORY: &str = "not-existing";
const DEFAULT_READ_BUFFER_SIZE: usize = 50 * 1024 * 1024;

/// Command-line arguments. Unset options fall through to the config file.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "wren", about = "Minimal HTTP/1.1 file and echo server")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN")]
    pub listen: Option<String>,

    /// Directory served and written by /files/
    #[arg(long, env = "WREN_DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// Capacity of the per-connection read buffer in bytes
    #[arg(long = "read-buffer", env = "WREN_READ_BUFFER")]
    pub read_buffer_size: Option<usize>,

    /// Maximum log level (trace, debug, info, warn, error)
    #[arg(long = "log-level", env = "WREN_LOG")]
    pub log_level: Option<Level>,

    /// YAML file with defaults for the options above
    #[arg(long, env = "WREN_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Contents of the optional YAML config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub listen_addr: Option<String>,
    pub directory: Option<PathBuf>,
    pub read_buffer_size: Option<usize>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub directory: PathBuf,
    pub read_buffer_size: usize,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            log_level: Level::INFO,
        }
    }
}

impl FileConfig {
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid config file")
    }

    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_yaml(&yaml)
    }
}

impl Config {
    /// Loads the configuration from the process arguments and environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Resolves `args`, reading the config file they name, if any.
    pub fn from_args(args: Args) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file)
    }

    /// Merges `args` over `file` over the defaults.
    pub fn resolve(args: Args, file: FileConfig) -> anyhow::Result<Self> {
        let defaults = Config::default();

        let file_level = file
            .log_level
            .as_deref()
            .map(|level| {
                level
                    .parse::<Level>()
                    .with_context(|| format!("invalid log level {level:?}"))
            })
            .transpose()?;

        let cfg = Self {
            listen_addr: args
                .listen
                .or(file.listen_addr)
                .unwrap_or(defaults.listen_addr),
            directory: args
                .directory
                .or(file.directory)
                .unwrap_or(defaults.directory),
            read_buffer_size: args
                .read_buffer_size
                .or(file.read_buffer_size)
                .unwrap_or(defaults.read_buffer_size),
            log_level: args
                .log_level
                .or(file_level)
                .unwrap_or(defaults.log_level),
        };

        if cfg.read_buffer_size == 0 {
            bail!("read buffer size must be greater than zero");
        }

        Ok(cfg)
    }
}
