use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/caixa.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub log_file: String,
    pub log_level: String,
    /// Per-request timeout. Unset means the transport default.
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            log_file: "caixa.log".to_string(),
            log_level: "info".to_string(),
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "caixa", version)]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override backend base URL (e.g. http://127.0.0.1:8080).
    #[arg(long)]
    pub base_url: Option<String>,
    /// Override log file path.
    #[arg(long)]
    pub log_file: Option<String>,
    /// Override log level filter (e.g. `debug`, `caixa_tui=trace`).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    load_from(Args::parse())
}

/// Layers the config file, `CAIXA_*` environment variables and CLI flags,
/// in increasing order of precedence.
pub fn load_from(args: Args) -> Result<AppConfig> {
    layered(args, None)
}

/// `env` replaces the process environment when set.
fn layered(args: Args, env: Option<config::Map<String, String>>) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("CAIXA").source(env));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
