use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    error::{AppError, Result},
};

/// Installs the global `tracing` subscriber.
///
/// The terminal runs in raw mode on the alternate screen, so records are
/// appended to `log_file` instead of stdout/stderr.
pub fn init(config: &AppConfig) -> Result<()> {
    let path = Path::new(&config.log_file);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let directives = if config.log_level.contains('=') {
        config.log_level.clone()
    } else {
        format!("caixa={level},caixa_tui={level}", level = config.log_level)
    };
    let filter =
        EnvFilter::try_new(directives).map_err(|err| AppError::Logging(err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}
