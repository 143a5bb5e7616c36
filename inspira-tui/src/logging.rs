use log::LevelFilter;
use simplelog::*;
use std::fs::File;
use std::path::PathBuf;

/// Logging configuration for the Inspira TUI application
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Master switch to enable/disable all logging
    pub enabled: bool,
    /// Path to the log file
    pub log_file: PathBuf,
    /// Whether to clear the log file on startup
    pub clear_on_startup: bool,
    /// Overall log level
    pub level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_file: PathBuf::from("inspira_debug.log"),
            clear_on_startup: true,
            level: LevelFilter::Info,
        }
    }
}

impl LogConfig {
    /// Only errors and warnings
    pub fn minimal() -> Self {
        Self {
            level: LevelFilter::Warn,
            ..Default::default()
        }
    }

    /// Everything, including per-request debug lines
    pub fn verbose() -> Self {
        Self {
            level: LevelFilter::Debug,
            ..Default::default()
        }
    }
}

/// Initialize the logging system with the given configuration.
///
/// Logs go to a file, never to the terminal: stdout belongs to the TUI.
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    if !config.enabled {
        let _ = WriteLogger::init(LevelFilter::Off, Config::default(), std::io::sink());
        return Ok(());
    }

    if config.clear_on_startup {
        let _ = File::create(&config.log_file)?;
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)?;

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|builder| builder)
        .build();

    WriteLogger::init(config.level, log_config, log_file)?;

    log::info!(
        "Logging initialized: file={}, level={:?}",
        config.log_file.display(),
        config.level
    );

    Ok(())
}
