pub mod app_config;

pub use app_config::AppConfig;

use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "unit-converter")]
#[command(about = "Web forms for converting length, weight and temperature units")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind, overrides `server.host`
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on, overrides `server.port`
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log output format, overrides `logging.format`
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Builds the effective configuration: file values (or defaults) with
    /// command line flags applied on top.
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(format) = self.log_format {
            config.logging.format = format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_cli_flags() {
        let cli = CliConfig::parse_from([
            "unit-converter",
            "--host",
            "0.0.0.0",
            "-p",
            "8000",
            "--log-format",
            "json",
            "-v",
        ]);
        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(8000));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
        assert!(cli.verbose);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_resolve_without_file_uses_defaults() {
        let config = CliConfig::default().resolve().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_flags_override_file_values() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nhost = \"10.0.0.1\"\nport = 7000\n")
            .unwrap();

        let cli = CliConfig {
            config: Some(temp_file.path().to_path_buf()),
            port: Some(7001),
            ..CliConfig::default()
        };
        let config = cli.resolve().unwrap();

        assert_eq!(config.server.host, "10.0.0.1");
        assert_eq!(config.server.port, 7001);
    }
}
