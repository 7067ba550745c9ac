use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use srcstage::StageConfig;
use tracing::Level;

#[derive(Clone, Debug, Parser)]
#[command(name = "srcstage", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Zip archive to unpack
    #[arg(long, value_name = "PATH")]
    pub archive: Option<PathBuf>,

    /// Scratch directory the archive is extracted into
    #[arg(long, value_name = "PATH")]
    pub extract_root: Option<PathBuf>,

    /// Directory that receives the staged source tree
    #[arg(long, value_name = "PATH")]
    pub destination: Option<PathBuf>,

    /// File that must exist at the top of the source tree
    #[arg(long, value_name = "NAME")]
    pub marker: Option<String>,

    /// TOML file providing defaults for the options above
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl App {
    /// Flags override the config file, which overrides the built-in defaults.
    pub fn stage_config(&self) -> anyhow::Result<StageConfig> {
        let mut config = match &self.config {
            Some(path) => StageConfig::from_toml_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => StageConfig::default(),
        };

        if let Some(archive) = &self.archive {
            config = config.archive(archive);
        }
        if let Some(extract_root) = &self.extract_root {
            config = config.extract_root(extract_root);
        }
        if let Some(destination) = &self.destination {
            config = config.destination(destination);
        }
        if let Some(marker) = &self.marker {
            config = config.marker(marker);
        }
        Ok(config)
    }

    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
