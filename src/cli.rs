use crate::config::Config;
use crate::diary_state::IdPolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "inline-diary")]
#[command(about = "A single-screen diary in the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// How ids are assigned to new entries
    #[arg(long, value_enum)]
    pub id_policy: Option<IdPolicy>,

    /// Directory for the rolling log file
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line take precedence over the config file.
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(policy) = self.id_policy {
            config.id_policy = policy;
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }
        config
    }
}
