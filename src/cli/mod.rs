pub mod check;
pub mod serve;
pub mod slug;

use crate::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = "tagwiki.toml";

#[derive(Parser)]
#[command(name = "tagwiki")]
#[command(version)]
#[command(about = "A small wiki with stable title slugs", long_about = None)]
pub struct Cli {
    #[arg(short, long, env = "TAGWIKI_CONFIG", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server
    Serve {
        #[arg(short = 'H', long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Print the URL slug for each title
    Slug {
        #[arg(required = true)]
        titles: Vec<String>,
        /// Print `title<TAB>slug` instead of only the slug
        #[arg(long)]
        verbose: bool,
    },
    /// Validate the configuration, templates and asset directory
    Check,
}

/// Load the config file, falling back to defaults when the default file name
/// is absent. An explicitly named file must exist.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() && path == Path::new(DEFAULT_CONFIG) {
        tracing::warn!("{} not found, using default configuration", DEFAULT_CONFIG);
        return Ok(Config::default());
    }
    Config::load(path)
}
