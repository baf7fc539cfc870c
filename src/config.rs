//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;

/// Command line configuration for Penmark.
#[derive(Debug, Clone, Parser)]
#[command(name = "penmark", version, about, long_about = None)]
pub struct Config {
    /// Markdown post to render
    pub post: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub output: PathBuf,

    /// Site configuration file
    #[arg(long, default_value = "site.toml")]
    pub site: PathBuf,

    /// Post title (defaults to the first heading or file name)
    #[arg(long)]
    pub title: Option<String>,

    /// Syntax highlighting theme (base16-ocean.dark, InspiredGitHub, etc.)
    #[arg(long, default_value = "base16-ocean.dark")]
    pub theme: String,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the post or site configuration file does not exist.
    pub fn validate(&self) -> Result<()> {
        if !self.post.is_file() {
            bail!("Post file does not exist: {}", self.post.display());
        }

        if !self.site.is_file() {
            bail!("Site config does not exist: {}", self.site.display());
        }

        Ok(())
    }
}
