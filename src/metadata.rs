//! Site metadata loading from `site.toml`.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Social handles shown in the author bio.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Social {
    pub twitter: String,
}

/// Static site metadata resolved once before rendering.
///
/// # Example
/// ```toml
/// [site_metadata]
/// title = "My Blog"
/// author = "Kyle"
/// summary = "Builds reactive applications."
///
/// [site_metadata.social]
/// twitter = "kyle"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteMetadata {
    /// Site title, used as the page title suffix.
    #[serde(default = "default_title")]
    pub title: String,

    /// Author name displayed in the bio.
    pub author: String,

    /// Optional sentence placed after the author name in the bio.
    #[serde(default)]
    pub summary: Option<String>,

    pub social: Social,
}

fn default_title() -> String {
    "Blog".to_string()
}

impl SiteMetadata {
    /// URL of the author's Twitter profile.
    pub fn twitter_url(&self) -> String {
        format!("https://twitter.com/{}", self.social.twitter)
    }
}

/// Where to look for the author avatar.
///
/// `pattern` is a regular expression matched against each file path under
/// `root`. A relative `root` is resolved against the config file directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AvatarSource {
    pub root: PathBuf,
    pub pattern: String,
}

/// Parsed `site.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    pub site_metadata: SiteMetadata,

    /// Absent means a generated placeholder avatar is used.
    #[serde(default)]
    pub avatar: Option<AvatarSource>,

    /// Directory containing the config file, set by [`SiteConfig::load`].
    #[serde(skip)]
    pub base_dir: PathBuf,
}

impl SiteConfig {
    /// Loads and validates site configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, is not valid TOML, or fails
    /// validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read site config: {}", path.display()))?;

        let mut config = Self::from_toml(&content)
            .with_context(|| format!("Invalid site config: {}", path.display()))?;

        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::debug!(
            path = %path.display(),
            author = %config.site_metadata.author,
            "loaded site config"
        );
        Ok(config)
    }

    /// Parses and validates site configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if the content is not valid TOML or fails validation.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates required metadata fields.
    ///
    /// # Errors
    ///
    /// Returns error if author, twitter handle or avatar pattern is empty.
    pub fn validate(&self) -> Result<()> {
        if self.site_metadata.author.trim().is_empty() {
            bail!("site_metadata.author must not be empty");
        }

        if self.site_metadata.social.twitter.trim().is_empty() {
            bail!("site_metadata.social.twitter must not be empty");
        }

        if let Some(avatar) = &self.avatar
            && avatar.pattern.is_empty()
        {
            bail!("avatar.pattern must not be empty");
        }

        Ok(())
    }

    /// Avatar search root resolved against the config file directory.
    pub fn avatar_root(&self) -> Option<PathBuf> {
        self.avatar.as_ref().map(|avatar| {
            if avatar.root.is_absolute() {
                avatar.root.clone()
            } else {
                self.base_dir.join(&avatar.root)
            }
        })
    }
}
