//! Author avatar resolution
//!
//! Avatars are resolved before any component renders: either a file found
//! under a search root by path pattern, or a generated placeholder seeded by
//! the author name. Both end up as self-contained `data:` URIs.

use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Fixed avatar width and height in pixels.
pub const AVATAR_SIZE: u32 = 60;

/// Largest avatar file inlined into a page.
pub const MAX_AVATAR_BYTES: u64 = 256 * 1024;

const BACKGROUNDS: &[&str] = &[
    "#dd7878", "#ea76cb", "#f5c2e7", "#eba0ac", "#ca9ee6", "#cba6f7", "#b4befe", "#8caaee",
    "#85c1dc", "#89dceb", "#74c7ec", "#81c8be", "#94e2d5", "#a6d189", "#c6d57e", "#e5c890",
    "#ef9f76", "#fab387", "#f9e2af",
];

const FOREGROUNDS: &[&str] = &["#1e1e2e", "#303446", "#4c4f69", "#ffffff"];

/// Resolved avatar image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

impl AvatarImage {
    /// Resolves the avatar from a path pattern under a search root.
    ///
    /// Files under `root` are visited in sorted path order without following
    /// symlinks, and the first one whose path matches `pattern` is inlined as
    /// a base64 `data:` URI. Unreadable subdirectories are skipped.
    ///
    /// # Arguments
    ///
    /// * `root`: Directory to search, already resolved against the site
    /// * `pattern`: Regular expression matched against each file path
    /// * `alt`: Alternative text, usually the author name
    ///
    /// # Errors
    ///
    /// Returns error if the pattern is invalid, the root is not a directory,
    /// no file matches, the matched file is larger than [`MAX_AVATAR_BYTES`],
    /// cannot be read, or its extension is not a supported image type.
    pub fn resolve(root: &Path, pattern: &str, alt: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .with_context(|| format!("Invalid avatar pattern: {}", pattern))?;

        if !root.is_dir() {
            bail!("Avatar root is not a directory: {}", root.display());
        }

        let Some(path) = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .find(|p| regex.is_match(&p.to_string_lossy()))
        else {
            bail!("No avatar matching '{}' under {}", pattern, root.display());
        };

        let mime = mime_type(&path)
            .with_context(|| format!("Unsupported avatar image type: {}", path.display()))?;

        let size = fs::metadata(&path)
            .with_context(|| format!("Failed to read avatar: {}", path.display()))?
            .len();
        if size > MAX_AVATAR_BYTES {
            bail!(
                "Avatar {} is {} bytes, larger than the {} byte limit; \
                 scale it down to about {}x{} pixels",
                path.display(),
                size,
                MAX_AVATAR_BYTES,
                AVATAR_SIZE * 2,
                AVATAR_SIZE * 2
            );
        }

        let bytes = fs::read(&path)
            .with_context(|| format!("Failed to read avatar: {}", path.display()))?;

        tracing::debug!(path = %path.display(), mime, size, "resolved avatar");

        Ok(Self {
            src: data_uri(mime, &bytes),
            alt: alt.to_string(),
            width: AVATAR_SIZE,
            height: AVATAR_SIZE,
        })
    }

    /// Generated avatar used when no avatar source is configured.
    pub fn placeholder(name: &str) -> Self {
        let svg = generate_svg(name, AVATAR_SIZE);
        Self {
            src: data_uri("image/svg+xml", svg.as_bytes()),
            alt: name.to_string(),
            width: AVATAR_SIZE,
            height: AVATAR_SIZE,
        }
    }
}

fn mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

fn hash(s: &str) -> u64 {
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    s.trim()
        .bytes()
        .fold(OFFSET, |h, b| (h ^ b as u64).wrapping_mul(PRIME))
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Generates a circular SVG avatar with the name's initials.
pub fn generate_svg(name: &str, size: u32) -> String {
    let h = hash(name);
    let bg = BACKGROUNDS[(h % BACKGROUNDS.len() as u64) as usize];
    let fg = FOREGROUNDS[((h >> 8) % FOREGROUNDS.len() as u64) as usize];
    let rot = ((h >> 16) % 360) as i32;
    let text = escape_xml(&initials(name));

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 100 100"><circle cx="50" cy="50" r="50" fill="{bg}"/><circle cx="50" cy="50" r="38" fill="none" stroke="white" stroke-opacity="0.4" stroke-width="6" stroke-dasharray="40 20" transform="rotate({rot},50,50)"/><text x="50" y="50" dy="0.35em" text-anchor="middle" font-family="sans-serif" font-size="36" fill="{fg}">{text}</text></svg>"##
    )
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
