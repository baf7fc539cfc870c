//! Shared test utilities for integration tests.
//!
//! Provides helpers for laying out a temporary blog: site configuration,
//! avatar image and markdown posts.

#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Site configuration with an avatar table pointing at `content/assets`.
pub const SITE_WITH_AVATAR: &str = r#"
[site_metadata]
title = "Test Blog"
author = "Test Author"
summary = "Writes tests."

[site_metadata.social]
twitter = "testauthor"

[avatar]
root = "content/assets"
pattern = "profile-pic\\.jpe?g$"
"#;

/// Site configuration without an avatar table.
pub const SITE_WITHOUT_AVATAR: &str = r#"
[site_metadata]
author = "Test Author"
social = { twitter = "testauthor" }
"#;

/// Post exercising both code block modes.
pub const POST: &str = r#"# Live Code

Static first:

```js
const answer = 42;
```

Then live:

```jsx react-live
render(<div className="greeting">Hello</div>)
```
"#;

/// Creates a temporary blog directory with site config and avatar.
///
/// # Returns
///
/// Temporary directory and path to its `site.toml`
///
/// # Errors
///
/// Returns error if directory creation or file writes fail
pub fn create_test_site(site_toml: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let site_path = dir.path().join("site.toml");
    std::fs::write(&site_path, site_toml)?;
    write_file(dir.path(), "content/assets/profile-pic.jpeg", "fake jpeg bytes")?;
    Ok((dir, site_path))
}

/// Writes file under `root`, creating parent directories as needed.
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(root: &Path, path: &str, content: &str) -> Result<PathBuf> {
    let file_path = root.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}
