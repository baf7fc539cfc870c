//! End-to-end tests for the penmark binary.

mod common;

use anyhow::Result;
use std::fs;
use std::process::Command;

/// Tests full binary execution generates page and stylesheet.
#[test]
fn test_full_workflow_e2e() -> Result<()> {
    // Arrange
    let (dir, site_path) = common::create_test_site(common::SITE_WITH_AVATAR)?;
    let post_path = common::write_file(dir.path(), "content/Live Code.md", common::POST)?;
    let output = dir.path().join("dist");

    // Act
    let status = Command::new(env!("CARGO_BIN_EXE_penmark"))
        .arg(&post_path)
        .arg("-o")
        .arg(&output)
        .arg("--site")
        .arg(&site_path)
        .status()?;

    // Assert
    assert!(status.success(), "penmark should exit successfully");

    let html = fs::read_to_string(output.join("live-code.html"))?;
    assert!(html.contains("Test Author"));
    assert!(html.contains("live-provider"));
    assert!(html.contains("prism-code"));
    assert!(output.join("assets/post.css").exists());

    Ok(())
}

/// Tests binary falls back to a generated avatar without avatar config.
#[test]
fn test_placeholder_avatar_e2e() -> Result<()> {
    // Arrange
    let (dir, site_path) = common::create_test_site(common::SITE_WITHOUT_AVATAR)?;
    let post_path = common::write_file(dir.path(), "post.md", "Hello.")?;
    let output = dir.path().join("out");

    // Act
    let status = Command::new(env!("CARGO_BIN_EXE_penmark"))
        .arg(&post_path)
        .args(["--title", "Greeting", "-o"])
        .arg(&output)
        .arg("--site")
        .arg(&site_path)
        .status()?;

    // Assert
    assert!(status.success());
    let html = fs::read_to_string(output.join("post.html"))?;
    assert!(html.contains("<h1 class=\"post-title\">Greeting</h1>"));
    assert!(html.contains("data:image/svg+xml;base64,"));

    Ok(())
}

/// Tests binary fails when the post is missing.
#[test]
fn test_missing_post_e2e() -> Result<()> {
    // Arrange
    let (dir, site_path) = common::create_test_site(common::SITE_WITHOUT_AVATAR)?;

    // Act
    let status = Command::new(env!("CARGO_BIN_EXE_penmark"))
        .arg(dir.path().join("nope.md"))
        .arg("--site")
        .arg(&site_path)
        .arg("-o")
        .arg(dir.path().join("dist"))
        .status()?;

    // Assert
    assert!(!status.success());
    Ok(())
}

/// Tests binary rejects unknown themes.
#[test]
fn test_unknown_theme_e2e() -> Result<()> {
    // Arrange
    let (dir, site_path) = common::create_test_site(common::SITE_WITHOUT_AVATAR)?;
    let post_path = common::write_file(dir.path(), "post.md", "Hello.")?;

    // Act
    let status = Command::new(env!("CARGO_BIN_EXE_penmark"))
        .arg(&post_path)
        .arg("--site")
        .arg(&site_path)
        .args(["--theme", "no-such-theme", "-o"])
        .arg(dir.path().join("dist"))
        .status()?;

    // Assert
    assert!(!status.success());
    Ok(())
}
