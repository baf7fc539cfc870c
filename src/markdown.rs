//! Markdown rendering for posts.
//!
//! This module renders post markdown using comrak with GFM extensions and
//! routes fenced code blocks through the code block component.

mod renderer;

pub use renderer::PostRenderer;
