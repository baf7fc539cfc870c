//! Post page generation

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

use crate::avatar::AvatarImage;
use crate::components::bio::bio;
use crate::components::code::CodeRenderer;
use crate::components::layout::page_wrapper;
use crate::markdown::PostRenderer;
use crate::metadata::SiteMetadata;

/// Stylesheet path relative to generated pages.
pub const STYLESHEET: &str = "assets/post.css";

/// Generates a post page from a markdown file
///
/// Reads the markdown source, renders it with code blocks routed through the
/// code renderer, and wraps it in the page layout with the author bio below
/// the article.
///
/// # Arguments
///
/// * `post_path`: Path to the markdown source
/// * `title`: Explicit title, otherwise derived from the document
/// * `metadata`: Site metadata for the bio and page title
/// * `avatar`: Resolved author avatar
/// * `code_renderer`: Shared code block renderer
///
/// # Returns
///
/// HTML markup ready for writing to disk
///
/// # Errors
///
/// Returns error if:
/// - Post file cannot be read
/// - A code block fails to render
///
/// # Examples
///
/// ```no_run
/// use penmark::pages::post::generate;
/// use penmark::{AvatarImage, CodeRenderer, SiteConfig};
/// use std::path::Path;
///
/// let config = SiteConfig::load("site.toml")?;
/// let avatar = AvatarImage::placeholder(&config.site_metadata.author);
/// let code_renderer = CodeRenderer::new("base16-ocean.dark")?;
/// let html = generate(
///     Path::new("content/hello.md"),
///     None,
///     &config.site_metadata,
///     &avatar,
///     &code_renderer,
/// )?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn generate(
    post_path: impl AsRef<Path>,
    title: Option<&str>,
    metadata: &SiteMetadata,
    avatar: &AvatarImage,
    code_renderer: &CodeRenderer,
) -> Result<Markup> {
    let post_path = post_path.as_ref();
    let content = fs::read_to_string(post_path)
        .with_context(|| format!("Failed to read post: {}", post_path.display()))?;

    let heading = first_heading(&content);
    let title = title
        .map(str::to_string)
        .or_else(|| heading.clone())
        .unwrap_or_else(|| slug(post_path));

    let rendered = PostRenderer::new(code_renderer)
        .render(&content)
        .with_context(|| format!("Failed to render post: {}", post_path.display()))?;

    Ok(post_markup(
        &title,
        heading.is_none(),
        &rendered,
        metadata,
        avatar,
    ))
}

/// Renders post page HTML structure
fn post_markup(
    title: &str,
    show_title: bool,
    rendered_html: &str,
    metadata: &SiteMetadata,
    avatar: &AvatarImage,
) -> Markup {
    page_wrapper(
        title,
        &metadata.title,
        &[STYLESHEET],
        html! {
            article class="post" {
                @if show_title {
                    h1 class="post-title" { (title) }
                }
                (PreEscaped(rendered_html))
            }
            hr;
            footer {
                (bio(metadata, avatar))
            }
        },
    )
}

/// Text of the first level-one ATX heading outside code blocks.
fn first_heading(markdown: &str) -> Option<String> {
    let mut fence: Option<(char, usize)> = None;

    for line in markdown.lines() {
        let trimmed = line.trim_start_matches([' ', '\t']);
        let lead = &line[..line.len() - trimmed.len()];
        let indented_code = lead.contains('\t') || lead.len() >= 4;

        if let Some((ch, len)) = fence {
            let closes = !indented_code
                && fence_run(trimmed).is_some_and(|(c, n)| {
                    c == ch && n >= len && trimmed[n..].trim().is_empty()
                });
            if closes {
                fence = None;
            }
            continue;
        }

        if indented_code {
            continue;
        }
        if let Some(run) = fence_run(trimmed) {
            fence = Some(run);
            continue;
        }

        if let Some(text) = trimmed.strip_prefix("# ") {
            let text = text.trim().trim_end_matches('#').trim_end();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// Fence character and run length when `line` opens or closes a fence.
fn fence_run(line: &str) -> Option<(char, usize)> {
    let ch = line.chars().next().filter(|&c| c == '`' || c == '~')?;
    let len = line.chars().take_while(|&c| c == ch).count();
    (len >= 3).then_some((ch, len))
}

/// Output file stem for a post: lowercase alphanumerics joined by dashes.
pub fn slug(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let slug = stem
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        "post".to_string()
    } else {
        slug
    }
}
