use anyhow::{Context, Result};
use penmark::{AvatarImage, CodeRenderer, Config, SiteConfig};
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate().context("Invalid configuration")?;

    let site = SiteConfig::load(&config.site).context("Failed to load site metadata")?;
    let metadata = &site.site_metadata;

    // Resolved before any component is built
    let avatar = match site.avatar.as_ref().zip(site.avatar_root()) {
        Some((source, root)) => AvatarImage::resolve(&root, &source.pattern, &metadata.author)
            .context("Failed to resolve avatar")?,
        None => {
            tracing::info!("no avatar configured, using generated placeholder");
            AvatarImage::placeholder(&metadata.author)
        }
    };

    let code_renderer = CodeRenderer::new(&config.theme).context("Failed to load theme")?;

    let page = penmark::pages::post::generate(
        &config.post,
        config.title.as_deref(),
        metadata,
        &avatar,
        &code_renderer,
    )
    .with_context(|| format!("Failed to generate post: {}", config.post.display()))?;

    fs::create_dir_all(&config.output).context("Failed to create output directory")?;

    let assets_dir = config.output.join("assets");
    fs::create_dir_all(&assets_dir).context("Failed to create assets directory")?;
    penmark::write_css_assets(&assets_dir).context("Failed to write CSS assets")?;

    let page_path = config
        .output
        .join(format!("{}.html", penmark::pages::post::slug(&config.post)));
    fs::write(&page_path, page.into_string())
        .with_context(|| format!("Failed to write {}", page_path.display()))?;

    tracing::info!(path = %page_path.display(), "generated post");
    Ok(())
}
