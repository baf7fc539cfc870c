//! Markdown rendering with code blocks handed to the code renderer.

use anyhow::{Context, Result};
use comrak::Options;

use crate::components::code::{CodeBlock, CodeRenderer};

const PRE_CODE_OPEN: &str = "<pre><code";
const PRE_CODE_CLOSE: &str = "</code></pre>";

/// Renders post markdown to HTML.
///
/// Uses GitHub Flavored Markdown extensions. Every fenced code block is
/// turned into a [`CodeBlock`] from its info string and rendered by the
/// shared [`CodeRenderer`], so a fence such as ` ```jsx react-live ` becomes
/// an interactive editor while other fences are highlighted statically.
pub struct PostRenderer<'a> {
    options: Options<'a>,
    code_renderer: &'a CodeRenderer,
}

impl<'a> PostRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    ///
    /// Configures GFM extensions and keeps the full fence info string so the
    /// words after the language reach the code renderer.
    pub fn new(code_renderer: &'a CodeRenderer) -> Self {
        let mut options = Options::default();

        // Extension options (GFM features)
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;

        options.parse.smart = true;

        // Authors may embed raw HTML in posts
        options.render.unsafe_ = true;
        options.render.full_info_string = true;

        Self {
            options,
            code_renderer,
        }
    }

    /// Renders markdown content to HTML string.
    ///
    /// # Errors
    ///
    /// Returns error if a code block fails to render
    pub fn render(&self, content: &str) -> Result<String> {
        let html = comrak::markdown_to_html(content, &self.options);
        self.render_code_blocks(&html)
    }

    /// Replaces comrak's `<pre><code>` blocks with code renderer output.
    ///
    /// Comrak emits `<pre><code class="language-LANG" data-meta="META">`,
    /// with both attributes optional.
    fn render_code_blocks(&self, html: &str) -> Result<String> {
        let mut result = String::with_capacity(html.len());
        let mut last_end = 0;
        let mut count = 0;

        while let Some(offset) = html[last_end..].find(PRE_CODE_OPEN) {
            let block_start = last_end + offset;

            let Some(tag_len) = html[block_start..].find('>') else {
                break;
            };
            let tag = &html[block_start..block_start + tag_len];
            let content_start = block_start + tag_len + 1;

            let Some(content_len) = html[content_start..].find(PRE_CODE_CLOSE) else {
                break;
            };
            let content_end = content_start + content_len;

            let language = attr_value(tag, "class")
                .and_then(|class| class.strip_prefix("language-"))
                .unwrap_or("text");
            let info = match attr_value(tag, "data-meta") {
                Some(meta) => format!("{} {}", language, html_decode(meta)),
                None => language.to_string(),
            };
            let code = html_decode(&html[content_start..content_end]);
            let code = code.strip_suffix('\n').unwrap_or(&code);

            let block = CodeBlock::from_fence(&info, code);
            let markup = self
                .code_renderer
                .render(&block)
                .with_context(|| format!("Failed to render code block ({})", info))?;

            result.push_str(&html[last_end..block_start]);
            result.push_str(&markup.into_string());

            last_end = content_end + PRE_CODE_CLOSE.len();
            count += 1;
        }

        result.push_str(&html[last_end..]);
        tracing::debug!(blocks = count, "rendered code blocks");

        Ok(result)
    }
}

/// Value of a double-quoted attribute inside an opening tag.
fn attr_value<'t>(tag: &'t str, name: &str) -> Option<&'t str> {
    let needle = format!(" {}=\"", name);
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}

/// Decodes the entities comrak escapes in code content and attributes.
fn html_decode(html: &str) -> String {
    html.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
