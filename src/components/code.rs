//! Code block component
//!
//! A code block renders in one of two modes chosen once per render: a static,
//! syntax highlighted listing, or an interactive editor whose preview comes
//! from a [`LiveSession`].

use anyhow::{Context, Result, bail};
use maud::{Markup, PreEscaped, html};
use syntect::highlighting::{Color, ThemeSet};

use crate::highlight::{Line, Tokenizer};
use crate::live::{Evaluator, LiveSession, RenderCallEvaluator};

/// Fence info words that select interactive mode.
const LIVE_MARKERS: &[&str] = &["react-live", "live"];

/// A code block as handed over by the page renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeBlock {
    Static { code: String, language: String },
    Interactive { code: String },
}

impl CodeBlock {
    /// Builds a code block from an explicit mode flag.
    ///
    /// The language is ignored for interactive blocks; the live editor
    /// evaluates a single fixed language.
    pub fn new(code: impl Into<String>, language: impl Into<String>, interactive: bool) -> Self {
        let code = code.into();
        if interactive {
            CodeBlock::Interactive { code }
        } else {
            CodeBlock::Static {
                code,
                language: language.into(),
            }
        }
    }

    /// Builds a code block from a markdown fence info string.
    ///
    /// The first word is the language; a live marker among the remaining
    /// words selects interactive mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use penmark::CodeBlock;
    ///
    /// let block = CodeBlock::from_fence("jsx react-live", "render(<p>Hi</p>)");
    /// assert!(block.is_interactive());
    /// ```
    pub fn from_fence(info: &str, code: impl Into<String>) -> Self {
        let mut words = info.split_whitespace();
        let language = words.next().unwrap_or("text");
        let interactive = words.any(|word| LIVE_MARKERS.contains(&word));
        Self::new(code, language, interactive)
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, CodeBlock::Interactive { .. })
    }

    pub fn code(&self) -> &str {
        match self {
            CodeBlock::Static { code, .. } | CodeBlock::Interactive { code } => code,
        }
    }
}

/// Renders code blocks with a shared tokenizer, theme and evaluator.
pub struct CodeRenderer<E = RenderCallEvaluator> {
    tokenizer: Tokenizer,
    theme_style: String,
    evaluator: E,
}

impl CodeRenderer {
    /// Creates a renderer using a bundled syntect theme for block colors.
    ///
    /// # Errors
    ///
    /// Returns error if the theme name is not one of the bundled themes.
    pub fn new(theme: &str) -> Result<Self> {
        Self::with_evaluator(theme, RenderCallEvaluator)
    }
}

impl<E: Evaluator + Clone> CodeRenderer<E> {
    /// Creates a renderer with a custom live evaluator.
    ///
    /// # Errors
    ///
    /// Returns error if the theme name is not one of the bundled themes.
    pub fn with_evaluator(theme: &str, evaluator: E) -> Result<Self> {
        Ok(Self {
            tokenizer: Tokenizer::new(),
            theme_style: theme_style(theme)?,
            evaluator,
        })
    }

    /// Renders a code block in the mode it carries.
    ///
    /// # Errors
    ///
    /// Returns error if tokenizing a static block fails.
    pub fn render(&self, block: &CodeBlock) -> Result<Markup> {
        match block {
            CodeBlock::Static { code, language } => {
                let lines = self
                    .tokenizer
                    .tokenize(code, language)
                    .with_context(|| format!("Failed to highlight {} code block", language))?;
                Ok(self.static_markup(language, &lines))
            }
            CodeBlock::Interactive { code } => {
                let session = LiveSession::new(code.as_str(), self.evaluator.clone());
                Ok(live_markup(&session))
            }
        }
    }

    fn static_markup(&self, language: &str, lines: &[Line]) -> Markup {
        let style = format!("{} border-radius: 4px; padding: 1rem;", self.theme_style);
        html! {
            pre class=(format!("prism-code language-{}", language)) style=(style) {
                @for line in lines {
                    div class="token-line" {
                        @for token in line {
                            span class=(token.class_name()) {
                                @if token.content.is_empty() { "\n" } @else { (token.content) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the editor, error region and preview of a live session.
pub fn live_markup<E: Evaluator>(session: &LiveSession<E>) -> Markup {
    html! {
        div class="live-provider" data-no-inline="true" {
            textarea class="live-editor" spellcheck="false" autocapitalize="off" {
                (session.code())
            }
            @if let Some(error) = session.error() {
                pre class="live-error" { (error.to_string()) }
            } @else {
                pre class="live-error" hidden {}
            }
            div class="live-preview" {
                @if let Some(preview) = session.preview() {
                    (PreEscaped(preview))
                }
            }
        }
    }
}

/// Inline `color`/`background-color` declarations for a bundled theme.
fn theme_style(name: &str) -> Result<String> {
    let themes = ThemeSet::load_defaults();
    let Some(theme) = themes.themes.get(name) else {
        let available: Vec<&str> = themes.themes.keys().map(String::as_str).collect();
        bail!(
            "Unknown theme '{}', available: {}",
            name,
            available.join(", ")
        );
    };

    let mut style = String::new();
    if let Some(fg) = theme.settings.foreground {
        style.push_str(&format!("color: {};", hex(fg)));
    }
    if let Some(bg) = theme.settings.background {
        if !style.is_empty() {
            style.push(' ');
        }
        style.push_str(&format!("background-color: {};", hex(bg)));
    }
    Ok(style)
}

fn hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}
