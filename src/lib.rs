//! Blog post rendering with an author bio and dual-mode code blocks.

mod assets;
pub mod avatar;
pub mod components;
mod config;
mod highlight;
pub mod live;
mod markdown;
pub mod metadata;
pub mod pages;

pub use assets::write_css_assets;
pub use avatar::{AVATAR_SIZE, AvatarImage};
pub use components::bio::bio;
pub use components::code::{CodeBlock, CodeRenderer};
pub use config::Config;
pub use highlight::{Line, Token, TokenKind, Tokenizer, normalize_language};
pub use live::{EvalError, Evaluator, LiveSession, RenderCallEvaluator};
pub use markdown::PostRenderer;
pub use metadata::{AvatarSource, SiteConfig, SiteMetadata, Social};
