//! Line-oriented syntax tokenizing with syntect.

use anyhow::{Result, anyhow};
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Highlight classes a token can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Plain,
    Comment,
    String,
    Number,
    Constant,
    Keyword,
    Operator,
    Function,
    ClassName,
    Builtin,
    Tag,
    AttrName,
    Variable,
    Punctuation,
}

impl TokenKind {
    /// CSS class name for this token kind.
    pub fn css_class(&self) -> &'static str {
        match self {
            TokenKind::Plain => "plain",
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::Number => "number",
            TokenKind::Constant => "constant",
            TokenKind::Keyword => "keyword",
            TokenKind::Operator => "operator",
            TokenKind::Function => "function",
            TokenKind::ClassName => "class-name",
            TokenKind::Builtin => "builtin",
            TokenKind::Tag => "tag",
            TokenKind::AttrName => "attr-name",
            TokenKind::Variable => "variable",
            TokenKind::Punctuation => "punctuation",
        }
    }

    /// Maps a single TextMate scope to a token kind.
    fn from_scope(scope: &str) -> Option<Self> {
        const RULES: &[(&str, TokenKind)] = &[
            ("comment", TokenKind::Comment),
            ("string", TokenKind::String),
            ("constant.numeric", TokenKind::Number),
            ("constant", TokenKind::Constant),
            ("keyword.operator", TokenKind::Operator),
            ("keyword", TokenKind::Keyword),
            ("storage", TokenKind::Keyword),
            ("entity.name.function", TokenKind::Function),
            ("support.function", TokenKind::Function),
            ("variable.function", TokenKind::Function),
            ("entity.name.tag", TokenKind::Tag),
            ("entity.other.attribute-name", TokenKind::AttrName),
            ("entity.name.type", TokenKind::ClassName),
            ("entity.name.class", TokenKind::ClassName),
            ("entity.other.inherited-class", TokenKind::ClassName),
            ("support", TokenKind::Builtin),
            ("punctuation", TokenKind::Punctuation),
            ("variable", TokenKind::Variable),
        ];

        RULES.iter().find_map(|(prefix, kind)| {
            let matches = scope == *prefix
                || scope
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.'));
            matches.then_some(*kind)
        })
    }

    /// Classifies a scope stack by its innermost recognized scope.
    fn from_stack(stack: &[Scope]) -> Self {
        stack
            .iter()
            .rev()
            .find_map(|scope| Self::from_scope(&scope.build_string()))
            .unwrap_or(TokenKind::Plain)
    }
}

/// Classified run of source text within one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub content: String,
    pub kind: TokenKind,
}

impl Token {
    fn new(content: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            content: content.into(),
            kind,
        }
    }

    /// `token <kind>` class attribute value.
    pub fn class_name(&self) -> String {
        format!("token {}", self.kind.css_class())
    }
}

/// Tokens of one source line, in source order.
pub type Line = Vec<Token>;

/// Maps fence language names to syntect lookup tokens.
///
/// The bundled grammars have no JSX or TypeScript definitions; those fall
/// back to the JavaScript grammar.
pub fn normalize_language(language: &str) -> String {
    let lower = language.trim().to_ascii_lowercase();
    match lower.as_str() {
        "jsx" | "javascript" | "mjs" | "cjs" | "ts" | "tsx" | "typescript" => "js".to_string(),
        "shell" | "zsh" | "bash" | "console" => "sh".to_string(),
        "rs" => "rust".to_string(),
        "py" => "python".to_string(),
        "yml" => "yaml".to_string(),
        "md" => "markdown".to_string(),
        _ => lower,
    }
}

/// Splits source code into lines of classified tokens.
pub struct Tokenizer {
    syntax_set: SyntaxSet,
}

impl Tokenizer {
    /// Creates a tokenizer with the bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Finds the grammar for a language, falling back to plain text.
    fn syntax_for(&self, language: &str) -> &SyntaxReference {
        let token = normalize_language(language);
        if token.is_empty() {
            return self.syntax_set.find_syntax_plain_text();
        }

        self.syntax_set
            .find_syntax_by_token(&token)
            .or_else(|| self.syntax_set.find_syntax_by_extension(&token))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Returns whether a grammar other than plain text handles `language`.
    fn is_supported(&self, language: &str) -> bool {
        self.syntax_for(language).name != self.syntax_set.find_syntax_plain_text().name
    }

    /// Tokenizes source code into lines.
    ///
    /// Empty source yields no lines. A trailing newline does not start an
    /// extra line. Every line holds at least one token and the tokens'
    /// contents concatenate to the line without its line ending. Unknown
    /// languages are tokenized as plain text.
    ///
    /// # Errors
    ///
    /// Returns error if the grammar fails to parse a line.
    ///
    /// # Examples
    ///
    /// ```
    /// use penmark::Tokenizer;
    ///
    /// let tokenizer = Tokenizer::new();
    /// let lines = tokenizer.tokenize("let x = 1;\nx", "js")?;
    /// assert_eq!(lines.len(), 2);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn tokenize(&self, code: &str, language: &str) -> Result<Vec<Line>> {
        if !language.trim().is_empty() && !self.is_supported(language) {
            tracing::debug!(language, "no grammar for language, using plain text");
        }

        let syntax = self.syntax_for(language);
        let mut state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut lines = Vec::new();

        for raw in LinesWithEndings::from(code) {
            let ops = state
                .parse_line(raw, &self.syntax_set)
                .map_err(|e| anyhow!("Failed to tokenize line as {}: {}", syntax.name, e))?;

            let text = raw.trim_end_matches(['\n', '\r']);
            let mut line: Line = Vec::new();
            let mut pos = 0;

            for (offset, op) in ops {
                let end = offset.min(text.len());
                if end > pos {
                    let kind = TokenKind::from_stack(stack.as_slice());
                    push_token(&mut line, &text[pos..end], kind);
                    pos = end;
                }
                stack
                    .apply(&op)
                    .map_err(|e| anyhow!("Invalid scope operation in {}: {:?}", syntax.name, e))?;
            }

            if pos < text.len() {
                let kind = TokenKind::from_stack(stack.as_slice());
                push_token(&mut line, &text[pos..], kind);
            }

            if line.is_empty() {
                line.push(Token::new("", TokenKind::Plain));
            }

            lines.push(line);
        }

        tracing::trace!(language, syntax = %syntax.name, lines = lines.len(), "tokenized");
        Ok(lines)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends text to a line, merging with the previous token of the same kind.
fn push_token(line: &mut Line, text: &str, kind: TokenKind) {
    if let Some(last) = line.last_mut()
        && last.kind == kind
    {
        last.content.push_str(text);
        return;
    }
    line.push(Token::new(text, kind));
}
