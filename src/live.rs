//! Live code evaluation for interactive code blocks.
//!
//! A [`LiveSession`] owns the editable buffer of one interactive block and
//! keeps three views in sync with it: the buffer itself, the last evaluation
//! error, and the last successful preview. Evaluation is delegated to an
//! [`Evaluator`].
//!
//! The bundled [`RenderCallEvaluator`] treats the buffer as a standalone unit:
//! nothing is shown unless the source calls `render(...)` explicitly.

use thiserror::Error;

/// Failure reported by an evaluator, shown in the error region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("No output: call render(...) to show a preview")]
    NoRender,

    #[error("SyntaxError: {message} ({line}:{column})")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("ReferenceError: {0} is not defined")]
    Undefined(String),

    #[error("Unsupported expression: {{{0}}}")]
    UnsupportedExpression(String),
}

/// Turns live source code into preview HTML.
pub trait Evaluator {
    /// Evaluates `source` and returns the HTML it renders.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] describing why no preview was produced.
    fn evaluate(&self, source: &str) -> Result<String, EvalError>;
}

impl<F> Evaluator for F
where
    F: Fn(&str) -> Result<String, EvalError>,
{
    fn evaluate(&self, source: &str) -> Result<String, EvalError> {
        self(source)
    }
}

/// Editable buffer with its error and preview views.
#[derive(Debug, Clone)]
pub struct LiveSession<E = RenderCallEvaluator> {
    evaluator: E,
    code: String,
    preview: Option<String>,
    error: Option<EvalError>,
}

impl<E: Evaluator> LiveSession<E> {
    /// Seeds the buffer with `code` and evaluates it once.
    pub fn new(code: impl Into<String>, evaluator: E) -> Self {
        let mut session = Self {
            evaluator,
            code: code.into(),
            preview: None,
            error: None,
        };
        session.evaluate();
        session
    }

    /// Replaces the buffer contents and re-evaluates.
    ///
    /// A failed evaluation sets the error and keeps the previous preview.
    pub fn edit(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.evaluate();
    }

    fn evaluate(&mut self) {
        match self.evaluator.evaluate(&self.code) {
            Ok(html) => {
                self.preview = Some(html);
                self.error = None;
            }
            Err(e) => {
                tracing::debug!(error = %e, "live evaluation failed");
                self.error = Some(e);
            }
        }
    }

    /// Current buffer contents.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Last successful preview, if any evaluation has succeeded.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Error from the most recent evaluation.
    pub fn error(&self) -> Option<&EvalError> {
        self.error.as_ref()
    }
}

/// Evaluates explicit `render(<markup/>)` calls.
///
/// Supports a JSX subset: lowercase intrinsic elements, fragments, string and
/// literal attributes, self-closing tags, text, and string or number literal
/// expressions. The last `render` call in the source wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderCallEvaluator;

impl Evaluator for RenderCallEvaluator {
    fn evaluate(&self, source: &str) -> Result<String, EvalError> {
        let start = find_last_render_call(source).ok_or(EvalError::NoRender)?;

        let mut parser = Parser::new(source, start);
        parser.skip_whitespace();
        if !parser.rest().starts_with('<') {
            return Err(parser.syntax_error("render() expects a JSX element"));
        }

        let node = parser.parse_element()?;
        parser.skip_whitespace();
        if !parser.eat(")") {
            return Err(parser.syntax_error("missing ) after argument list"));
        }

        let mut html = String::new();
        node.write_html(&mut html);
        Ok(html)
    }
}

const RENDER_CALL: &str = "render(";

/// Byte offset just past the `(` of the last `render(` call.
///
/// Comments and string or template literals are skipped, and so is the JSX
/// argument of each call that parses.
fn find_last_render_call(source: &str) -> Option<usize> {
    let mut last = None;
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];
        if rest.starts_with("//") {
            pos += rest.find('\n').unwrap_or(rest.len());
        } else if let Some(body) = rest.strip_prefix("/*") {
            pos += body.find("*/").map_or(rest.len(), |end| end + 4);
        } else if let Some(quote) = rest.chars().next().filter(|&c| matches!(c, '"' | '\'' | '`')) {
            pos += string_literal_len(rest, quote);
        } else if rest.starts_with(RENDER_CALL) && !follows_identifier(source, pos) {
            let start = pos + RENDER_CALL.len();
            last = Some(start);
            pos = render_argument_end(source, start).unwrap_or(start);
        } else {
            pos += rest.chars().next().map_or(1, char::len_utf8);
        }
    }

    last
}

/// Length of the literal opening `rest`, or of the line for an unterminated
/// single-line string.
fn string_literal_len(rest: &str, quote: char) -> usize {
    let mut chars = rest.char_indices().skip(1);
    while let Some((idx, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\n' if quote != '`' => return idx,
            c if c == quote => return idx + c.len_utf8(),
            _ => {}
        }
    }
    rest.len()
}

fn follows_identifier(source: &str, pos: usize) -> bool {
    source[..pos]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.')
}

fn render_argument_end(source: &str, start: usize) -> Option<usize> {
    let mut parser = Parser::new(source, start);
    parser.skip_whitespace();
    if !parser.rest().starts_with('<') {
        return None;
    }
    parser.parse_element().ok()?;
    Some(parser.pos)
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Element {
        name: String,
        attrs: Vec<(String, Option<String>)>,
        children: Vec<Node>,
    },
    Fragment(Vec<Node>),
    Text(String),
}

impl Node {
    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
            Node::Element {
                name,
                attrs,
                children,
            } => {
                out.push('<');
                out.push_str(name);
                for (key, value) in attrs {
                    out.push(' ');
                    out.push_str(html_attr_name(key));
                    if let Some(value) = value {
                        out.push_str("=\"");
                        out.push_str(&escape_html(value));
                        out.push('"');
                    }
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&name.as_str()) {
                    return;
                }

                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }
}

fn html_attr_name(name: &str) -> &str {
    match name {
        "className" => "class",
        "htmlFor" => "for",
        _ => name,
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Collapses JSX text: interior line breaks become single spaces, blank
/// lines are dropped, and only the outer edges keep their whitespace.
fn normalize_jsx_text(text: &str) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let last = lines.len() - 1;
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let line = if i == 0 { *line } else { line.trim_start() };
            if i == last { line } else { line.trim_end() }
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Value of a JavaScript numeric literal, with an optional leading minus.
///
/// Accepts decimal literals with optional fraction and exponent, `0x`, `0o`
/// and `0b` integers, and `_` separators between digits.
fn parse_number(text: &str) -> Option<f64> {
    if let Some(positive) = text.strip_prefix('-') {
        return parse_number(positive.trim_start()).map(|v| -v);
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = strip_separators(&text[2..], |c| c.is_digit(radix))?;
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    let digits = strip_separators(text, |c| c.is_ascii_digit())?;
    let (mantissa, exponent) = match digits.find(['e', 'E']) {
        Some(i) => (&digits[..i], Some(&digits[i + 1..])),
        None => (digits.as_str(), None),
    };
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let leading_zero = int.len() > 1 && int.starts_with('0');
    if !all_digits(int) || !all_digits(frac) || (int.is_empty() && frac.is_empty()) || leading_zero
    {
        return None;
    }
    if let Some(exp) = exponent {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if exp.is_empty() || !all_digits(exp) {
            return None;
        }
    }

    digits.parse().ok()
}

/// Removes `_` separators, each of which must sit between two digits.
fn strip_separators(text: &str, is_digit: impl Fn(char) -> bool) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            let before = i.checked_sub(1).map(|j| chars[j]);
            let after = chars.get(i + 1).copied();
            if !(before.is_some_and(&is_digit) && after.is_some_and(&is_digit)) {
                return None;
            }
        } else {
            out.push(c);
        }
    }
    Some(out)
}

/// Formats a number the way JavaScript converts it to a string.
fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

/// Whether `text` is a plain identifier rather than a literal keyword.
fn is_identifier(text: &str) -> bool {
    if matches!(text, "true" | "false" | "null" | "undefined" | "this") {
        return false;
    }
    let mut chars = text.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, pos: usize) -> Self {
        Self { src, pos }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    fn syntax_error(&self, message: impl Into<String>) -> EvalError {
        let before = &self.src[..self.pos];
        let line = before.matches('\n').count() + 1;
        let column = before
            .rfind('\n')
            .map_or(before.chars().count(), |nl| before[nl + 1..].chars().count())
            + 1;
        EvalError::Syntax {
            message: message.into(),
            line,
            column,
        }
    }

    fn tag_name(&mut self) -> &'a str {
        self.take_while(|c| c.is_alphanumeric() || c == '-' || c == '.' || c == '_')
    }

    /// Parses an element or fragment starting at `<`.
    fn parse_element(&mut self) -> Result<Node, EvalError> {
        if !self.eat("<") {
            return Err(self.syntax_error("expected <"));
        }

        if self.eat(">") {
            let children = self.parse_children("")?;
            return Ok(Node::Fragment(children));
        }

        let name = self.tag_name();
        if name.is_empty() {
            return Err(self.syntax_error("expected tag name"));
        }
        if name.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Err(EvalError::Undefined(name.to_string()));
        }

        let mut attrs = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat("/>") {
                return Ok(Node::Element {
                    name: name.to_string(),
                    attrs,
                    children: Vec::new(),
                });
            }
            if self.eat(">") {
                break;
            }
            if self.rest().is_empty() {
                return Err(self.syntax_error(format!("unterminated <{}> tag", name)));
            }
            attrs.push(self.parse_attribute()?);
        }

        let children = if VOID_ELEMENTS.contains(&name) {
            self.eat_closing_tag(name);
            Vec::new()
        } else {
            self.parse_children(name)?
        };

        Ok(Node::Element {
            name: name.to_string(),
            attrs,
            children,
        })
    }

    /// Consumes an optional `</name>`, leaving the position unchanged when
    /// the next tag is anything else.
    fn eat_closing_tag(&mut self, name: &str) -> bool {
        let start = self.pos;
        self.skip_whitespace();
        if self.eat("</") {
            self.skip_whitespace();
            if self.tag_name() == name {
                self.skip_whitespace();
                if self.eat(">") {
                    return true;
                }
            }
        }
        self.pos = start;
        false
    }

    fn parse_attribute(&mut self) -> Result<(String, Option<String>), EvalError> {
        let key = self.take_while(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == ':');
        if key.is_empty() {
            return Err(self.syntax_error("expected attribute name"));
        }

        self.skip_whitespace();
        if !self.eat("=") {
            return Ok((key.to_string(), None));
        }
        self.skip_whitespace();

        let value = match self.rest().chars().next() {
            Some(quote @ ('"' | '\'')) => self.parse_string(quote)?,
            Some('{') => self
                .parse_expression()?
                .ok_or_else(|| self.syntax_error("empty attribute expression"))?,
            _ => return Err(self.syntax_error(format!("expected value for {}", key))),
        };

        Ok((key.to_string(), Some(value)))
    }

    fn parse_string(&mut self, quote: char) -> Result<String, EvalError> {
        self.pos += quote.len_utf8();
        let rest = self.rest();
        let Some(end) = rest.find(quote) else {
            return Err(self.syntax_error("unterminated string literal"));
        };
        self.pos += end + quote.len_utf8();
        Ok(rest[..end].to_string())
    }

    /// Parses `{...}`; `None` for an empty or comment-only expression.
    fn parse_expression(&mut self) -> Result<Option<String>, EvalError> {
        self.eat("{");
        let rest = self.rest();
        let Some(end) = rest.find('}') else {
            return Err(self.syntax_error("unterminated expression"));
        };
        let inner = rest[..end].trim();
        let start = self.pos;
        self.pos += end + 1;

        if inner.is_empty() || (inner.starts_with("/*") && inner.ends_with("*/")) {
            return Ok(None);
        }

        if let Some(quote) = inner.chars().next().filter(|&c| matches!(c, '"' | '\'' | '`')) {
            let body = &inner[1..];
            let closed = inner.len() >= 2 && body.ends_with(quote);
            if closed && !body[..body.len() - 1].contains(quote) {
                return Ok(Some(body[..body.len() - 1].to_string()));
            }
            self.pos = start;
            return Err(self.syntax_error("unterminated string literal"));
        }

        if let Some(value) = parse_number(inner) {
            return Ok(Some(format_number(value)));
        }

        if is_identifier(inner) {
            return Err(EvalError::Undefined(inner.to_string()));
        }

        Err(EvalError::UnsupportedExpression(inner.to_string()))
    }

    /// Parses children up to the closing tag for `name` (`""` for fragments).
    fn parse_children(&mut self, name: &str) -> Result<Vec<Node>, EvalError> {
        let mut children = Vec::new();

        loop {
            let rest = self.rest();
            if rest.is_empty() {
                let what = if name.is_empty() { "<>".to_string() } else { format!("<{}>", name) };
                return Err(self.syntax_error(format!("unclosed {}", what)));
            }

            if self.eat("</") {
                self.skip_whitespace();
                let closing = self.tag_name();
                self.skip_whitespace();
                if closing != name {
                    return Err(self.syntax_error(format!(
                        "expected corresponding closing tag for <{}>, found </{}>",
                        name, closing
                    )));
                }
                if !self.eat(">") {
                    return Err(self.syntax_error("expected >"));
                }
                return Ok(children);
            }

            if rest.starts_with('<') {
                children.push(self.parse_element()?);
            } else if rest.starts_with('{') {
                if let Some(text) = self.parse_expression()? {
                    children.push(Node::Text(text));
                }
            } else {
                let raw = self.take_while(|c| c != '<' && c != '{');
                let text = normalize_jsx_text(raw);
                if !text.is_empty() {
                    children.push(Node::Text(text));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(source: &str) -> Result<String, EvalError> {
        RenderCallEvaluator.evaluate(source)
    }

    #[test]
    fn test_render_simple_element() {
        assert_eq!(eval("render(<div>A</div>)"), Ok("<div>A</div>".to_string()));
    }

    #[test]
    fn test_render_requires_explicit_call() {
        assert_eq!(eval("<div>A</div>"), Err(EvalError::NoRender));
        assert_eq!(eval("rerender(<div>A</div>)"), Err(EvalError::NoRender));
    }

    #[test]
    fn test_last_render_call_wins() {
        // Arrange
        let source = "render(<p>first</p>);\nrender(<p>second</p>);";

        // Act
        let html = eval(source).expect("Should evaluate");

        // Assert
        assert_eq!(html, "<p>second</p>");
    }

    #[test]
    fn test_render_calls_in_comments_are_ignored() {
        // Arrange
        let source = "// render(<p>old</p>)\nrender(<p>new</p>);\n// render(<p>commented</p>)";
        let block = "render(<p>new</p>);\n/* render(<p>block</p>) */";

        // Act & Assert
        assert_eq!(eval(source), Ok("<p>new</p>".to_string()));
        assert_eq!(eval(block), Ok("<p>new</p>".to_string()));
        assert_eq!(eval("// render(<p>only</p>)"), Err(EvalError::NoRender));
    }

    #[test]
    fn test_render_calls_in_strings_are_ignored() {
        // Arrange
        let source = r#"render(<p>new</p>);
const a = "render(<p>double</p>)";
const b = 'render(<p>single</p>)';
const c = `render(<p>template</p>)`;"#;

        // Act
        let html = eval(source).expect("Should evaluate");

        // Assert
        assert_eq!(html, "<p>new</p>");
    }

    #[test]
    fn test_render_argument_text_does_not_hide_later_calls() {
        // Arrange
        let source = "render(<p>it's http://example.com</p>);\nrender(<p>last</p>);";

        // Act
        let html = eval(source).expect("Should evaluate");

        // Assert
        assert_eq!(html, "<p>last</p>");
    }

    #[test]
    fn test_void_element_with_closing_tag() {
        assert_eq!(
            eval("render(<div><input></input></div>)"),
            Ok("<div><input></div>".to_string())
        );
        assert_eq!(
            eval("render(<div><br>\n</br>text</div>)"),
            Ok("<div><br>text</div>".to_string())
        );
        assert_eq!(
            eval("render(<div><img /><br></div>)"),
            Ok("<div><img><br></div>".to_string())
        );
    }

    #[test]
    fn test_number_literals_print_like_javascript() {
        assert_eq!(eval("render(<p>{1e3}{.5}</p>)"), Ok("<p>10000.5</p>".to_string()));
        assert_eq!(eval("render(<p>{0x1F} {1_000} {-2}</p>)"), Ok("<p>31 1000 -2</p>".to_string()));
        assert_eq!(eval("render(<p>{1.50}</p>)"), Ok("<p>1.5</p>".to_string()));
        assert_eq!(eval("render(<p>{1e21}</p>)"), Ok("<p>1e+21</p>".to_string()));
        assert_eq!(eval("render(<p>{1e-7}</p>)"), Ok("<p>1e-7</p>".to_string()));
        assert_eq!(eval("render(<p>{0}</p>)"), Ok("<p>0</p>".to_string()));
    }

    #[test]
    fn test_non_numeric_words_are_not_numbers() {
        assert_eq!(
            eval("render(<p>{inf}</p>)"),
            Err(EvalError::Undefined("inf".to_string()))
        );
        assert_eq!(
            eval("render(<p>{NaN1}</p>)"),
            Err(EvalError::Undefined("NaN1".to_string()))
        );
        assert_eq!(
            eval("render(<p>{1__0}</p>)"),
            Err(EvalError::UnsupportedExpression("1__0".to_string()))
        );
        assert_eq!(
            eval("render(<p>{0x}</p>)"),
            Err(EvalError::UnsupportedExpression("0x".to_string()))
        );
    }

    #[test]
    fn test_render_nested_attributes_and_fragments() {
        // Arrange
        let source = r#"
const unused = 1;
render(
  <>
    <h1 className="title" data-x={'y'}>Hello</h1>
    <label htmlFor="name">Name</label>
    <input disabled value={42} />
    <br />
  </>
);
"#;

        // Act
        let html = eval(source).expect("Should evaluate");

        // Assert
        assert_eq!(
            html,
            "<h1 class=\"title\" data-x=\"y\">Hello</h1>\
             <label for=\"name\">Name</label>\
             <input disabled value=\"42\"><br>"
        );
    }

    #[test]
    fn test_jsx_text_whitespace() {
        // Arrange
        let source = "render(<p>\n  Hello\n  world {\"!\"}\n</p>)";

        // Act
        let html = eval(source).expect("Should evaluate");

        // Assert
        assert_eq!(html, "<p>Hello world !</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        assert_eq!(
            eval("render(<p>{'<script>'}</p>)"),
            Ok("<p>&lt;script&gt;</p>".to_string())
        );
    }

    #[test]
    fn test_comment_expression_skipped() {
        assert_eq!(
            eval("render(<p>{/* hidden */}shown</p>)"),
            Ok("<p>shown</p>".to_string())
        );
    }

    #[test]
    fn test_mismatched_tag_is_syntax_error() {
        // Arrange & Act
        let err = eval("render(<div>A</span>)").expect_err("Should fail");

        // Assert
        match err {
            EvalError::Syntax { message, line, .. } => {
                assert!(message.contains("</span>"));
                assert_eq!(line, 1);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_element_is_syntax_error() {
        let err = eval("render(<div>A").expect_err("Should fail");
        assert!(matches!(err, EvalError::Syntax { .. }));
        assert!(err.to_string().contains("unclosed <div>"));
    }

    #[test]
    fn test_missing_paren_is_syntax_error() {
        let err = eval("render(<div>A</div>;").expect_err("Should fail");
        assert!(err.to_string().contains("missing )"));
    }

    #[test]
    fn test_syntax_error_position() {
        // Arrange
        let source = "const x = 1;\nrender(<div>\n  <p>A</b>\n</div>)";

        // Act
        let err = eval(source).expect_err("Should fail");

        // Assert
        match err {
            EvalError::Syntax { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, 10);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_component_tag_is_reference_error() {
        assert_eq!(
            eval("render(<Counter />)"),
            Err(EvalError::Undefined("Counter".to_string()))
        );
    }

    #[test]
    fn test_unsupported_expression() {
        assert_eq!(
            eval("render(<p>{count + 1}</p>)"),
            Err(EvalError::UnsupportedExpression("count + 1".to_string()))
        );
    }

    #[test]
    fn test_session_initial_evaluation() {
        // Arrange & Act
        let session = LiveSession::new("render(<div>A</div>)", RenderCallEvaluator);

        // Assert
        assert_eq!(session.code(), "render(<div>A</div>)");
        assert_eq!(session.preview(), Some("<div>A</div>"));
        assert!(session.error().is_none());
    }

    #[test]
    fn test_session_edit_updates_preview_and_clears_error() {
        // Arrange
        let mut session = LiveSession::new("render(<div>A</div>", RenderCallEvaluator);
        assert!(session.error().is_some());

        // Act
        session.edit("render(<div>B</div>)");

        // Assert
        assert_eq!(session.preview(), Some("<div>B</div>"));
        assert!(session.error().is_none());
    }

    #[test]
    fn test_session_invalid_edit_keeps_last_preview() {
        // Arrange
        let mut session = LiveSession::new("render(<div>A</div>)", RenderCallEvaluator);

        // Act
        session.edit("render(<div>B</span>)");

        // Assert
        assert_eq!(session.code(), "render(<div>B</span>)");
        assert_eq!(session.preview(), Some("<div>A</div>"));
        assert!(matches!(session.error(), Some(EvalError::Syntax { .. })));
    }

    #[test]
    fn test_session_without_success_has_no_preview() {
        // Arrange & Act
        let session = LiveSession::new("const x = 1;", RenderCallEvaluator);

        // Assert
        assert_eq!(session.preview(), None);
        assert_eq!(session.error(), Some(&EvalError::NoRender));
    }

    #[test]
    fn test_session_with_closure_evaluator() {
        // Arrange
        let upper = |source: &str| -> Result<String, EvalError> {
            if source.is_empty() {
                Err(EvalError::NoRender)
            } else {
                Ok(source.to_uppercase())
            }
        };

        // Act
        let mut session = LiveSession::new("abc", upper);
        session.edit("");

        // Assert
        assert_eq!(session.preview(), Some("ABC"));
        assert_eq!(session.error(), Some(&EvalError::NoRender));
    }
}
