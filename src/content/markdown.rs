//! Markdown rendering with syntax highlighting

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use thiserror::Error;

use crate::error::{Error, Result};
use crate::helpers::html_escape;

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Highlighting a code block failed
#[derive(Debug, Error)]
#[error("cannot highlight `{lang}` code block: {source}")]
pub struct RenderError {
    lang: String,
    source: syntect::Error,
}

/// Markdown renderer with syntax highlighting
///
/// Holds no per-call state, so one instance can be shared across threads.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .remove(DEFAULT_THEME)
            .unwrap_or_default();
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers: true,
        }
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Result<Self> {
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .remove(theme)
            .ok_or_else(|| Error::UnknownTheme(theme.to_string()))?;
        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers,
        })
    }

    /// Render markdown to HTML
    pub fn render_to_html(&self, markdown: &str) -> std::result::Result<String, RenderError> {
        // YAML metadata blocks stay off; front-matter is stripped by the loader
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let highlighted = self.highlight_code(&code, lang.as_deref())?;
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                // Nothing but text is expected inside a code block
                _ if code_block.is_some() => {}
                event => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(
        &self,
        code: &str,
        lang: Option<&str>,
    ) -> std::result::Result<String, RenderError> {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let regions = highlighter
                .highlight_line(line, &self.syntax_set)
                .map_err(|source| RenderError {
                    lang: lang.to_string(),
                    source,
                })?;
            let html = styled_line_to_highlighted_html(&regions[..], IncludeBackground::No)
                .map_err(|source| RenderError {
                    lang: lang.to_string(),
                    source,
                })?;
            lines.push(html.trim_end_matches(['\n', '\r']).to_string());
        }

        let style = self
            .theme
            .settings
            .background
            .map(|c| format!(r#" style="background-color:#{:02x}{:02x}{:02x};""#, c.r, c.g, c.b))
            .unwrap_or_default();

        // The info string is author input and lands inside attributes
        let class = html_escape(lang);
        if self.line_numbers {
            Ok(add_line_numbers(&lines, &class, &style))
        } else {
            Ok(format!(
                r#"<figure class="highlight {class}"><pre{style}><code class="language-{class}">{}</code></pre></figure>"#,
                lines.join("\n")
            ))
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lay highlighted lines out next to a line-number gutter
fn add_line_numbers(lines: &[String], class: &str, style: &str) -> String {
    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {class}"><table><tr><td class="gutter"><pre>{gutter}</pre></td><td class="code"><pre{style}><code class="language-{class}">{}</code></pre></td></tr></table></figure>"#,
        lines.join("\n")
    )
}
