//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::html_escape;

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default())
    }

    /// Create a renderer from the site's highlight settings
    pub fn from_config(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            highlight: config.enable,
            line_numbers: config.line_number,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let parser = Parser::new_ext(markdown, parser_options());

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
                        let rendered = self.highlight_code(&code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(rendered)));
                    }
                }
                Event::Text(text) => match code_block.as_mut() {
                    Some((_, code)) => code.push_str(&text),
                    None => events.push(Event::Text(text)),
                },
                _ => {
                    if code_block.is_none() {
                        events.push(event);
                    }
                }
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Extract the readable text of a markdown document
    ///
    /// Text comes straight from the parser, so entities are already decoded
    /// and inline HTML is dropped. Block boundaries become single spaces.
    pub fn plain_text(markdown: &str) -> String {
        let mut text = String::new();

        for event in Parser::new_ext(markdown, parser_options()) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak | Event::HardBreak | Event::End(_) => text.push(' '),
                _ => {}
            }
        }

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Render a code block, highlighting it when a language is known
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let lang_attr = html_escape(lang);

        if !self.highlight {
            return plain_code_block(code, &lang_attr);
        }

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let Some(theme) = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
        else {
            return plain_code_block(code, &lang_attr);
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) if self.line_numbers => {
                self.add_line_numbers(&highlighted, &lang_attr)
            }
            Ok(highlighted) => format!(
                r#"<div class="code-highlight" data-language="{}">{}</div>"#,
                lang_attr, highlighted
            ),
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang, e);
                plain_code_block(code, &lang_attr)
            }
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            lang,
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parser extensions used for every document
///
/// Front-matter is stripped by FrontMatter::parse, so no metadata blocks here.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// `lang` must already be escaped for use inside an attribute
fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        lang,
        html_escape(code)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_empty_markdown() {
        let renderer = MarkdownRenderer::new();
        assert_eq!(renderer.render("").unwrap(), "");
    }

    #[test]
    fn test_render_highlighted_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("```c\nint main(void) { return 0; }\n```")
            .unwrap();
        assert!(html.contains(r#"data-language="c""#));
        assert!(html.contains("<pre"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_render_plain_code_block_when_disabled() {
        let config = HighlightConfig {
            enable: false,
            ..Default::default()
        };
        let renderer = MarkdownRenderer::from_config(&config);
        let html = renderer
            .render("```bash\nmake && ./run <cert>\n```")
            .unwrap();
        assert!(html.contains(r#"<code class="language-bash">"#));
        assert!(html.contains("make &amp;&amp; ./run &lt;cert&gt;"));
    }

    #[test]
    fn test_render_line_numbers() {
        let config = HighlightConfig {
            line_number: true,
            ..Default::default()
        };
        let renderer = MarkdownRenderer::from_config(&config);
        let html = renderer.render("```rust\nlet a = 1;\nlet b = 2;\n```").unwrap();
        assert!(html.contains(r#"<span class="line-number">1</span>"#));
        assert!(html.contains(r#"<figure class="highlight rust">"#));
    }

    #[test]
    fn test_language_tag_is_escaped() {
        let markdown = "```c\"x\nint x;\n```";

        let highlighted = MarkdownRenderer::new().render(markdown).unwrap();
        assert!(highlighted.contains(r#"data-language="c&quot;x""#));

        let numbered = MarkdownRenderer::from_config(&HighlightConfig {
            line_number: true,
            ..Default::default()
        })
        .render(markdown)
        .unwrap();
        assert!(numbered.contains(r#"<figure class="highlight c&quot;x">"#));

        let plain = MarkdownRenderer::from_config(&HighlightConfig {
            enable: false,
            ..Default::default()
        })
        .render(markdown)
        .unwrap();
        assert!(plain.contains(r#"<code class="language-c&quot;x">"#));
    }

    #[test]
    fn test_plain_text_decodes_entities() {
        let text = MarkdownRenderer::plain_text(
            "# Intro\n\nTom & Jerry use <b>x</b> and a < b.\nSee `a<b>`.",
        );
        assert_eq!(text, "Intro Tom & Jerry use x and a < b. See a<b>.");
    }

    #[test]
    fn test_plain_text_of_empty_document() {
        assert_eq!(MarkdownRenderer::plain_text(""), "");
    }

    #[test]
    fn test_text_after_code_block_is_kept() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\ncode\n```\n\nafter").unwrap();
        assert!(html.contains("<p>after</p>"));
    }
}
