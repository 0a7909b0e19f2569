//! Built-in page body templates using the Tera template engine
//!
//! Templates are embedded in the binary. Each one renders the child content
//! of a page; the shared frame around it comes from [`crate::layout`].

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::Article;
use crate::helpers::{date_xml, format_date, html_escape};

/// Template renderer for page bodies
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all page templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Article content is already HTML; text fields use escape_text
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("index.html", include_str!("site/index.html")),
            ("article.html", include_str!("site/article.html")),
            ("not_found.html", include_str!("site/not_found.html")),
        ])?;

        tera.register_filter("escape_text", escape_text_filter);

        Ok(Self { tera })
    }

    /// Render the article listing shown on the home page
    pub fn render_index(&self, heading: &str, articles: &[ArticleData]) -> Result<String> {
        let mut context = Context::new();
        context.insert("heading", heading);
        context.insert("total_count", &articles.len());
        context.insert("articles", articles);
        self.render("index.html", &context)
    }

    /// Render a single article with links to its neighbours
    pub fn render_article(
        &self,
        article: &ArticleData,
        prev_article: Option<&NavArticle>,
        next_article: Option<&NavArticle>,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("article", article);
        context.insert("prev_article", &prev_article);
        context.insert("next_article", &next_article);
        self.render("article.html", &context)
    }

    /// Render the body of the not-found page
    pub fn render_not_found(&self) -> Result<String> {
        self.render("not_found.html", &Context::new())
    }

    fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: escape text for HTML bodies and attributes
pub(crate) fn escape_text_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("escape_text", "value", String, value);
    Ok(tera::Value::String(html_escape(&s)))
}

/// Article fields exposed to templates
#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub title: String,
    /// Date formatted with the site's `date_format`
    pub date: String,
    /// Machine-readable date for `<time datetime>`
    pub datetime: String,
    pub path: String,
    pub content: String,
    pub excerpt: String,
}

impl ArticleData {
    pub fn from_article(article: &Article, date_format: &str) -> Self {
        Self {
            title: article.title.clone(),
            date: format_date(&article.date, date_format),
            datetime: date_xml(&article.date),
            path: article.path.clone(),
            content: article.content.clone(),
            excerpt: article.excerpt.clone(),
        }
    }

    /// Same as [`ArticleData::from_article`] without the body, for listings
    pub fn summary(article: &Article, date_format: &str) -> Self {
        Self {
            content: String::new(),
            ..Self::from_article(article, date_format)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavArticle {
    pub title: String,
    pub path: String,
}

impl From<&Article> for NavArticle {
    fn from(article: &Article) -> Self {
        Self {
            title: article.title.clone(),
            path: article.path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn article(title: &str, path: &str, content: &str) -> Article {
        let mut article = Article::new(
            title.to_string(),
            NaiveDate::from_ymd_opt(2020, 5, 11).unwrap(),
            path.to_string(),
        );
        article.content = content.to_string();
        article.excerpt = "An excerpt".to_string();
        article
    }

    #[test]
    fn test_render_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let articles = vec![
            ArticleData::summary(&article("First <one>", "/first/", "<p>x</p>"), "MMMM DD, YYYY"),
            ArticleData::summary(&article("Second", "/second/", "<p>y</p>"), "MMMM DD, YYYY"),
        ];
        let html = renderer.render_index("Posts", &articles).unwrap();

        assert!(html.contains("2 posts"));
        assert!(html.contains(r#"<a href="/first/">First &lt;one&gt;</a>"#));
        assert!(html.contains(r#"<time datetime="2020-05-11">May 11, 2020</time>"#));
        assert!(html.contains("<p>An excerpt</p>"));
        assert!(html.find("/first/").unwrap() < html.find("/second/").unwrap());
        assert!(!html.contains("<p>x</p>"));
    }

    #[test]
    fn test_render_empty_index() {
        let renderer = TemplateRenderer::new().unwrap();
        let html = renderer.render_index("Posts", &[]).unwrap();
        assert!(html.contains("0 posts"));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn test_render_article() {
        let renderer = TemplateRenderer::new().unwrap();
        let data = ArticleData::from_article(&article("Hello", "/hello/", "<p>Body</p>"), "YYYY-MM-DD");
        let prev = NavArticle {
            title: "Older".to_string(),
            path: "/older/".to_string(),
        };
        let html = renderer.render_article(&data, Some(&prev), None).unwrap();

        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains(r#"<div class="article-body"><p>Body</p></div>"#));
        assert!(html.contains(r#"href="/older/""#));
        assert!(!html.contains(r#"rel="next""#));
    }

    #[test]
    fn test_render_article_without_neighbours() {
        let renderer = TemplateRenderer::new().unwrap();
        let data = ArticleData::from_article(&article("Only", "/only/", ""), "YYYY-MM-DD");
        let html = renderer.render_article(&data, None, None).unwrap();
        assert!(html.contains(r#"<div class="article-body"></div>"#));
        assert!(!html.contains("article-nav"));
    }

    #[test]
    fn test_render_not_found() {
        let renderer = TemplateRenderer::new().unwrap();
        assert!(renderer.render_not_found().unwrap().contains("Not found"));
    }
}
