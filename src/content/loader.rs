//! Content loader - discovers and loads articles from the source directory

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Article, ContentError, FrontMatter, MarkdownRenderer};
use crate::helpers::truncate;
use crate::Site;

/// Loads articles from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let renderer = MarkdownRenderer::from_config(&site.config.highlight);
        Self { site, renderer }
    }

    /// Load every article, newest first
    pub fn load_articles(&self) -> Result<Vec<Article>> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            tracing::warn!("Source directory {:?} does not exist", source_dir);
            return Ok(Vec::new());
        }

        let mut articles: Vec<Article> = Vec::new();
        let mut claimed: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            match self.load_article(path) {
                Ok(article) if article.path == "/" => {
                    tracing::warn!("Skipping {:?}: its path collides with the index", path);
                }
                Ok(article) if article.draft && !self.site.config.render_drafts => {
                    tracing::debug!("Skipping draft {:?}", path);
                }
                Ok(article) => {
                    if let Some(first) = claimed.get(&article.path) {
                        tracing::warn!(
                            "Skipping {:?}: path {} is already used by {:?}",
                            path,
                            article.path,
                            first
                        );
                        continue;
                    }
                    claimed.insert(article.path.clone(), path.to_path_buf());
                    articles.push(article);
                }
                Err(e) => {
                    tracing::warn!("Failed to load article {:?}: {}", path, e);
                }
            }
        }

        articles.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.title.cmp(&b.title)));

        Ok(articles)
    }

    /// Load a single article from a file
    pub fn load_article(&self, path: &Path) -> Result<Article> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);

        let title = fm
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ContentError::MissingTitle(path.to_path_buf()))?
            .to_string();

        let raw_date = fm
            .date
            .as_deref()
            .ok_or_else(|| ContentError::MissingDate(path.to_path_buf()))?;
        let date = fm.parse_date().ok_or_else(|| ContentError::InvalidDate {
            path: path.to_path_buf(),
            value: raw_date.to_string(),
        })?;

        let relative = path.strip_prefix(&self.site.source_dir).unwrap_or(path);
        let url_path = match fm.slug.as_deref() {
            Some(slug) => normalize_slug(slug),
            None => article_path(relative),
        };

        let content_html = self.renderer.render(body)?;
        let excerpt = match fm.description.as_deref() {
            Some(description) => description.trim().to_string(),
            None => excerpt_from_markdown(body, self.site.config.excerpt_length),
        };

        let mut article = Article::new(title, date, url_path);
        article.raw = body.to_string();
        article.content = content_html;
        article.excerpt = excerpt;
        article.source = relative.to_string_lossy().to_string();
        article.full_source = path.to_path_buf();
        article.draft = fm.draft;
        article.extra = fm.extra;

        Ok(article)
    }
}

/// Derive the URL path of an article from its location in the source tree
///
/// `blog/hello-world/index.md` becomes `/blog/hello-world/` and
/// `notes/first.md` becomes `/notes/first/`.
pub fn article_path(relative: &Path) -> String {
    let mut parts: Vec<String> = relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .map(slug::slugify)
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if let Some(stem) = relative.file_stem().and_then(|s| s.to_str()) {
        if stem != "index" {
            parts.push(slug::slugify(stem));
        }
    }

    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", parts.join("/"))
    }
}

/// Normalize a front-matter slug into a `/a/b/` URL path
///
/// Each component is slugified, so `.` and `..` can never leave the output
/// directory.
fn normalize_slug(slug: &str) -> String {
    let parts: Vec<String> = slug
        .split(['/', '\\'])
        .filter(|part| !matches!(*part, "" | "." | ".."))
        .map(slug::slugify)
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", parts.join("/"))
    }
}

/// Build a plain-text excerpt from the markdown body
fn excerpt_from_markdown(markdown: &str, length: usize) -> String {
    truncate(&MarkdownRenderer::plain_text(markdown), length, Some("…"))
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

/// Files and directories starting with `_` or `.` are never content
pub(crate) fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str()
        .map(|s| s.starts_with('_') || s.starts_with('.'))
        .unwrap_or(false)
}
