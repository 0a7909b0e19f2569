//! Generator module - renders every page and writes the static site

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::SiteMetadata;
use crate::content::loader::is_hidden;
use crate::content::Article;
use crate::layout::Layout;
use crate::templates::{ArticleData, NavArticle, TemplateRenderer};
use crate::Site;

/// Heading of the article listing on the home page
const INDEX_HEADING: &str = "Posts";

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    layout: Layout,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            layout: Layout::new()?,
        })
    }

    /// Generate the entire site from articles sorted newest first
    pub fn generate(&self, articles: &[Article]) -> Result<()> {
        // Nothing is written unless every page can be composed
        let metadata = self.site.config.site_metadata()?;
        self.site.config.validate()?;

        fs::create_dir_all(&self.site.public_dir)?;

        self.copy_static_dir()?;
        self.copy_source_assets()?;

        self.generate_index(metadata, articles)?;
        self.generate_articles(metadata, articles)?;
        self.generate_not_found(metadata)?;

        tracing::info!(
            "Generated {} pages in {:?}",
            articles.len() + 2,
            self.site.public_dir
        );

        Ok(())
    }

    /// Generate the home page listing every article
    fn generate_index(&self, metadata: &SiteMetadata, articles: &[Article]) -> Result<()> {
        let date_format = &self.site.config.date_format;
        let summaries: Vec<ArticleData> = articles
            .iter()
            .map(|a| ArticleData::summary(a, date_format))
            .collect();

        let body = self.renderer.render_index(INDEX_HEADING, &summaries)?;
        let html = self.layout.compose(Some(metadata), Some(&body))?;
        self.write_page(&self.site.public_dir.join("index.html"), &html)
    }

    /// Generate one page per article
    fn generate_articles(&self, metadata: &SiteMetadata, articles: &[Article]) -> Result<()> {
        let date_format = &self.site.config.date_format;

        for article in articles {
            let data = ArticleData::from_article(article, date_format);
            let prev = article.prev(articles).map(NavArticle::from);
            let next = article.next(articles).map(NavArticle::from);

            let body = self
                .renderer
                .render_article(&data, prev.as_ref(), next.as_ref())?;
            let html = self.layout.compose(Some(metadata), Some(&body))?;

            let output_path = self.output_path(&article.path);
            self.write_page(&output_path, &html)?;
        }

        Ok(())
    }

    /// Generate the not-found page served for unknown paths
    fn generate_not_found(&self, metadata: &SiteMetadata) -> Result<()> {
        let body = self.renderer.render_not_found()?;
        let html = self.layout.compose(Some(metadata), Some(&body))?;
        self.write_page(&self.site.public_dir.join("404.html"), &html)
    }

    /// Output file for a `/a/b/` url path
    fn output_path(&self, url_path: &str) -> PathBuf {
        // Strip the leading slash so join never produces an absolute path
        let clean_path = url_path.trim_matches('/');
        self.site.public_dir.join(clean_path).join("index.html")
    }

    fn write_page(&self, path: &Path, html: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(path, html).map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", path, e))?;
        tracing::debug!("Generated: {:?}", path);
        Ok(())
    }

    /// Copy the static directory verbatim into the public directory
    fn copy_static_dir(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let copied = copy_tree(static_dir, &self.site.public_dir, |_| true)?;
        tracing::info!("Copied {} static files", copied);
        Ok(())
    }

    /// Copy images and other files that sit next to articles
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        let copied = copy_tree(source_dir, &self.site.public_dir, |path| {
            !matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("md") | Some("markdown")
            )
        })?;
        tracing::debug!("Copied {} content assets", copied);
        Ok(())
    }
}

/// Copy files under `from` to the same relative location under `to`,
/// skipping hidden entries. Returns the number of files copied.
fn copy_tree(from: &Path, to: &Path, include: impl Fn(&Path) -> bool) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(from)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !include(path) {
            continue;
        }

        let dest = to.join(path.strip_prefix(from)?);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(path, &dest)?;
        copied += 1;
    }

    Ok(copied)
}
