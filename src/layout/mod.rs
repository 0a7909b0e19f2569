//! Page composer - wraps rendered page content in the shared site frame
//!
//! Every page of the site goes through [`Layout::compose`]: the document
//! title, descriptive meta tags, header, global styles and content container
//! are identical everywhere, only the child content changes.

use tera::{Context, Tera};
use thiserror::Error;

use crate::config::SiteMetadata;
use crate::templates::escape_text_filter;

/// Fixed description advertised in every page's `<meta name="description">`
pub const DESCRIPTION: &str = "Personal website and blog of Fahad Almusharraf";

/// Fixed keywords advertised in every page's `<meta name="keywords">`
pub const KEYWORDS: &str = "blog, software engineering, security, programming";

/// Background color token exposed to the stylesheet as `--background-color`
pub const BACKGROUND_COLOR: &str = "#fafafa";

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("site metadata is required to compose a page")]
    MissingSiteMetadata,

    #[error("failed to render layout: {0}")]
    Template(#[from] tera::Error),
}

/// The shared visual frame of the site
pub struct Layout {
    tera: Tera,
}

impl Layout {
    pub fn new() -> Result<Self, LayoutError> {
        let mut tera = Tera::default();

        // Child content is already rendered HTML; text goes through escape_text
        tera.autoescape_on(vec![]);
        tera.add_raw_template("layout.html", include_str!("../templates/site/layout.html"))?;
        tera.register_filter("escape_text", escape_text_filter);

        Ok(Self { tera })
    }

    /// Compose one full HTML document.
    ///
    /// `content` is placed verbatim inside the container; `None` renders an
    /// empty container. Missing `metadata` is a configuration error.
    pub fn compose(
        &self,
        metadata: Option<&SiteMetadata>,
        content: Option<&str>,
    ) -> Result<String, LayoutError> {
        let site = metadata.ok_or(LayoutError::MissingSiteMetadata)?;

        let mut context = Context::new();
        context.insert("site", site);
        context.insert("description", DESCRIPTION);
        context.insert("keywords", KEYWORDS);
        context.insert("background_color", BACKGROUND_COLOR);
        context.insert("content", content.unwrap_or_default());

        Ok(self.tera.render("layout.html", &context)?)
    }
}
