//! Article model

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a markdown file cannot become an article
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("{0:?} has no title in its front-matter")]
    MissingTitle(PathBuf),

    #[error("{0:?} has no date in its front-matter")]
    MissingDate(PathBuf),

    #[error("{path:?} has an invalid date: {value}")]
    InvalidDate { path: PathBuf, value: String },
}

/// A blog article
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// Article title, never empty
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Plain-text summary shown in listings
    pub excerpt: String,

    /// URL path, always starting and ending with `/`
    pub path: String,

    /// Source file path relative to the source directory
    pub source: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Whether the article is a draft
    pub draft: bool,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Article {
    /// Create an article with the required fields
    pub fn new(title: String, date: NaiveDate, path: String) -> Self {
        Self {
            title,
            date,
            raw: String::new(),
            content: String::new(),
            excerpt: String::new(),
            path,
            source: String::new(),
            full_source: PathBuf::new(),
            draft: false,
            extra: HashMap::new(),
        }
    }

    /// The article published right before this one in a newest-first list
    pub fn prev<'a>(&self, articles: &'a [Article]) -> Option<&'a Article> {
        let pos = articles.iter().position(|a| a.path == self.path)?;
        articles.get(pos + 1)
    }

    /// The article published right after this one in a newest-first list
    pub fn next<'a>(&self, articles: &'a [Article]) -> Option<&'a Article> {
        let pos = articles.iter().position(|a| a.path == self.path)?;
        pos.checked_sub(1).and_then(|i| articles.get(i))
    }
}
