//! Content module - handles articles and markdown processing

mod article;
mod frontmatter;
pub mod loader;
mod markdown;

pub use article::{Article, ContentError};
pub use frontmatter::FrontMatter;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
