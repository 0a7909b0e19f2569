//! Create a new article

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create `<source_dir>/<slug>/index.md` with front-matter for `title`
///
/// The slug comes from `dir_name` when given, otherwise from the title.
pub fn create_article(site: &Site, title: &str, dir_name: Option<&str>) -> Result<PathBuf> {
    let title = title.trim();
    if title.is_empty() {
        anyhow::bail!("Article title must not be empty");
    }

    let slug = slug::slugify(dir_name.unwrap_or(title));
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a path from title {:?}", title);
    }

    let file_path = site.source_dir.join(&slug).join("index.md");
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().date_naive();
    let content = format!(
        "---\ntitle: \"{}\"\ndate: {}\n---\n",
        title.replace('\\', "\\\\").replace('"', "\\\""),
        today.format("%Y-%m-%d")
    );

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::ContentLoader;

    #[test]
    fn test_create_article_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        let path = create_article(&site, "Reading \"TLS\" Notes", None).unwrap();
        assert_eq!(path, site.source_dir.join("reading-tls-notes/index.md"));

        let article = ContentLoader::new(&site).load_article(&path).unwrap();
        assert_eq!(article.title, "Reading \"TLS\" Notes");
        assert_eq!(article.path, "/reading-tls-notes/");
        assert_eq!(article.date, chrono::Local::now().date_naive());
    }

    #[test]
    fn test_create_article_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        create_article(&site, "Twice", None).unwrap();
        assert!(create_article(&site, "Twice", None).is_err());
        assert!(create_article(&site, "Twice", Some("other")).is_ok());
    }

    #[test]
    fn test_create_article_rejects_empty_title() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        assert!(create_article(&site, "   ", None).is_err());
    }
}
