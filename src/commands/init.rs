//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
site_metadata:
  title: My Blog
  author: Your Name

# Directory
source_dir: content
public_dir: public
static_dir: static

# Writing
date_format: MMMM DD, YYYY
excerpt_length: 140
render_drafts: false
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    fs::create_dir_all(target_dir.join("content/hello-world"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    fs::write(&config_path, DEFAULT_CONFIG)?;

    let today = chrono::Local::now().date_naive();
    let sample_article = format!(
        r#"---
title: Hello World
date: {}
---

This is your first article. Edit `content/hello-world/index.md` or create a
new one:

```bash
$ folio new "My New Article"
```

Then build the site into `public/`:

```bash
$ folio build
```
"#,
        today.format("%Y-%m-%d")
    );

    fs::write(
        target_dir.join("content/hello-world/index.md"),
        sample_article,
    )?;

    tracing::debug!("Initialized site in {:?}", target_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;
    use crate::Site;

    #[test]
    fn test_init_site_builds() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.site_metadata().unwrap().title, "My Blog");

        let articles = ContentLoader::new(&site).load_articles().unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].path, "/hello-world/");

        site.build().unwrap();
        assert!(site.public_dir.join("hello-world/index.html").exists());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
