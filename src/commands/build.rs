//! Build the static site

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::content::ContentLoader;
use crate::generator::Generator;
use crate::{Site, CONFIG_FILE};

/// Minimum delay between two rebuilds triggered by file changes
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Load every article and generate the site
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    // Fail before touching the filesystem when metadata is missing
    site.config.site_metadata()?;
    site.config.validate()?;

    let articles = ContentLoader::new(site).load_articles()?;
    tracing::info!("Loaded {} articles", articles.len());

    Generator::new(site)?.generate(&articles)?;

    tracing::info!("Built in {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

/// Watch the content, static files and configuration, rebuilding on change
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&site.source_dir, RecursiveMode::Recursive)?;
    if site.static_dir.exists() {
        watcher.watch(&site.static_dir, RecursiveMode::Recursive)?;
    }
    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > DEBOUNCE {
                    tracing::info!("File changed, rebuilding...");
                    if let Err(e) = rebuild(site) {
                        tracing::error!("Build failed: {:#}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

/// Rebuild with a freshly loaded configuration
fn rebuild(site: &Site) -> Result<()> {
    let site = Site::new(&site.base_dir)?;
    run(&site)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, SiteConfig};
    use std::fs;

    #[test]
    fn test_run_builds_site() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "site_metadata:\n  title: Built\n  author: Me\n",
        )
        .unwrap();
        let post = dir.path().join("content/hello/index.md");
        fs::create_dir_all(post.parent().unwrap()).unwrap();
        fs::write(&post, "---\ntitle: Hello\ndate: 2021-04-01\n---\nHi\n").unwrap();

        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();

        assert!(site.public_dir.join("index.html").exists());
        assert!(site.public_dir.join("hello/index.html").exists());
        assert!(site.public_dir.join("404.html").exists());
    }

    #[test]
    fn test_run_without_metadata_fails() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());

        let err = run(&site).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingSiteMetadata)
        ));
        assert!(!site.public_dir.exists());
    }
}
