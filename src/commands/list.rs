//! List site content

use anyhow::Result;

use crate::content::{Article, ContentLoader};
use crate::Site;

/// Print every article, newest first
pub fn run(site: &Site) -> Result<()> {
    let articles = ContentLoader::new(site).load_articles()?;
    print!("{}", format_listing(&articles));
    Ok(())
}

fn format_listing(articles: &[Article]) -> String {
    let mut out = format!("Articles ({}):\n", articles.len());
    for article in articles {
        out.push_str(&format!(
            "  {} - {} [{}]\n",
            article.date.format("%Y-%m-%d"),
            article.title,
            article.path
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_listing() {
        let article = Article::new(
            "Hello".to_string(),
            NaiveDate::from_ymd_opt(2020, 5, 11).unwrap(),
            "/hello/".to_string(),
        );
        assert_eq!(
            format_listing(&[article]),
            "Articles (1):\n  2020-05-11 - Hello [/hello/]\n"
        );
        assert_eq!(format_listing(&[]), "Articles (0):\n");
    }
}
