//! The Guardian. Its film front groups stories into one section per day.

use anyhow::Result;
use scraper::Html;

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates;
use crate::dom;

pub const NAME: &str = "theguardian";

pub struct Guardian;

impl Source for Guardian {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["theguardian.com"]
    }

    fn default_url(&self) -> &str {
        "https://www.theguardian.com/film"
    }

    /// Only today's section is read.
    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        let today = dates::section_id(page.now.date());
        tracing::info!(source = NAME, section = %today, "getting all stories");
        let doc = Html::parse_document(page.html);
        let css = format!(r#"section[data-component="{today}"] ul.dcr-pnnc7v li div.dcr-rni59y a"#);
        let teasers = dom::all(doc.root_element(), &css)?
            .into_iter()
            .filter_map(|a| dom::link(page.url, a))
            .map(Teaser::new)
            .collect();
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        let root = doc.root_element();

        let title = match dom::first_text(root, "h1.dcr-1w6uej9")? {
            Some(title) => Some(title),
            None => dom::first_text(root, r#"div[data-gu-name="standfirst"] p"#)?,
        };
        let dateline = match dom::first_text(root, "span.dcr-u0h1qy")? {
            Some(text) => Some(text),
            None => dom::first_text(root, "div.dcr-1pexjb9")?,
        };
        if dateline.is_none() {
            tracing::warn!(url = %page.url, "time tag not found");
        }

        Ok(Detail {
            title,
            content: dom::first_blocks(root, "#maincontent > div")?,
            author: dom::first_text(root, r#"a[rel="author"]"#)?,
            published: dateline.map(|t| dates::from_human(&t)),
            categories: dom::first_text(root, "div.breadcrumbs a")?.into_iter().collect(),
            banner: dom::first_attr(root, "#img-1 > picture > img", "src")?,
            ..Detail::default()
        })
    }

    fn section(&self, categories: &[String]) -> String {
        categories.join(", ")
    }
}
