use anyhow::Result;
use scraper::Html;

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates;
use crate::dom;

pub const NAME: &str = "vulture";

pub struct Vulture;

impl Source for Vulture {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["vulture.com"]
    }

    fn default_url(&self) -> &str {
        "https://www.vulture.com/movies/"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting all stories");
        let doc = Html::parse_document(page.html);
        let mut teasers = Vec::new();
        for story in dom::all(doc.root_element(), "li.article")? {
            let Some(anchor) = dom::first(story, "div.main-article-content a")? else {
                continue;
            };
            let Some(link) = dom::link(page.url, anchor) else {
                continue;
            };
            teasers.push(Teaser {
                title: Some(dom::text(anchor)),
                thumbnail: dom::first_attr(story, "div.article-img-wrapper img", "src")?,
                ..Teaser::new(link)
            });
        }
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        let root = doc.root_element();
        let byline = dom::first(root, "div.main-author a")?;
        Ok(Detail {
            title: dom::first_text(root, "h1.headline-primary")?,
            content: dom::first_blocks(root, "div.article-content")?,
            author: byline.map(dom::text),
            author_url: byline.and_then(|a| dom::link(page.url, a)),
            published: dom::first_text(root, "div.cb-date time")?.map(|t| dates::from_human(&t)),
            categories: dom::all(root, "ul.tags-list a")?
                .into_iter()
                .map(dom::text)
                .collect(),
            banner: dom::first_attr(root, "img.lede-image", "src")?,
            ..Detail::default()
        })
    }

    fn section(&self, categories: &[String]) -> String {
        categories.join(",")
    }
}
