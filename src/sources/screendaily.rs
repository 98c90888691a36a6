use anyhow::Result;
use scraper::Html;

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates;
use crate::dom;

pub const NAME: &str = "screendaily";

pub struct ScreenDaily;

impl Source for ScreenDaily {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["screendaily.com"]
    }

    fn default_url(&self) -> &str {
        "https://www.screendaily.com/box-office"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting all stories");
        let doc = Html::parse_document(page.html);
        let mut teasers = Vec::new();
        for story in dom::all(doc.root_element(), "div.spinLayout")? {
            let Some(anchor) = dom::first(story, "h2 a")? else {
                continue;
            };
            let Some(link) = dom::link(page.url, anchor) else {
                continue;
            };
            teasers.push(Teaser {
                title: Some(dom::text(anchor)),
                thumbnail: dom::first_attr(story, "img", "src")?,
                ..Teaser::new(link)
            });
        }
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        let root = doc.root_element();
        let byline = dom::first(root, "p.byline.meta a")?;
        Ok(Detail {
            title: dom::first_text(root, "div.story_title h1")?,
            content: dom::first_blocks(root, "div.articleContent")?,
            author: byline.map(dom::text),
            author_url: byline.and_then(|a| dom::link(page.url, a)),
            published: dom::first_text(root, "span.date")?.map(|t| dates::from_human(&t)),
            banner: dom::first_attr(root, "div.articleContent img", "src")?,
            ..Detail::default()
        })
    }
}
