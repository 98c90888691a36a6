use anyhow::Result;
use scraper::Html;

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dom;

pub const NAME: &str = "slashfilm";

pub struct SlashFilm;

impl Source for SlashFilm {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["slashfilm.com"]
    }

    fn default_url(&self) -> &str {
        "https://www.slashfilm.com/category/movies/"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting all stories");
        let doc = Html::parse_document(page.html);
        let mut teasers = Vec::new();
        for story in dom::all(doc.root_element(), "article.article-block")? {
            let Some(anchor) = dom::first(story, "div.article-description a")? else {
                continue;
            };
            let Some(link) = dom::link(page.url, anchor) else {
                continue;
            };
            teasers.push(Teaser {
                title: Some(dom::text(anchor)),
                author: dom::first_text(story, "div.more-article-info span.author")?,
                category: dom::first_text(story, "div.w-display-card-category a")?,
                thumbnail: dom::first_attr(story, "div.image-holder img", "src")?,
                ..Teaser::new(link)
            });
        }
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        let root = doc.root_element();
        Ok(Detail {
            title: dom::first_text(root, "h1.title-gallery")?,
            content: dom::first_blocks(root, "div.columns-holder")?,
            banner: dom::first_attr(root, "img.gallery-image", "src")?,
            ..Detail::default()
        })
    }
}
