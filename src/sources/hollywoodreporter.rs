use anyhow::Result;
use scraper::Html;

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates;
use crate::dom;

pub const NAME: &str = "hollywoodreporter";

pub struct HollywoodReporter;

impl Source for HollywoodReporter {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["hollywoodreporter.com"]
    }

    fn default_url(&self) -> &str {
        "https://www.hollywoodreporter.com/c/movies/"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting all stories");
        let doc = Html::parse_document(page.html);
        let mut teasers = Vec::new();
        for story in dom::all(doc.root_element(), "div.story")? {
            let Some(anchor) = dom::first(story, "h3.c-title a")? else {
                continue;
            };
            let Some(link) = dom::link(page.url, anchor) else {
                continue;
            };
            let byline = dom::first(story, "div.c-tagline a")?;
            teasers.push(Teaser {
                title: Some(dom::text(anchor)),
                author: byline.map(dom::text),
                author_url: byline.and_then(|a| dom::attr(a, "href")),
                published: dom::first_text(story, "time")?.map(|t| dates::from_human(&t)),
                category: dom::first_text(story, "span.c-span a")?,
                thumbnail: dom::first_attr(story, "img.c-lazy-image__img", "src")?,
                ..Teaser::new(link)
            });
        }
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        let root = doc.root_element();

        let mut content = Vec::new();
        for block in dom::all(root, "div.a-content")? {
            let social = dom::all(block, "div.a-article-grid__social")?;
            content.push(dom::text_without(block, &social));
        }

        let (author, author_url, published) = match dom::first(root, "div.a-article-grid__author")? {
            Some(section) => {
                let anchor = dom::first(section, "a[href]")?;
                (
                    anchor.map(dom::text),
                    anchor.and_then(|a| dom::attr(a, "href")),
                    dom::first_text(section, "time")?.map(|t| dates::from_human(&t)),
                )
            }
            None => (None, None, None),
        };

        let mut categories = Vec::new();
        for item in dom::all(root, "li")? {
            if let Some(name) = dom::first_text(item, "a:not([class])")? {
                categories.push(name);
            }
        }

        Ok(Detail {
            title: dom::first_text(root, "h1.article-title")?,
            subtitle: dom::first_text(root, "p.article-excerpt")?,
            content,
            author,
            author_url,
            published,
            categories,
            banner: dom::first_attr(root, "img.c-lazy-image__img", "data-lazy-src")?,
        })
    }
}
