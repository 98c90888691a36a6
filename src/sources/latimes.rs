use anyhow::Result;
use scraper::{ElementRef, Html};

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates::{self, Stamp};
use crate::dom;

pub const NAME: &str = "latimes";

pub struct LaTimes;

impl LaTimes {
    /// Day and time sit in separate spans; the time is kept as printed.
    fn published(root: ElementRef) -> Result<Option<Stamp>> {
        let Some(tag) = dom::first(root, "time.published-date")? else {
            return Ok(None);
        };
        let day = dom::first_text(tag, "span.published-date-day")?;
        let time = dom::first_text(tag, "span.published-time")?;
        if day.is_none() && time.is_none() {
            return Ok(None);
        }
        Ok(Some(Stamp {
            date: day.map(|d| dates::from_human(&d).date).unwrap_or_default(),
            time: time.unwrap_or_default(),
        }))
    }
}

impl Source for LaTimes {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["latimes.com"]
    }

    fn default_url(&self) -> &str {
        "https://www.latimes.com/entertainment-arts/movies"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting all stories");
        let doc = Html::parse_document(page.html);
        let mut teasers = Vec::new();
        for item in dom::all(doc.root_element(), "ul.list-menu.list-i-menu li")? {
            let Some(link) =
                dom::first(item, "a.link.promo-placeholder")?.and_then(|a| dom::link(page.url, a))
            else {
                continue;
            };
            teasers.push(Teaser {
                title: dom::first_text(item, "h2.promo-title a")?,
                ..Teaser::new(link)
            });
        }
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        let root = doc.root_element();
        Ok(Detail {
            content: dom::first_blocks(root, r#"div[data-element="story-body"]"#)?,
            author: dom::first_text(root, "div.author-name a")?,
            published: Self::published(root)?,
            categories: dom::first_text(root, "div.breadcrumbs a")?.into_iter().collect(),
            banner: dom::first_attr(root, "img.image", "srcset")?,
            ..Detail::default()
        })
    }

    fn section(&self, categories: &[String]) -> String {
        categories.join(", ")
    }
}
