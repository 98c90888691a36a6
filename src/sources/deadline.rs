//! Deadline. Its Penske (PMC) layout is also the fallback for unknown hosts.

use anyhow::Result;
use scraper::Html;

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates;
use crate::dom;

pub const NAME: &str = "deadline";

/// Related-story blocks injected between paragraphs.
const INJECTED_CLASS: &str = "injected-related-story";

pub struct Deadline;

impl Source for Deadline {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["deadline.com"]
    }

    fn default_url(&self) -> &str {
        "https://deadline.com/v/film/"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting parent links");
        let doc = Html::parse_document(page.html);
        let teasers = dom::all(doc.root_element(), "a.c-title__link")?
            .into_iter()
            .filter_map(|a| {
                let link = dom::link(page.url, a)?;
                let title = Some(dom::text(a)).filter(|t| !t.is_empty());
                Some(Teaser {
                    title,
                    ..Teaser::new(link)
                })
            })
            .collect();
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        let root = doc.root_element();

        let content = dom::all(root, "div.a-content")?
            .into_iter()
            .filter(|div| !dom::has_class(*div, INJECTED_CLASS))
            .map(dom::text)
            .collect();

        let mut categories = Vec::new();
        for item in dom::all(root, "li.o-nav__list-item")? {
            if let Some(name) = dom::first_text(item, "a.c-nav-link")? {
                categories.push(name);
            }
        }

        Ok(Detail {
            title: dom::first_text(root, "h1.c-title")?,
            content,
            author: dom::first_text(root, "p.pmc-u-margin-tb-00.pmc-u-font-size-14")?,
            published: dom::first_text(root, "time.pmc-u-color-grey-medium-dark")?
                .map(|t| dates::from_human(&t)),
            categories,
            ..Detail::default()
        })
    }
}
