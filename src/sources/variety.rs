use anyhow::Result;
use scraper::{ElementRef, Html};

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates;
use crate::dom;

pub const NAME: &str = "variety";

pub struct Variety;

impl Variety {
    /// Single byline first, then the multi-author tagline.
    fn author(root: ElementRef) -> Result<(Option<String>, Option<String>)> {
        if let Some(byline) = dom::first(root, "p.lrv-u-margin-tb-00")?
            && let Some(a) = dom::first(byline, "a.c-link")?
        {
            return Ok((Some(dom::text(a)), dom::attr(a, "href")));
        }
        if let Some(tagline) = dom::first(root, "div.c-tagline")? {
            let links = dom::all(tagline, "a.c-link")?;
            if !links.is_empty() {
                let names = links.iter().map(|a| dom::text(*a)).collect::<Vec<_>>();
                let href = links.iter().find_map(|a| dom::attr(*a, "href"));
                return Ok((Some(names.join(", ")), href));
            }
        }
        Ok((None, None))
    }
}

impl Source for Variety {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["variety.com"]
    }

    fn default_url(&self) -> &str {
        "https://variety.com/v/film/"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting all stories");
        let doc = Html::parse_document(page.html);
        let mut teasers = Vec::new();
        for item in dom::all(doc.root_element(), "li.o-tease-list__item")? {
            let title = dom::first_text(item, "h3.c-title")?;
            let thumbnail = dom::first_attr(item, "img.c-lazy-image__img", "src")?;
            let category = dom::first_text(item, "a.c-span__link")?;
            let link = dom::first(item, "a.c-title__link")?.and_then(|a| dom::link(page.url, a));

            // Incomplete cards are usually ads or video promos.
            if let (Some(title), Some(thumbnail), Some(category), Some(link)) =
                (title, thumbnail, category, link)
            {
                teasers.push(Teaser {
                    title: Some(title),
                    thumbnail: Some(thumbnail),
                    category: Some(category),
                    ..Teaser::new(link)
                });
            }
        }
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        let root = doc.root_element();
        let (author, author_url) = Self::author(root)?;

        let categories = match dom::first(root, "ol.o-nav-breadcrumblist__list")? {
            Some(list) => dom::all(list, "a")?.into_iter().map(dom::text).collect(),
            None => Vec::new(),
        };

        Ok(Detail {
            title: dom::first_text(root, "h1#section-heading")?,
            content: dom::all(root, "p.paragraph")?
                .into_iter()
                .map(dom::text)
                .collect(),
            author,
            author_url,
            published: dom::first_text(root, "time.c-timestamp")?.map(|t| dates::from_human(&t)),
            categories,
            banner: dom::first_attr(root, "img.c-lazy-image__img", "src")?,
            ..Detail::default()
        })
    }
}
