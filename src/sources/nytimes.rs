use anyhow::Result;
use scraper::{ElementRef, Html};

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates;
use crate::dom;

pub const NAME: &str = "nytimes";

pub struct NyTimes;

/// Article layout shared with Collider.
pub(crate) fn header_block_detail(root: ElementRef) -> Result<Detail> {
    Ok(Detail {
        title: dom::first_text(root, "h1.article-header-title")?,
        content: dom::first_blocks(root, "div.content-block-regular")?,
        banner: dom::first_attr(root, "div.heading_image img", "src")?,
        ..Detail::default()
    })
}

impl Source for NyTimes {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["nytimes.com"]
    }

    fn default_url(&self) -> &str {
        "https://www.nytimes.com/section/movies"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting all stories");
        let doc = Html::parse_document(page.html);
        let mut teasers = Vec::new();
        for item in dom::all(doc.root_element(), "div.css-13mho3u li.css-18yolpw")? {
            let Some(link) = dom::first(item, "a.css-8hzhxf")?.and_then(|a| dom::link(page.url, a))
            else {
                continue;
            };
            let author = dom::first_text(item, "p.css-1y3ykdt.e140qd2t0")?
                .map(|a| a.strip_prefix("By").unwrap_or(&a).trim().to_string());
            teasers.push(Teaser {
                title: dom::first_text(item, "h3.css-1j88qqx.e15t083i0")?,
                subtitle: dom::first_text(item, "p.css-1pga48a.e15t083i1")?,
                author,
                published: dom::first_text(item, "div > div > span")?
                    .map(|t| dates::from_human(&t)),
                thumbnail: dom::first_attr(item, "figure div img", "src")?,
                ..Teaser::new(link)
            });
        }
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        header_block_detail(doc.root_element())
    }
}
