use anyhow::Result;
use scraper::{ElementRef, Html};

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates;
use crate::dom;

pub const NAME: &str = "indiewire";

pub struct IndieWire;

impl IndieWire {
    /// Card image, falling back to any lazy-loaded `img`.
    fn thumbnail(card: ElementRef) -> Result<Option<String>> {
        if let Some(src) = dom::first_attr(card, r#"div[data-alias="image__inner-img"] img"#, "src")? {
            return Ok(Some(src));
        }
        Ok(dom::first(card, "img")?
            .and_then(|img| dom::attr(img, "data-img-url").or_else(|| dom::attr(img, "src"))))
    }
}

impl Source for IndieWire {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["indiewire.com"]
    }

    fn default_url(&self) -> &str {
        "https://www.indiewire.com/c/criticism/movies/"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting all stories");
        let doc = Html::parse_document(page.html);
        let mut teasers = Vec::new();
        for card in dom::all(doc.root_element(), r#"div[data-alias="card__inner"]"#)? {
            let Some(heading) = dom::first(card, r#"div[data-alias="card__card-title"]"#)? else {
                continue;
            };
            let Some(link) = dom::first(heading, "a")?.and_then(|a| dom::link(page.url, a)) else {
                continue;
            };
            teasers.push(Teaser {
                title: Some(dom::text(heading)).filter(|t| !t.is_empty()),
                category: dom::first_text(
                    card,
                    r#"div[data-alias="card__main"] div[data-alias="card__kicker"]"#,
                )?,
                author: dom::first_text(card, r#"div[data-alias="byline__text-wrapper"] span"#)?,
                published: dom::first_text(card, r#"time[data-alias="card_timestamp"]"#)?
                    .map(|t| dates::from_human(&t)),
                thumbnail: Self::thumbnail(card)?,
                ..Teaser::new(link)
            });
        }
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        let root = doc.root_element();
        Ok(Detail {
            title: dom::first_text(root, "h1.article-header-title")?,
            content: dom::first_blocks(root, r#"div[data-alias="gutenberg-content__content"]"#)?,
            banner: dom::first_attr(root, r#"div[data-alias="image__inner-img"] img"#, "src")?,
            ..Detail::default()
        })
    }

    fn section(&self, categories: &[String]) -> String {
        categories.join(", ")
    }
}
