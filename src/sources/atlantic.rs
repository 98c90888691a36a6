use anyhow::Result;
use scraper::Html;

use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates;
use crate::dom;

pub const NAME: &str = "atlantic";

pub struct Atlantic;

impl Source for Atlantic {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["theatlantic.com"]
    }

    fn default_url(&self) -> &str {
        "https://www.theatlantic.com/culture/"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting all stories");
        let doc = Html::parse_document(page.html);
        let mut teasers = Vec::new();
        for story in dom::all(doc.root_element(), "article.LandingRiver_promoItem__SLYUT")? {
            let Some(anchor) = dom::first(story, "a.LandingRiver_titleLink__nUImQ")? else {
                continue;
            };
            let Some(link) = dom::link(page.url, anchor) else {
                continue;
            };
            let byline = dom::first(story, "p.LandingMetadata_root__qrlUA a")?;
            teasers.push(Teaser {
                title: dom::first_text(anchor, "span")?,
                author: byline.map(dom::text),
                author_url: byline.and_then(|a| dom::attr(a, "href")),
                published: dom::first_attr(
                    story,
                    "time.LandingMetadata_datePublished__iRPUc",
                    "datetime",
                )?
                .map(|t| dates::from_iso(&t)),
                thumbnail: dom::first_attr(story, "img.LandingRiver_image__VWDpl", "src")?,
                ..Teaser::new(link)
            });
        }
        Ok(teasers)
    }

    fn detail(&self, page: &Page) -> Result<Detail> {
        let doc = Html::parse_document(page.html);
        let root = doc.root_element();
        Ok(Detail {
            title: dom::first_text(root, "h1.ArticleTitle_root__VrZaG")?,
            content: dom::first_blocks(root, "section.ArticleBody_root__2gF81")?,
            banner: dom::first_attr(
                root,
                "img.Image_root__XxsOp.ArticleLeadArt_image__HZS4B",
                "src",
            )?,
            categories: dom::all(root, "a.ArticleRubric_link__nl9hy")?
                .into_iter()
                .map(dom::text)
                .collect(),
            ..Detail::default()
        })
    }
}
