use anyhow::Result;
use scraper::{ElementRef, Html};

use super::nytimes::header_block_detail;
use super::{Page, Source};
use crate::article::{Detail, Teaser};
use crate::dates;
use crate::dom;

pub const NAME: &str = "collider";

pub struct Collider;

impl Collider {
    /// First responsive `srcset`, then the lazy `img`.
    fn thumbnail(card: ElementRef) -> Result<Option<String>> {
        if let Some(srcset) = dom::all(card, "source")?
            .into_iter()
            .find_map(|s| dom::attr(s, "srcset"))
        {
            return Ok(Some(srcset));
        }
        Ok(dom::first(card, "img")?
            .and_then(|img| dom::attr(img, "data-img-url").or_else(|| dom::attr(img, "src"))))
    }
}

impl Source for Collider {
    fn name(&self) -> &str {
        NAME
    }

    fn hosts(&self) -> &[&str] {
        &["collider.com"]
    }

    fn default_url(&self) -> &str {
        "https://collider.com/"
    }

    fn stories(&self, page: &Page) -> Result<Vec<Teaser>> {
        tracing::info!(source = NAME, "getting all stories");
        let doc = Html::parse_document(page.html);
        let mut teasers = Vec::new();
        for card in dom::all(
            doc.root_element(),
            "div.section-latest-news div.display-card",
        )? {
            let Some(anchor) = dom::first(card, "h5.display-card-title a")? else {
                continue;
            };
            let Some(link) = dom::link(page.url, anchor) else {
                continue;
            };
            let byline = dom::first(card, "div.w-author a")?;
            teasers.push(Teaser {
                title: Some(dom::text(anchor)),
                author: byline.map(dom::text),
                author_url: byline.and_then(|a| dom::link(page.url, a)),
                published: dom::first_attr(card, "time.display-card-date", "datetime")?
                    .map(|t| dates::from_iso(&t)),
                category: dom::first_text(card, "div.w-display-card-category a")?,
                thumbnail: Self::thumbnail(card)?,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::test_page as page;
    use url::Url;

    #[test]
    fn stories_prefer_srcset_thumbnail() {
        let url = Url::parse("https://collider.com/").unwrap();
        let html = r#"
            <div class="section-latest-news">
              <div class="display-card">
                <picture>
                  <source media="(min-width: 768px)">
                  <source srcset="https://static.collider.com/wide.jpg">
                  <img src="https://static.collider.com/fallback.jpg">
                </picture>
                <div class="w-display-card-category"><a>Movie News</a></div>
                <h5 class="display-card-title"><a href="/movie-news-a/">News A</a></h5>
                <div class="w-author"><a href="/author/jane/">Jane</a></div>
                <time class="display-card-date" datetime="2026-10-18T14:00:00Z">2 hours ago</time>
              </div>
            </div>
        "#;
        let teasers = Collider.stories(&page(html, &url)).unwrap();
        assert_eq!(teasers.len(), 1);
        let t = &teasers[0];
        assert_eq!(t.link, "https://collider.com/movie-news-a/");
        assert_eq!(t.author_url.as_deref(), Some("https://collider.com/author/jane/"));
        assert_eq!(t.category.as_deref(), Some("Movie News"));
        assert_eq!(t.thumbnail.as_deref(), Some("https://static.collider.com/wide.jpg"));
        assert_eq!(t.published.as_ref().unwrap().time, "14:00:00");
    }

    #[test]
    fn stories_without_container_are_empty() {
        let url = Url::parse("https://collider.com/").unwrap();
        let teasers = Collider.stories(&page("<div class=\"display-card\"></div>", &url)).unwrap();
        assert!(teasers.is_empty());
    }
}
