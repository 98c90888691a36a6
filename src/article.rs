//! Story data as it moves through the pipeline.
//!
//! A [`Teaser`] comes from a section front, a [`Detail`] from the article
//! page. They merge into a [`Story`], which is stamped into the wire-level
//! [`Article`].

use serde::{Deserialize, Serialize};

use crate::dates::Stamp;
use crate::sources::Source;

/// A story card on a section front.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Teaser {
    pub link: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub published: Option<Stamp>,
    pub thumbnail: Option<String>,
}

impl Teaser {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Self::default()
        }
    }
}

/// What an article page yields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detail {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Vec<String>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub published: Option<Stamp>,
    pub categories: Vec<String>,
    pub banner: Option<String>,
}

/// A teaser merged with its article page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Story {
    pub link: String,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Vec<String>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub published: Option<Stamp>,
    pub categories: Vec<String>,
    pub banner: Option<String>,
    pub thumbnail: Option<String>,
}

/// Prefer the article page's value unless it is blank.
fn prefer(detail: Option<String>, teaser: Option<String>) -> Option<String> {
    detail.filter(|v| !v.trim().is_empty()).or(teaser)
}

impl Story {
    pub fn merge(teaser: Teaser, detail: Detail) -> Self {
        let categories = if detail.categories.is_empty() {
            teaser.category.into_iter().collect()
        } else {
            detail.categories
        };
        Self {
            link: teaser.link,
            title: prefer(detail.title, teaser.title),
            subtitle: prefer(detail.subtitle, teaser.subtitle),
            content: detail.content,
            author: prefer(detail.author, teaser.author),
            author_url: prefer(detail.author_url, teaser.author_url),
            published: detail
                .published
                .filter(|s| !s.is_empty())
                .or(teaser.published),
            categories,
            banner: detail.banner,
            thumbnail: teaser.thumbnail,
        }
    }
}

/// The normalized record served over HTTP and persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    pub source: String,
    #[serde(rename = "sourceIconURL")]
    pub source_icon_url: String,
    pub source_section: String,
    pub title: String,
    pub subtitle: String,
    pub content: Vec<String>,
    pub author: String,
    pub url_article: String,
    pub url_banner_image: String,
    pub url_thumbnail_image: String,
    pub published_date: String,
    pub published_time: String,
    pub captured_date: String,
    pub captured_time: String,
    pub categories: Vec<String>,
}

impl Article {
    /// Stamp a merged story with its source and capture time.
    pub fn assemble(source: &dyn Source, story: Story, captured: &(String, String)) -> Self {
        let published = story.published.unwrap_or_default();
        let banner = story.banner.unwrap_or_default();
        let thumbnail = story
            .thumbnail
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| banner.clone());
        Self {
            source: source.label().to_string(),
            source_icon_url: source.label().to_string(),
            source_section: source.section(&story.categories),
            title: story.title.unwrap_or_default(),
            subtitle: story.subtitle.unwrap_or_default(),
            content: story.content,
            author: story.author.unwrap_or_default(),
            url_article: story.link,
            url_banner_image: banner,
            url_thumbnail_image: thumbnail,
            published_date: published.date,
            published_time: published.time,
            captured_date: captured.0.clone(),
            captured_time: captured.1.clone(),
            categories: story.categories,
        }
    }

    /// Identity used to de-duplicate stored articles.
    pub fn key(&self) -> String {
        if self.url_article.is_empty() {
            format!("{}:{}", self.source, self.title)
        } else {
            self.url_article.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::deadline::Deadline;
    use crate::sources::vulture::Vulture;

    fn teaser() -> Teaser {
        Teaser {
            link: "https://example.com/a".to_string(),
            title: Some("Teaser title".to_string()),
            category: Some("Film".to_string()),
            author: Some("Jane Doe".to_string()),
            thumbnail: Some("https://img/thumb.jpg".to_string()),
            published: Some(Stamp {
                date: "2026-10-18".to_string(),
                time: String::new(),
            }),
            ..Teaser::default()
        }
    }

    #[test]
    fn merge_prefers_detail_values() {
        let detail = Detail {
            title: Some("Full headline".to_string()),
            content: vec!["p1".to_string()],
            categories: vec!["Movies".to_string(), "Reviews".to_string()],
            ..Detail::default()
        };
        let story = Story::merge(teaser(), detail);
        assert_eq!(story.title.as_deref(), Some("Full headline"));
        assert_eq!(story.author.as_deref(), Some("Jane Doe"));
        assert_eq!(story.categories, vec!["Movies", "Reviews"]);
        assert_eq!(story.published.unwrap().date, "2026-10-18");
    }

    #[test]
    fn merge_falls_back_to_teaser_on_blank_detail() {
        let detail = Detail {
            title: Some("   ".to_string()),
            ..Detail::default()
        };
        let story = Story::merge(teaser(), detail);
        assert_eq!(story.title.as_deref(), Some("Teaser title"));
        assert_eq!(story.categories, vec!["Film"]);
    }

    #[test]
    fn assemble_fills_defaults_and_thumbnail_fallback() {
        let story = Story {
            link: "https://deadline.com/x".to_string(),
            banner: Some("https://img/banner.jpg".to_string()),
            categories: vec!["Film".to_string(), "News".to_string()],
            ..Story::default()
        };
        let captured = ("2026-10-19".to_string(), "10:00:00".to_string());
        let article = Article::assemble(&Deadline, story, &captured);
        assert_eq!(article.source, "deadline");
        assert_eq!(article.source_icon_url, "deadline");
        assert_eq!(article.source_section, "Film");
        assert_eq!(article.url_thumbnail_image, "https://img/banner.jpg");
        assert_eq!(article.title, "");
        assert_eq!(article.captured_date, "2026-10-19");
    }

    #[test]
    fn section_follows_source_rules() {
        let story = Story {
            categories: vec!["Movies".to_string(), "Horror".to_string()],
            ..Story::default()
        };
        let captured = (String::new(), String::new());
        let article = Article::assemble(&Vulture, story, &captured);
        assert_eq!(article.source_section, "Movies,Horror");
    }

    #[test]
    fn serializes_camel_case_without_nulls() {
        let article = Article {
            source: "variety".to_string(),
            source_icon_url: "variety".to_string(),
            ..Article::default()
        };
        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["sourceIconURL"], "variety");
        assert_eq!(json["urlArticle"], "");
        assert_eq!(json["content"], serde_json::json!([]));
        assert!(json.as_object().unwrap().values().all(|v| !v.is_null()));
    }

    #[test]
    fn key_falls_back_to_source_and_title() {
        let mut article = Article {
            source: "atlantic".to_string(),
            title: "T".to_string(),
            ..Article::default()
        };
        assert_eq!(article.key(), "atlantic:T");
        article.url_article = "https://theatlantic.com/t".to_string();
        assert_eq!(article.key(), "https://theatlantic.com/t");
    }
}
