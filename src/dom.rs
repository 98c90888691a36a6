//! Thin helpers over [`scraper`] used by every source adapter.
//!
//! Text extraction mirrors "strip" semantics: every text node is trimmed,
//! empty nodes are dropped, and the rest are concatenated with no separator.

use anyhow::{Result, anyhow};
use scraper::{ElementRef, Selector};
use url::Url;

/// Element names whose text counts as article body.
const BLOCK_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p"];

/// Compile a CSS selector.
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css:?}: {e}"))
}

/// First descendant of `scope` matching `css`.
pub fn first<'a>(scope: ElementRef<'a>, css: &str) -> Result<Option<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).next())
}

/// All descendants of `scope` matching `css`, in document order.
pub fn all<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    Ok(scope.select(&sel).collect())
}

/// Stripped text of an element.
pub fn text(el: ElementRef) -> String {
    el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Stripped text of an element, skipping anything inside `excluded`.
pub fn text_without(el: ElementRef, excluded: &[ElementRef]) -> String {
    let skip: Vec<_> = excluded.iter().map(|e| e.id()).collect();
    el.descendants()
        .filter(|node| !node.ancestors().any(|a| skip.contains(&a.id())))
        .filter_map(|node| node.value().as_text().map(|t| &**t))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Stripped text of the first match, if any and non-empty.
pub fn first_text(scope: ElementRef, css: &str) -> Result<Option<String>> {
    Ok(first(scope, css)?.map(text).filter(|t| !t.is_empty()))
}

/// Non-empty attribute value.
pub fn attr(el: ElementRef, name: &str) -> Option<String> {
    el.value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Attribute of the first match, if any.
pub fn first_attr(scope: ElementRef, css: &str, name: &str) -> Result<Option<String>> {
    Ok(first(scope, css)?.and_then(|el| attr(el, name)))
}

/// Whether the element carries the given class.
pub fn has_class(el: ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Text of the direct heading and paragraph children of `container`.
pub fn blocks(container: ElementRef) -> Vec<String> {
    container
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| BLOCK_TAGS.contains(&child.value().name()))
        .map(text)
        .collect()
}

/// Body blocks of the first container matching `css`, or nothing.
pub fn first_blocks(scope: ElementRef, css: &str) -> Result<Vec<String>> {
    Ok(first(scope, css)?.map(blocks).unwrap_or_default())
}

/// Resolve an href against the page it was found on.
pub fn resolve(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(|u| u.to_string())
}

/// Resolve an element's `href`.
pub fn link(base: &Url, el: ElementRef) -> Option<String> {
    attr(el, "href").and_then(|href| resolve(base, &href))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn base() -> Url {
        Url::parse("https://example.com/section/").unwrap()
    }

    #[test]
    fn text_strips_and_joins_nodes() {
        let doc = Html::parse_fragment("<div>  Hello <b> big </b>\n world  </div>");
        let div = first(doc.root_element(), "div").unwrap().unwrap();
        assert_eq!(text(div), "Hellobigworld");
    }

    #[test]
    fn text_without_skips_excluded_subtree() {
        let doc = Html::parse_fragment(
            r#"<div class="body"><p>Keep</p><div class="social">Share</div><p>this</p></div>"#,
        );
        let body = first(doc.root_element(), "div.body").unwrap().unwrap();
        let social = all(body, "div.social").unwrap();
        assert_eq!(text_without(body, &social), "Keepthis");
    }

    #[test]
    fn blocks_only_takes_direct_heading_and_paragraph_children() {
        let doc = Html::parse_fragment(
            r#"<article>
                <h2>Heading</h2>
                <p>First</p>
                <div><p>Nested</p></div>
                <figure>Caption</figure>
                <p>Second</p>
            </article>"#,
        );
        let article = first(doc.root_element(), "article").unwrap().unwrap();
        assert_eq!(blocks(article), vec!["Heading", "First", "Second"]);
    }

    #[test]
    fn first_blocks_missing_container_is_empty() {
        let doc = Html::parse_fragment("<p>orphan</p>");
        assert!(first_blocks(doc.root_element(), "div.body").unwrap().is_empty());
    }

    #[test]
    fn attr_ignores_blank_values() {
        let doc = Html::parse_fragment(r#"<img src="  " alt="x">"#);
        let img = first(doc.root_element(), "img").unwrap().unwrap();
        assert_eq!(attr(img, "src"), None);
        assert_eq!(attr(img, "alt").as_deref(), Some("x"));
    }

    #[test]
    fn resolve_relative_and_absolute() {
        assert_eq!(
            resolve(&base(), "/news/a").as_deref(),
            Some("https://example.com/news/a")
        );
        assert_eq!(
            resolve(&base(), "story").as_deref(),
            Some("https://example.com/section/story")
        );
        assert_eq!(
            resolve(&base(), "https://other.org/x").as_deref(),
            Some("https://other.org/x")
        );
        assert_eq!(resolve(&base(), "  "), None);
    }

    #[test]
    fn invalid_selector_is_an_error() {
        assert!(selector("div[").is_err());
    }

    #[test]
    fn has_class_matches_one_of_many() {
        let doc = Html::parse_fragment(r#"<div class="a-content injected-related-story"></div>"#);
        let div = first(doc.root_element(), "div").unwrap().unwrap();
        assert!(has_class(div, "injected-related-story"));
        assert!(!has_class(div, "injected"));
    }
}
