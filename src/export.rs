//! CSV download of stored articles.

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};

use crate::article::Article;

pub const HEADERS: [&str; 3] = ["title", "content", "author"];

/// `title,content,author`, one row per article, paragraphs joined by newlines.
pub fn to_csv(articles: &[Article]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for article in articles {
        writer.write_record([
            article.title.as_str(),
            article.content.join("\n").as_str(),
            article.author.as_str(),
        ])?;
    }
    let bytes = writer.into_inner().context("failed to flush CSV")?;
    String::from_utf8(bytes).context("CSV is not UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, content: &[&str], author: &str) -> Article {
        Article {
            title: title.to_string(),
            content: content.iter().map(|p| p.to_string()).collect(),
            author: author.to_string(),
            ..Article::default()
        }
    }

    #[test]
    fn header_only_when_empty() {
        assert_eq!(to_csv(&[]).unwrap(), "title,content,author\r\n");
    }

    #[test]
    fn joins_paragraphs_and_quotes() {
        let csv = to_csv(&[article("Dune, Part Two", &["One.", "Two."], "Jane")]).unwrap();
        assert_eq!(
            csv,
            "title,content,author\r\n\"Dune, Part Two\",\"One.\nTwo.\",Jane\r\n"
        );
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        let csv = to_csv(&[article(r#"The "Best" Films"#, &[], "")]).unwrap();
        assert!(csv.contains(r#""The ""Best"" Films",,"#));
    }
}
