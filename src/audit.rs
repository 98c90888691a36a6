//! Screening scraped headlines for injection-looking text.

use anyhow::{Context, Result};
use csv::{Terminator, WriterBuilder};
use scraper::Html;

use crate::dom;

pub const DEFAULT_OUT: &str = "malicious_entries.csv";

/// Raw and percent-encoded quote, comment and comparison characters.
const MARKERS: &[&str] = &[
    "%27", "'", "--", "%23", "#", "%22", "\"", "%3D", "=", "%3C", "<", "%3E", ">",
];

/// Headline texts of every PMC-style story link on a page.
pub fn headlines(html: &str) -> Result<Vec<String>> {
    let doc = Html::parse_document(html);
    Ok(dom::all(doc.root_element(), "a.c-title__link")?
        .into_iter()
        .map(dom::text)
        .collect())
}

pub fn is_suspicious(entry: &str) -> bool {
    MARKERS.iter().any(|m| entry.contains(m))
}

/// Suspicious entries, in input order.
pub fn suspicious<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    entries
        .iter()
        .map(AsRef::as_ref)
        .filter(|e| is_suspicious(e))
        .map(str::to_string)
        .collect()
}

pub fn to_csv(entries: &[String]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(["Malicious Entry"])?;
    for entry in entries {
        writer.write_record([entry])?;
    }
    let bytes = writer.into_inner().context("failed to flush CSV")?;
    String::from_utf8(bytes).context("CSV is not UTF-8")
}
