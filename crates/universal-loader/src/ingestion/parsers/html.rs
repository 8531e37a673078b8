use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};
use crate::types::{Blob, Record};

use super::BlobParser;

/// Elements whose text is never shown to a reader
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Elements that start a new line; everything else flows inline
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main",
    "nav", "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// HTML parser extracting the visible body text with `scraper`.
///
/// Inline markup flows into the surrounding text; block elements break
/// lines and table cells are separated by tabs. Whitespace is collapsed
/// within each line and blank lines are dropped. The document `<title>`
/// goes to metadata when present.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::file_parse(css, e.to_string()))
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    let block = BLOCK_ELEMENTS.contains(&name);
    if block {
        out.push('\n');
    }

    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            // source line breaks are layout, not content
            out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }));
        } else if let Some(child) = ElementRef::wrap(child) {
            if !HIDDEN_ELEMENTS.contains(&child.value().name()) {
                collect_text(child, out);
            }
        }
    }

    match name {
        "td" | "th" => out.push('\t'),
        _ if block => out.push('\n'),
        _ => {}
    }
}

fn visible_text(root: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(root, &mut raw);

    raw.lines()
        .map(|line| {
            line.split('\t')
                .map(|cell| cell.split_whitespace().collect::<Vec<_>>().join(" "))
                .filter(|cell| !cell.is_empty())
                .collect::<Vec<_>>()
                .join("\t")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

impl BlobParser for HtmlParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        let html = blob.as_string()?;
        let document = Html::parse_document(&html);

        let body_selector = selector("body")?;
        let title_selector = selector("title")?;

        let root = document
            .select(&body_selector)
            .next()
            .unwrap_or_else(|| document.root_element());
        let content = visible_text(root);

        let mut record = Record::new(content).with_source(blob.path());
        if let Some(title) = document.select(&title_selector).next() {
            let title = title.text().collect::<String>();
            let title = title.trim();
            if !title.is_empty() {
                record = record.with_metadata("title", title);
            }
        }

        Ok(vec![record])
    }

    fn name(&self) -> &'static str {
        "html"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visible_text_and_title() {
        let html = r#"<!DOCTYPE html>
<html>
  <head><title> Release notes </title><style>body { color: red; }</style></head>
  <body>
    <h1>Version 2</h1>
    <p>Faster <b>loading</b>.</p>
    <script>console.log("hidden");</script>
  </body>
</html>"#;
        let blob = Blob::from_data(html.as_bytes().to_vec(), "notes.html");
        let records = HtmlParser::new().parse(&blob).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content(), "Version 2\nFaster loading.");
        assert_eq!(records[0].get("title"), Some(&json!("Release notes")));
        assert_eq!(records[0].source(), Some("notes.html"));
    }

    #[test]
    fn test_inline_markup_stays_on_one_line() {
        let html = "<body><p>Read the <a href=\"/docs\">user\n   guide</a> before <em>upgrading</em>.</p>\
                    <ul><li>one</li><li>two</li></ul>\
                    <table><tr><td>Region</td><td>Total</td></tr><tr><td>North</td><td>42</td></tr></table>\
                    </body>";
        let records = HtmlParser::new()
            .parse(&Blob::from_data(html.as_bytes().to_vec(), "guide.html"))
            .unwrap();

        assert_eq!(
            records[0].content(),
            "Read the user guide before upgrading.\none\ntwo\nRegion\tTotal\nNorth\t42"
        );
    }

    #[test]
    fn test_no_title() {
        let blob = Blob::from_data(b"<p>just text</p>".to_vec(), "bare.html");
        let records = HtmlParser::new().parse(&blob).unwrap();

        assert_eq!(records[0].content(), "just text");
        assert!(records[0].get("title").is_none());
    }
}
