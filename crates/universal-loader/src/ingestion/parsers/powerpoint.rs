//! PowerPoint parsers: structured .pptx extraction and the raw legacy .ppt fallback

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::config::PowerPointConfig;
use crate::error::Result;
use crate::types::{Blob, Record};

use super::BlobParser;

const SLIDE_PREFIX: &str = "ppt/slides/slide";
const SLIDE_SUFFIX: &str = ".xml";

/// .pptx parser: reads every slide part from the zip container and joins
/// all text paragraphs, slide by slide, with newlines.
#[derive(Debug, Default, Clone, Copy)]
pub struct PptxParser;

impl PptxParser {
    pub fn new() -> Self {
        Self
    }
}

impl BlobParser for PptxParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        let data = blob.as_bytes()?;
        let mut archive = zip::ZipArchive::new(Cursor::new(data.as_ref()))?;

        // slide1.xml, slide2.xml, ... in numeric order
        let mut slides: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| {
                let number = name.strip_prefix(SLIDE_PREFIX)?.strip_suffix(SLIDE_SUFFIX)?;
                Some((number.parse::<u32>().ok()?, name.to_string()))
            })
            .collect();
        slides.sort_by_key(|(number, _)| *number);

        let mut text_content = Vec::new();
        for (_, name) in &slides {
            let mut xml = String::new();
            archive.by_name(name)?.read_to_string(&mut xml)?;
            text_content.extend(extract_slide_paragraphs(&xml)?);
        }

        tracing::debug!(source = %blob.source(), slides = slides.len(), "Parsed PowerPoint presentation");

        Ok(vec![Record::new(text_content.join("\n"))
            .with_source(blob.path())
            .with_metadata("slides", slides.len())])
    }

    fn name(&self) -> &'static str {
        "pptx"
    }
}

/// Non-empty `<a:p>` paragraphs of one slide, each the concatenation of its
/// `<a:t>` runs with `<a:br>` breaks kept as newlines
fn extract_slide_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_element = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"t" => in_text_element = true,
                b"br" => current.push('\n'),
                _ => {}
            },
            // soft line break inside a paragraph
            Event::Empty(e) if e.local_name().as_ref() == b"br" => current.push('\n'),
            Event::Text(e) => {
                if in_text_element {
                    current.push_str(&e.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text_element = false,
                b"p" => {
                    let paragraph = current.trim();
                    if !paragraph.is_empty() {
                        paragraphs.push(paragraph.to_string());
                    }
                    current.clear();
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Legacy binary .ppt fallback.
///
/// There is no structured extraction here: the content is the escaped byte
/// representation of the first `legacy_preview_bytes` bytes of the file.
/// Output is lossy and mostly noise.
#[derive(Debug, Clone, Copy)]
pub struct LegacyPptParser {
    preview_bytes: usize,
}

impl LegacyPptParser {
    pub fn new() -> Self {
        Self::from_config(&PowerPointConfig::default())
    }

    pub fn from_config(config: &PowerPointConfig) -> Self {
        Self {
            preview_bytes: config.legacy_preview_bytes,
        }
    }
}

impl Default for LegacyPptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobParser for LegacyPptParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        let prefix = blob.read_prefix(self.preview_bytes)?;
        tracing::warn!(
            source = %blob.source(),
            bytes = prefix.len(),
            "Legacy PowerPoint format, returning raw byte preview"
        );

        let raw_text = format!("b'{}'", prefix.escape_ascii());
        Ok(vec![Record::new(raw_text).with_source(blob.path())])
    }

    fn name(&self) -> &'static str {
        "legacy_ppt"
    }
}
