use crate::error::{Error, Result};
use crate::types::{Blob, Record};

use super::BlobParser;

/// PDF parser backed by `pdf-extract`; the whole document becomes one record.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfParser;

impl PdfParser {
    pub fn new() -> Self {
        Self
    }
}

impl BlobParser for PdfParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        let data = blob.as_bytes()?;
        let text = pdf_extract::extract_text_from_mem(&data)
            .map_err(|e| Error::file_parse(blob.source(), e.to_string()))?;

        let content = clean_text(&text);

        tracing::debug!(source = %blob.source(), chars = content.len(), "Parsed PDF");

        Ok(vec![Record::new(content).with_source(blob.path())])
    }

    fn name(&self) -> &'static str {
        "pdf"
    }
}

/// Drop the NULs and blank line runs pdf-extract leaves between text objects
fn clean_text(text: &str) -> String {
    text.replace('\0', "")
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal single-page PDF drawing `text` in Helvetica, with a valid xref table
    fn pdf_with_text(text: &str) -> Vec<u8> {
        let stream = format!("BT /F1 18 Tf 72 720 Td ({}) Tj ET", text);
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 4 0 R >> >> /Contents 5 0 R >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
            format!("<< /Length {} >>\nstream\n{}\nendstream", stream.len(), stream),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (index, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
        }

        let xref_offset = pdf.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            xref.push_str(&format!("{:010} 00000 n \n", offset));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        ));
        pdf.extend_from_slice(xref.as_bytes());
        pdf
    }

    #[test]
    fn test_extracts_text_from_pdf() {
        let blob = Blob::from_data(pdf_with_text("Hello from PDF"), "hello.pdf");
        let records = PdfParser::new().parse(&blob).unwrap();

        assert_eq!(records.len(), 1);
        assert!(records[0].content().contains("Hello from PDF"), "{:?}", records[0].content());
        assert!(!records[0].content().starts_with('\n'));
        assert_eq!(records[0].source(), Some("hello.pdf"));
    }

    #[test]
    fn test_clean_text_drops_nuls_and_blank_lines() {
        assert_eq!(
            clean_text("\n\nFirst\0 line  \n \n\nSecond\n\0\n"),
            "First line\nSecond"
        );
    }

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let blob = Blob::from_data(b"this is not a pdf".to_vec(), "fake.pdf");
        let err = PdfParser::new().parse(&blob).unwrap_err();
        assert!(matches!(err, Error::FileParse { ref filename, .. } if filename == "fake.pdf"));
    }

    #[test]
    fn test_missing_file() {
        let blob = Blob::from_path("/no/such/report.pdf");
        assert!(matches!(PdfParser::new().parse(&blob), Err(Error::Io(_))));
    }
}
