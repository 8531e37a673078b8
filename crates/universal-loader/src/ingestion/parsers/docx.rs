use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};

use crate::error::{Error, Result};
use crate::types::{Blob, Record};

use super::BlobParser;

/// Word (.docx) document loader built on `docx-rs`.
///
/// Produces a single record holding the text of the document body: one line
/// per paragraph, and one line per table row with cells separated by tabs.
pub struct WordDocumentLoader<'a> {
    blob: &'a Blob,
}

impl<'a> WordDocumentLoader<'a> {
    pub fn new(blob: &'a Blob) -> Self {
        Self { blob }
    }

    pub fn load(&self) -> Result<Vec<Record>> {
        let data = self.blob.as_bytes()?;
        let doc = docx_rs::read_docx(&data)
            .map_err(|e| Error::file_parse(self.blob.source(), e.to_string()))?;

        let mut lines = Vec::new();
        let mut tables = 0usize;

        for child in &doc.document.children {
            match child {
                DocumentChild::Paragraph(p) => lines.push(paragraph_text(p)),
                DocumentChild::Table(table) => {
                    table_lines(table, &mut lines);
                    tables += 1;
                }
                _ => {}
            }
        }

        tracing::debug!(source = %self.blob.source(), lines = lines.len(), tables, "Loaded Word document");

        let content = lines.join("\n");
        Ok(vec![Record::new(content.trim_end()).with_source(self.blob.path())])
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for child in &run.children {
                match child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}

/// One line per row; nested tables contribute their own rows after the cell
fn table_lines(table: &Table, lines: &mut Vec<String>) {
    for child in &table.rows {
        let TableChild::TableRow(row) = child;
        let mut cells = Vec::new();
        let mut nested = Vec::new();
        for child in &row.cells {
            let TableRowChild::TableCell(cell) = child;
            let mut paragraphs = Vec::new();
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => paragraphs.push(paragraph_text(p)),
                    TableCellContent::Table(inner) => table_lines(inner, &mut nested),
                    _ => {}
                }
            }
            cells.push(paragraphs.join(" "));
        }
        lines.push(cells.join("\t"));
        lines.append(&mut nested);
    }
}

/// DOCX parser: hands the blob to [`WordDocumentLoader`] and re-yields its
/// records unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxParser;

impl DocxParser {
    pub fn new() -> Self {
        Self
    }
}

impl BlobParser for DocxParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        WordDocumentLoader::new(blob).load()
    }

    fn name(&self) -> &'static str {
        "docx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Run, TableCell, TableRow};

    fn write_docx(paragraphs: &[&str]) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        docx.build().pack(file.reopen().unwrap()).unwrap();
        file
    }

    #[test]
    fn test_docx_paragraphs() {
        let file = write_docx(&["Quarterly report", "Revenue grew."]);
        let blob = Blob::from_path(file.path());

        let records = DocxParser::new().parse(&blob).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content(), "Quarterly report\nRevenue grew.");
        assert_eq!(records[0].source(), Some(blob.source().as_str()));
    }

    fn cell(text: &str) -> TableCell {
        TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
    }

    #[test]
    fn test_docx_table_cells() {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Intro")))
            .add_table(Table::new(vec![
                TableRow::new(vec![cell("Region"), cell("Revenue")]),
                TableRow::new(vec![cell("North"), cell("42")]),
            ]))
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Outro")))
            .build()
            .pack(file.reopen().unwrap())
            .unwrap();

        let records = DocxParser::new()
            .parse(&Blob::from_path(file.path()))
            .unwrap();
        assert_eq!(
            records[0].content(),
            "Intro\nRegion\tRevenue\nNorth\t42\nOutro"
        );
    }

    #[test]
    fn test_parser_re_yields_loader_records() {
        let file = write_docx(&["same"]);
        let blob = Blob::from_path(file.path());

        let direct = WordDocumentLoader::new(&blob).load().unwrap();
        let via_parser = DocxParser::new().parse(&blob).unwrap();
        assert_eq!(direct, via_parser);
    }

    #[test]
    fn test_not_a_docx() {
        let blob = Blob::from_data(b"plain text pretending".to_vec(), "fake.docx");
        assert!(matches!(
            DocxParser::new().parse(&blob),
            Err(Error::FileParse { .. })
        ));
    }
}
