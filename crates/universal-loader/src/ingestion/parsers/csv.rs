use crate::config::CsvConfig;
use crate::error::{Error, Result};
use crate::types::{Blob, Record};

use super::BlobParser;

/// CSV parser: reads the table with the `csv` crate and writes it back out
/// as delimited text, header first, rows in file order.
#[derive(Debug, Clone)]
pub struct CsvParser {
    delimiter: u8,
    has_headers: bool,
}

impl CsvParser {
    pub fn new() -> Self {
        Self::from_config(&CsvConfig::default())
    }

    pub fn from_config(config: &CsvConfig) -> Self {
        // validated as ASCII by LoaderConfig::validate
        let delimiter = if config.delimiter.is_ascii() { config.delimiter as u8 } else { b',' };
        Self {
            delimiter,
            has_headers: config.has_headers,
        }
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobParser for CsvParser {
    fn parse(&self, blob: &Blob) -> Result<Vec<Record>> {
        let data = blob.as_bytes()?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(self.has_headers)
            .from_reader(data.as_ref());
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        if self.has_headers {
            let headers = reader.headers()?.clone();
            if headers.is_empty() {
                return Err(Error::file_parse(blob.source(), "No columns to parse from file"));
            }
            writer.write_record(&headers)?;
        }

        let mut rows = 0usize;
        for record in reader.records() {
            writer.write_record(&record?)?;
            rows += 1;
        }

        let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| Error::file_parse(blob.source(), e.to_string()))?;

        tracing::debug!(source = %blob.source(), rows, "Parsed CSV");

        Ok(vec![Record::new(content).with_source(blob.path())])
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(data: &str) -> Result<Vec<Record>> {
        CsvParser::new().parse(&Blob::from_data(data.as_bytes().to_vec(), "table.csv"))
    }

    #[test]
    fn test_preserves_values_and_row_order() {
        let records = parse("name,age\nalice,30\nbob,25\n").unwrap();

        assert_eq!(records.len(), 1);
        let content = records[0].content();
        assert_eq!(content, "name,age\nalice,30\nbob,25\n");
        assert!(content.find("alice").unwrap() < content.find("bob").unwrap());
        assert_eq!(records[0].source(), Some("table.csv"));
    }

    #[test]
    fn test_quoted_fields_survive() {
        let records = parse("city,note\n\"Paris, FR\",\"said \"\"hi\"\"\"\n").unwrap();
        let content = records[0].content();

        let mut reader = csv::Reader::from_reader(content.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "Paris, FR");
        assert_eq!(&row[1], "said \"hi\"");
    }

    #[test]
    fn test_custom_delimiter() {
        let parser = CsvParser::from_config(&CsvConfig {
            delimiter: ';',
            has_headers: true,
        });
        let blob = Blob::from_data(b"a;b\n1;2\n".to_vec(), "semi.csv");
        let records = parser.parse(&blob).unwrap();
        assert_eq!(records[0].content(), "a;b\n1;2\n");
    }

    #[test]
    fn test_ragged_rows_propagate_csv_error() {
        assert!(matches!(parse("a,b\n1,2,3\n"), Err(Error::Csv(_))));
    }

    #[test]
    fn test_empty_file_fails() {
        assert!(matches!(parse(""), Err(Error::FileParse { .. })));
    }
}
