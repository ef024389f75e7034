// 📂 Row Sources
// Where raw rows come from: a ';'-delimited spreadsheet export or memory
//
// Sources are bounded: every row is read before sorting begins.

use std::io;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::errors::SourceError;

// ============================================================================
// RAW ROW
// ============================================================================

/// One record as read from the source, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based record number (line of the record start for file sources)
    pub number: usize,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(number: usize, fields: Vec<String>) -> Self {
        RawRow { number, fields }
    }

    /// Field at `index`; missing trailing fields read as empty.
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    /// Row content re-joined for diagnostics
    pub fn raw(&self) -> String {
        self.fields.join(";")
    }
}

// ============================================================================
// ROW SOURCE TRAIT
// ============================================================================

/// RowSource - yields every row of a bounded input
pub trait RowSource {
    /// Read all rows. An error here is fatal for the run.
    fn rows(&self) -> Result<Vec<RawRow>, SourceError>;

    /// Human-readable origin for progress messages
    fn describe(&self) -> String;
}

// ============================================================================
// CSV SOURCE
// ============================================================================

enum CsvInput {
    File(PathBuf),
    Text(String),
}

/// Excel-style quoted CSV with a configurable delimiter (';' by default)
pub struct CsvRowSource {
    input: CsvInput,
    delimiter: u8,
}

impl CsvRowSource {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        CsvRowSource {
            input: CsvInput::File(path.as_ref().to_path_buf()),
            delimiter: b';',
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        CsvRowSource {
            input: CsvInput::Text(text.into()),
            delimiter: b';',
        }
    }

    /// Builder pattern: set the field delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .double_quote(true);
        builder
    }

    fn read_all<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawRow>, SourceError> {
        let mut rows = Vec::new();

        // Byte records: spreadsheet exports are often Windows-1252, and one
        // accented comment must not cost the other rows. Invalid bytes decode
        // to U+FFFD; only a read failure stops the run.
        for (index, result) in reader.byte_records().enumerate() {
            let record = result.map_err(|e| SourceError::Malformed {
                record: index + 1,
                reason: e.to_string(),
            })?;

            // Blank lines never reach the normalizer
            if record.iter().all(|field| field.is_empty()) && record.len() <= 1 {
                continue;
            }

            let number = record
                .position()
                .map(|pos| pos.line() as usize)
                .unwrap_or(index + 1);
            let fields = record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect();

            rows.push(RawRow::new(number, fields));
        }

        Ok(rows)
    }
}

impl RowSource for CsvRowSource {
    fn rows(&self) -> Result<Vec<RawRow>, SourceError> {
        match &self.input {
            CsvInput::File(path) => {
                let reader = self.builder().from_path(path).map_err(|e| SourceError::Unavailable {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;
                Self::read_all(reader)
            }
            CsvInput::Text(text) => Self::read_all(self.builder().from_reader(text.as_bytes())),
        }
    }

    fn describe(&self) -> String {
        match &self.input {
            CsvInput::File(path) => path.display().to_string(),
            CsvInput::Text(_) => "<inline csv>".to_string(),
        }
    }
}

// ============================================================================
// MEMORY SOURCE
// ============================================================================

/// Rows already split into fields
pub struct MemoryRowSource {
    rows: Vec<RawRow>,
}

impl MemoryRowSource {
    /// Number rows from 1 in the given order.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        MemoryRowSource {
            rows: rows
                .into_iter()
                .enumerate()
                .map(|(i, fields)| RawRow::new(i + 1, fields))
                .collect(),
        }
    }
}

impl RowSource for MemoryRowSource {
    fn rows(&self) -> Result<Vec<RawRow>, SourceError> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        format!("<{} in-memory rows>", self.rows.len())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_missing_fields_are_empty() {
        let row = RawRow::new(3, vec!["1".into(), "Sword".into()]);

        assert_eq!(row.field(0), "1");
        assert_eq!(row.field(4), "");
        assert_eq!(row.raw(), "1;Sword");
    }

    #[test]
    fn test_csv_text_semicolon_and_quotes() {
        let source = CsvRowSource::from_text("1;\"Sword; long\";;x;100\n2;\"Say \"\"hi\"\"\";;x;5\n");
        let rows = source.rows().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].field(1), "Sword; long");
        assert_eq!(rows[1].field(1), "Say \"hi\"");
    }

    #[test]
    fn test_csv_skips_blank_lines_and_keeps_line_numbers() {
        let source = CsvRowSource::from_text("1;A;;x;1\n\n2;B;;x;2\n");
        let rows = source.rows().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert!(rows[1].number > rows[0].number);
        assert_eq!(rows[1].field(1), "B");
    }

    #[test]
    fn test_csv_flexible_lengths() {
        let source = CsvRowSource::from_text("ID;Comment\n1;A;;x;1;extra\n");
        let rows = source.rows().unwrap();

        assert_eq!(rows[0].fields.len(), 2);
        assert_eq!(rows[1].fields.len(), 6);
    }

    #[test]
    fn test_custom_delimiter() {
        let source = CsvRowSource::from_text("1,A,,x,1\n").with_delimiter(b',');
        let rows = source.rows().unwrap();

        assert_eq!(rows[0].field(4), "1");
    }

    #[test]
    fn test_invalid_utf8_only_affects_its_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        std::fs::write(&path, b"1;Sword;;x;100\n2;Ep\xE9e;;x;50\n3;Bow;;x;30\n").unwrap();

        let rows = CsvRowSource::from_path(&path).rows().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].field(1), "Ep\u{fffd}e");
        assert_eq!(rows[1].field(4), "50");
        assert_eq!(rows[2].field(1), "Bow");
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let source = CsvRowSource::from_path("/definitely/not/here.csv");

        match source.rows() {
            Err(SourceError::Unavailable { path, .. }) => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.csv"));
            }
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_memory_source_numbers_rows() {
        let source = MemoryRowSource::new(vec![
            vec!["1".into(), "A".into()],
            vec!["2".into(), "B".into()],
        ]);
        let rows = source.rows().unwrap();

        assert_eq!(rows[1].number, 2);
        assert_eq!(source.describe(), "<2 in-memory rows>");
    }
}
