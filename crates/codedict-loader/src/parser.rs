//! Generic delimited source parser.
//!
//! Provides a streaming parser for the code dictionary's delimited text files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::types::{HierarchyError, HierarchyResult, SourceConfig};

/// Trait for types that can be parsed from one line of a delimited source.
pub trait SourceRecord: Sized {
    /// Minimum number of fields a line must have.
    const MIN_FIELDS: usize;

    /// Human-readable names of the expected fields, used in error messages.
    const FIELD_NAMES: &'static [&'static str];

    /// Parse a record from a CSV StringRecord.
    ///
    /// `line` is the 1-based line number the record came from.
    fn from_record(record: &StringRecord, line: u64) -> HierarchyResult<Self>;
}

/// A streaming parser for delimited source files.
///
/// Reads the file record-by-record. Quoting is disabled, so descriptions may
/// contain quote characters, and lines may carry extra trailing fields.
pub struct SourceParser<R: Read, T: SourceRecord> {
    reader: Reader<R>,
    records_read: usize,
    _marker: PhantomData<T>,
}

impl<T: SourceRecord> SourceParser<BufReader<File>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &SourceConfig) -> HierarchyResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(HierarchyError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file), config))
    }
}

impl<R: Read, T: SourceRecord> SourceParser<R, T> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R, config: &SourceConfig) -> Self {
        let csv_reader = ReaderBuilder::new()
            .delimiter(config.delimiter)
            .has_headers(config.has_headers)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        Self {
            reader: csv_reader,
            records_read: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of non-blank records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Parses all records into a Vec, stopping at the first error.
    pub fn parse_all(self) -> HierarchyResult<Vec<T>> {
        self.collect()
    }
}

impl<R: Read, T: SourceRecord> Iterator for SourceParser<R, T> {
    type Item = HierarchyResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    // Skip blank records
                    if record.is_empty() || record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }
                    self.records_read += 1;

                    let line = record.position().map_or(0, |p| p.line());
                    if record.len() < T::MIN_FIELDS {
                        return Some(Err(HierarchyError::MalformedSource {
                            line,
                            reason: format!(
                                "expected at least {} fields ({}), found {}",
                                T::MIN_FIELDS,
                                T::FIELD_NAMES.join(", "),
                                record.len()
                            ),
                        }));
                    }

                    return Some(T::from_record(&record, line));
                }
                Ok(false) => return None, // End of file
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Helper functions for parsing field values.
pub mod parse {
    use super::{HierarchyError, HierarchyResult};

    /// Returns a trimmed, non-empty field value.
    pub fn required<'a>(value: Option<&'a str>, name: &str, line: u64) -> HierarchyResult<&'a str> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(HierarchyError::MalformedSource {
                line,
                reason: format!("missing {name} field"),
            }),
        }
    }

    /// Returns a trimmed field value, or `None` when absent or empty.
    pub fn optional(value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Converts a delimiter given as text into a single byte.
    ///
    /// Accepts a single ASCII character or the escapes `\t`, `tab`.
    pub fn delimiter(value: &str) -> HierarchyResult<u8> {
        match value {
            "\\t" | "tab" => Ok(b'\t'),
            v if v.len() == 1 && v.is_ascii() => Ok(v.as_bytes()[0]),
            v => Err(HierarchyError::invalid_argument(format!(
                "delimiter must be a single ASCII character, got '{v}'"
            ))),
        }
    }
}
