//! Code description file parser.
//!
//! Parses `code<sep>description` lines.

use codedict_types::CodeDescription;
use csv::StringRecord;

use crate::parser::{parse, SourceRecord};
use crate::types::HierarchyResult;

impl SourceRecord for CodeDescription {
    const MIN_FIELDS: usize = 2;
    const FIELD_NAMES: &'static [&'static str] = &["code", "description"];

    fn from_record(record: &StringRecord, line: u64) -> HierarchyResult<Self> {
        Ok(CodeDescription {
            code: parse::required(record.get(0), "code", line)?.to_string(),
            description: parse::required(record.get(1), "description", line)?.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceParser;
    use crate::types::{HierarchyError, SourceConfig};

    fn make_record(fields: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field);
        }
        record
    }

    #[test]
    fn test_parse_description_record() {
        let record = make_record(&["C10", "  Diabetes mellitus "]);
        let desc = CodeDescription::from_record(&record, 1).unwrap();
        assert_eq!(desc.code, "C10");
        assert_eq!(desc.description, "Diabetes mellitus");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let record = make_record(&["C10", "Diabetes mellitus", "ignored"]);
        let desc = CodeDescription::from_record(&record, 1).unwrap();
        assert_eq!(desc.description, "Diabetes mellitus");
    }

    #[test]
    fn test_empty_description_is_malformed() {
        let record = make_record(&["C10", "   "]);
        let err = CodeDescription::from_record(&record, 7).unwrap_err();
        match err {
            HierarchyError::MalformedSource { line, reason } => {
                assert_eq!(line, 7);
                assert!(reason.contains("description"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_description_column() {
        let data = "C\tCirculatory\nC1\n";
        let result = SourceParser::<_, CodeDescription>::from_reader(
            data.as_bytes(),
            &SourceConfig::default(),
        )
        .parse_all();
        assert!(matches!(
            result,
            Err(HierarchyError::MalformedSource { line: 2, .. })
        ));
    }
}
