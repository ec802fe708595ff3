//! Hierarchy edge file parser.
//!
//! Parses `child<sep>parent[<sep>label]` lines. An empty or missing label
//! is the unlabeled edge.

use codedict_types::HierarchyEdge;
use csv::StringRecord;

use crate::parser::{parse, SourceRecord};
use crate::types::HierarchyResult;

impl SourceRecord for HierarchyEdge {
    const MIN_FIELDS: usize = 2;
    const FIELD_NAMES: &'static [&'static str] = &["child", "parent", "label"];

    fn from_record(record: &StringRecord, line: u64) -> HierarchyResult<Self> {
        Ok(HierarchyEdge {
            child: parse::required(record.get(0), "child", line)?.to_string(),
            parent: parse::required(record.get(1), "parent", line)?.to_string(),
            label: parse::optional(record.get(2)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SourceParser;
    use crate::types::SourceConfig;

    #[test]
    fn test_parse_edge_file() {
        let data = "child\tparent\trelationships\n\
                    46635009\t73211009\tis_a\n\
                    44054006\t73211009\t\n\
                    73211009\t64572001\n";
        let config = SourceConfig {
            has_headers: true,
            ..Default::default()
        };
        let edges = SourceParser::<_, HierarchyEdge>::from_reader(data.as_bytes(), &config)
            .parse_all()
            .unwrap();

        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].label(), Some("is_a"));
        assert_eq!(edges[1].label(), None);
        assert_eq!(edges[2].child, "73211009");
        assert_eq!(edges[2].label(), None);
    }

    #[test]
    fn test_missing_parent_is_malformed() {
        let data = "46635009\t\tis_a\n";
        let result = SourceParser::<_, HierarchyEdge>::from_reader(
            data.as_bytes(),
            &SourceConfig::default(),
        )
        .parse_all();
        assert!(result.is_err());
    }
}
