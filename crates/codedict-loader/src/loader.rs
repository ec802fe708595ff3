//! Hierarchy loading from source files.
//!
//! Each [`HierarchyKind`] has one constructor; [`load_hierarchy`] picks it.

use std::io::Read;
use std::path::Path;
use std::time::Instant;

use codedict_types::{CodeDescription, HierarchyEdge, HierarchyKind};

use crate::builder::HierarchyBuilder;
use crate::parser::{SourceParser, SourceRecord};
use crate::store::CodeHierarchy;
use crate::types::{HierarchyError, HierarchyResult, HierarchySource, LoadConfig};

/// Builds a hierarchy of one kind from its source files.
pub type Constructor = fn(&HierarchySource, &LoadConfig) -> HierarchyResult<CodeHierarchy>;

/// Returns the constructor for a kind of hierarchy.
pub fn constructor_for(kind: HierarchyKind) -> Constructor {
    match kind {
        HierarchyKind::PrefixCoded => load_prefix_coded,
        HierarchyKind::ExternallySupplied => load_externally_supplied,
    }
}

/// Loads a hierarchy of the given kind, recording timing in its [`LoadStats`](crate::LoadStats).
///
/// # Errors
/// Returns an error if a source file is missing or malformed, or if an
/// externally supplied hierarchy has no edge file.
pub fn load_hierarchy(
    kind: HierarchyKind,
    source: &HierarchySource,
    config: &LoadConfig,
) -> HierarchyResult<CodeHierarchy> {
    tracing::info!(
        "Loading {} code hierarchy from: {}",
        kind,
        source.descriptions.display()
    );
    let start = Instant::now();

    let mut hierarchy = constructor_for(kind)(source, config)?;

    hierarchy.stats_mut().load_time_ms =
        u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let stats = hierarchy.load_stats();
    tracing::info!(
        "Loaded {} codes ({} placeholders), {} edges and {} words in {} ms",
        stats.code_count,
        stats.placeholder_codes,
        hierarchy.edge_count(),
        stats.word_count,
        stats.load_time_ms
    );
    tracing::debug!(
        "{} root codes, deepest level {}",
        hierarchy.roots().len(),
        hierarchy.max_level()
    );

    Ok(hierarchy)
}

fn load_prefix_coded(
    source: &HierarchySource,
    config: &LoadConfig,
) -> HierarchyResult<CodeHierarchy> {
    let descriptions =
        SourceParser::<_, CodeDescription>::from_path(&source.descriptions, &config.descriptions)?;
    build_prefix_coded(descriptions)
}

fn load_externally_supplied(
    source: &HierarchySource,
    config: &LoadConfig,
) -> HierarchyResult<CodeHierarchy> {
    let edge_path = source.edges.as_deref().ok_or_else(|| {
        HierarchyError::invalid_argument(format!(
            "a {} hierarchy needs an edge file",
            HierarchyKind::ExternallySupplied
        ))
    })?;
    check_exists(edge_path)?;

    let descriptions =
        SourceParser::<_, CodeDescription>::from_path(&source.descriptions, &config.descriptions)?;
    let edges = SourceParser::<_, HierarchyEdge>::from_path(edge_path, &config.edges)?;
    build_externally_supplied(descriptions, edges)
}

impl CodeHierarchy {
    /// Loads a hierarchy from files. See [`load_hierarchy`].
    pub fn from_source(
        kind: HierarchyKind,
        source: &HierarchySource,
        config: &LoadConfig,
    ) -> HierarchyResult<Self> {
        load_hierarchy(kind, source, config)
    }

    /// Builds a prefix-coded hierarchy from a `code<sep>description` reader.
    pub fn prefix_coded_from_reader<R: Read>(
        descriptions: R,
        config: &LoadConfig,
    ) -> HierarchyResult<Self> {
        build_prefix_coded(SourceParser::<_, CodeDescription>::from_reader(
            descriptions,
            &config.descriptions,
        ))
    }

    /// Builds an externally supplied hierarchy from a description reader and an edge reader.
    pub fn externally_supplied_from_readers<D: Read, E: Read>(
        descriptions: D,
        edges: E,
        config: &LoadConfig,
    ) -> HierarchyResult<Self> {
        build_externally_supplied(
            SourceParser::<_, CodeDescription>::from_reader(descriptions, &config.descriptions),
            SourceParser::<_, HierarchyEdge>::from_reader(edges, &config.edges),
        )
    }
}

fn build_prefix_coded<R: Read>(
    descriptions: SourceParser<R, CodeDescription>,
) -> HierarchyResult<CodeHierarchy> {
    let mut builder = HierarchyBuilder::new(HierarchyKind::PrefixCoded);
    let description_records = feed(descriptions, |record| builder.add_description(record))?;

    let mut hierarchy = builder.build()?;
    hierarchy.stats_mut().description_records = description_records;
    Ok(hierarchy)
}

fn build_externally_supplied<D: Read, E: Read>(
    descriptions: SourceParser<D, CodeDescription>,
    edges: SourceParser<E, HierarchyEdge>,
) -> HierarchyResult<CodeHierarchy> {
    let mut builder = HierarchyBuilder::new(HierarchyKind::ExternallySupplied);
    let description_records = feed(descriptions, |record| builder.add_description(record))?;
    tracing::debug!("Read {} code descriptions", description_records);

    let mut duplicates = 0usize;
    let edge_records = feed(edges, |record| {
        if !builder.add_hierarchy_edge(record) {
            duplicates += 1;
        }
    })?;
    if duplicates > 0 {
        tracing::debug!("Ignored {} duplicate edges", duplicates);
    }

    let mut hierarchy = builder.build()?;
    let stats = hierarchy.stats_mut();
    stats.description_records = description_records;
    stats.edge_records = edge_records;
    Ok(hierarchy)
}

/// Passes every parsed record to `sink`, stopping at the first error.
fn feed<R, T, F>(parser: SourceParser<R, T>, mut sink: F) -> HierarchyResult<usize>
where
    R: Read,
    T: SourceRecord,
    F: FnMut(T),
{
    let mut count = 0;
    for record in parser {
        sink(record?);
        count += 1;
    }
    Ok(count)
}

fn check_exists(path: &Path) -> HierarchyResult<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(HierarchyError::FileNotFound {
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn write_source(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_prefix_coded_from_path() {
        let file = write_source("C\tEndocrine\nC1\tOther\nC10\tDiabetes mellitus\n\n");
        let hierarchy = load_hierarchy(
            HierarchyKind::PrefixCoded,
            &HierarchySource::descriptions(file.path()),
            &LoadConfig::default(),
        )
        .unwrap();

        assert_eq!(hierarchy.code_count(), 3);
        assert_eq!(hierarchy.load_stats().description_records, 3);
        assert_eq!(hierarchy.load_stats().word_count, 4);
    }

    #[test]
    fn test_load_externally_supplied_from_path() {
        let descriptions = write_source(
            "73211009\tDiabetes mellitus\n46635009\tType 1 diabetes mellitus\n44054006\tType 2 diabetes mellitus\n",
        );
        let edges = write_source(
            "child\tparent\trelationships\n46635009\t73211009\tis_a\n44054006\t73211009\tis_a\n",
        );
        let source = HierarchySource::descriptions(descriptions.path()).with_edges(edges.path());

        let hierarchy =
            load_hierarchy(HierarchyKind::ExternallySupplied, &source, &LoadConfig::default())
                .unwrap();

        assert_eq!(hierarchy.kind(), HierarchyKind::ExternallySupplied);
        assert_eq!(hierarchy.node_or_empty("73211009").level, 1);
        assert_eq!(hierarchy.node_or_empty("44054006").level, 2);
        assert_eq!(hierarchy.load_stats().edge_records, 2);
    }

    #[test]
    fn test_externally_supplied_needs_edges() {
        let descriptions = write_source("1\tRoot\n");
        let result = load_hierarchy(
            HierarchyKind::ExternallySupplied,
            &HierarchySource::descriptions(descriptions.path()),
            &LoadConfig::default(),
        );
        assert!(matches!(result, Err(HierarchyError::InvalidArgument(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_hierarchy(
            HierarchyKind::PrefixCoded,
            &HierarchySource::descriptions("/nonexistent/Coding.tsv"),
            &LoadConfig::default(),
        );
        assert!(matches!(result, Err(HierarchyError::FileNotFound { .. })));
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        let source = "C\tEndocrine\nC1\n";
        let result = CodeHierarchy::prefix_coded_from_reader(source.as_bytes(), &LoadConfig::default());
        match result {
            Err(HierarchyError::MalformedSource { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed source, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_delimiter() {
        let source = "C|Endocrine\nC1|Other endocrine\n";
        let config = LoadConfig::default().with_delimiter(b'|');
        let hierarchy = CodeHierarchy::prefix_coded_from_reader(source.as_bytes(), &config).unwrap();
        assert_eq!(hierarchy.node_or_empty("C1").description, "Other endocrine");
    }

    #[test]
    fn test_constructor_dispatch() {
        let source = "C\tEndocrine\n";
        let file = write_source(source);
        let build = constructor_for(HierarchyKind::PrefixCoded);
        let hierarchy = build(&HierarchySource::descriptions(file.path()), &LoadConfig::default())
            .unwrap();
        assert_eq!(hierarchy.kind(), HierarchyKind::PrefixCoded);
    }
}
