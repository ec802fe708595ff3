//! Properties every loaded hierarchy must satisfy.

use std::collections::HashSet;
use std::io::Write;

use codedict_loader::{
    CodeHierarchy, HierarchyError, HierarchyQuery, HierarchySource, LoadConfig,
};
use codedict_types::{Direction, HierarchyKind, RelationshipFilter};
use tempfile::TempDir;

const READ_CODES: &str = "\
C\tEndocrine, nutritional and metabolic diseases
C1\tOther endocrine gland diseases
C10\tDiabetes mellitus
C104\tDiabetes mellitus with renal manifestation
C106\tDiabetes mellitus with neurological manifestation
C10E\tType 1 diabetes mellitus
C10E4\tUnstable type 1 diabetes mellitus
C10E7\tType 1 diabetes mellitus with retinopathy
C10F\tType 2 diabetes mellitus
C10F7\tType 2 diabetes mellitus with retinopathy
C11\tDiabetes insipidus
C12\tOther pituitary disorders
F\tNervous system and sense organ diseases
F4\tDisorders of the eye and adnexa
F42\tOther retinal disorders
F420\tDiabetic retinopathy
";

const SNOMED_CODES: &str = "\
404684003\tClinical finding
126877002\tDisorder of glucose metabolism
73211009\tDiabetes mellitus
46635009\tType 1 diabetes mellitus
44054006\tType 2 diabetes mellitus
4855003\tRetinopathy due to diabetes mellitus
399625000\tDisorder of retina
";

const SNOMED_EDGES: &str = "\
child\tparent\trelationships
126877002\t404684003\tis_a
73211009\t126877002\tis_a
46635009\t73211009\tis_a
44054006\t73211009\tis_a
399625000\t404684003\tis_a
4855003\t399625000\tis_a
4855003\t73211009\tdue_to
";

fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn read_hierarchy(dir: &TempDir) -> CodeHierarchy {
    let path = write_file(dir, "Coding.tsv", READ_CODES);
    CodeHierarchy::from_source(
        HierarchyKind::PrefixCoded,
        &HierarchySource::descriptions(path),
        &LoadConfig::default(),
    )
    .unwrap()
}

fn snomed_hierarchy(dir: &TempDir) -> CodeHierarchy {
    let codes = write_file(dir, "Concepts.tsv", SNOMED_CODES);
    let edges = write_file(dir, "Hierarchy.tsv", SNOMED_EDGES);
    CodeHierarchy::from_source(
        HierarchyKind::ExternallySupplied,
        &HierarchySource::descriptions(codes).with_edges(edges),
        &LoadConfig::default(),
    )
    .unwrap()
}

fn set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn assert_bidirectional(hierarchy: &CodeHierarchy) {
    for node in hierarchy.nodes() {
        for edge in &node.parents {
            let parent = hierarchy.get_node(&edge.code).unwrap();
            assert!(
                parent
                    .children
                    .iter()
                    .any(|c| c.code == node.code && c.label == edge.label),
                "{} -> {} missing from the parent's children",
                node.code,
                edge.code
            );
        }
        for edge in &node.children {
            let child = hierarchy.get_node(&edge.code).unwrap();
            assert!(
                child
                    .parents
                    .iter()
                    .any(|p| p.code == node.code && p.label == edge.label),
                "{} -> {} missing from the child's parents",
                edge.code,
                node.code
            );
        }
    }
}

#[test]
fn test_bidirectional_consistency() {
    let dir = TempDir::new().unwrap();
    assert_bidirectional(&read_hierarchy(&dir));
    assert_bidirectional(&snomed_hierarchy(&dir));
}

#[test]
fn test_children_are_deeper_than_parents() {
    let dir = TempDir::new().unwrap();
    for hierarchy in [read_hierarchy(&dir), snomed_hierarchy(&dir)] {
        for node in hierarchy.nodes() {
            assert!(node.level >= 1);
            for parent in node.parent_codes() {
                assert!(hierarchy.level(parent) < node.level);
            }
        }
    }
}

#[test]
fn test_prefix_traversal_level_correctness() {
    let dir = TempDir::new().unwrap();
    let hierarchy = read_hierarchy(&dir);
    let filter = RelationshipFilter::any();

    for code in hierarchy.codes().collect::<Vec<_>>() {
        let children = hierarchy.descendants([code], &filter, 0, 1).unwrap();
        let expected: HashSet<String> = hierarchy
            .codes()
            .filter(|c| c.len() == code.len() + 1 && c.starts_with(code))
            .map(str::to_string)
            .collect();
        assert_eq!(children, expected, "children of {code}");
    }
}

#[test]
fn test_closure_idempotence() {
    let dir = TempDir::new().unwrap();
    let hierarchy = read_hierarchy(&dir);

    for start in [vec!["C"], vec!["C1", "F4"], vec!["C10E", "ZZZ"]] {
        let once = hierarchy.all_descendants(&start);
        let twice = hierarchy.all_descendants(&once);
        assert!(twice.is_subset(&once));

        let up = hierarchy.all_ancestors(&start);
        assert!(hierarchy.all_ancestors(&up).is_subset(&up));
    }
}

#[test]
fn test_word_index_and_semantics() {
    let dir = TempDir::new().unwrap();
    let hierarchy = read_hierarchy(&dir);

    let diabetes = &hierarchy.codes_from_words([["diabetes"]])[0];
    let retinopathy = &hierarchy.codes_from_words([["retinopathy"]])[0];
    let both = &hierarchy.codes_from_words([["retinopathy", "diabetes"]])[0];

    let expected: HashSet<String> = diabetes.intersection(retinopathy).cloned().collect();
    assert_eq!(*both, expected);
    // "Diabetic retinopathy" has no "diabetes" token.
    assert_eq!(*both, set(&["C10E7", "C10F7"]));

    let empty: Vec<Vec<&str>> = vec![vec![]];
    assert!(hierarchy.codes_from_words(empty)[0].is_empty());
}

#[test]
fn test_generalisation_monotone_in_threshold() {
    let dir = TempDir::new().unwrap();
    let hierarchy = read_hierarchy(&dir);
    let initial = ["C10E4", "C10E7", "C10F7", "C11"];

    let thresholds = [0.0, 0.1, 0.2, 0.3, 0.5, 0.7, 0.9, 1.0];
    for pair in thresholds.windows(2) {
        let loose = hierarchy.generalise(initial, 1, pair[0]);
        let strict = hierarchy.generalise(initial, 1, pair[1]);
        assert!(
            strict.is_subset(&loose),
            "threshold {} found codes that {} did not",
            pair[1],
            pair[0]
        );
    }
}

#[test]
fn test_generalisation_end_to_end_example() {
    let hierarchy = CodeHierarchy::prefix_coded_from_reader(
        "C\tEndocrine\nC1\tOther endocrine\nC10\tDiabetes mellitus\nC11\tDiabetes insipidus\n"
            .as_bytes(),
        &LoadConfig::default(),
    )
    .unwrap();

    assert_eq!(
        hierarchy.generalise(["C10", "C11"], 1, 0.5),
        set(&["C1", "C10", "C11"])
    );
}

#[test]
fn test_descriptions_skip_unknown_codes() {
    let dir = TempDir::new().unwrap();
    let hierarchy = read_hierarchy(&dir);
    assert_eq!(
        hierarchy.descriptions(["C10", "ZZZ", "C11"]),
        vec!["Diabetes mellitus", "Diabetes insipidus"]
    );
}

#[test]
fn test_relatives_reject_negative_counts() {
    let dir = TempDir::new().unwrap();
    let hierarchy = snomed_hierarchy(&dir);
    let filter = RelationshipFilter::any();

    for (ignore, extract) in [(-1, 1), (0, -1), (-3, -3)] {
        let result = hierarchy.relatives(["73211009"], Direction::Ancestors, &filter, ignore, extract);
        assert!(matches!(result, Err(HierarchyError::InvalidArgument(_))));
    }
    let err: HierarchyError = "sideways".parse::<Direction>().unwrap_err().into();
    assert!(matches!(err, HierarchyError::InvalidArgument(ref m) if m.contains("sideways")));
}

#[test]
fn test_snomed_relationship_labels() {
    let dir = TempDir::new().unwrap();
    let hierarchy = snomed_hierarchy(&dir);

    let is_a = RelationshipFilter::only(["is_a"]);
    let parents = hierarchy.ancestors(["4855003"], &is_a, 0, 1).unwrap();
    assert_eq!(parents, set(&["399625000"]));

    let due_to = RelationshipFilter::only(["due_to"]);
    let causes = hierarchy.ancestors(["4855003"], &due_to, 0, 1).unwrap();
    assert_eq!(causes, set(&["73211009"]));

    // Levels follow the deepest parent.
    assert_eq!(hierarchy.level("73211009"), 3);
    assert_eq!(hierarchy.level("4855003"), 4);
    assert_eq!(
        hierarchy.codes_at_level(["46635009"], 2, &RelationshipFilter::any()),
        set(&["126877002"])
    );
    // 4855003 has parents at levels 2 and 3.
    assert_eq!(
        hierarchy.codes_at_level(["4855003"], 2, &RelationshipFilter::any()),
        set(&["399625000", "126877002"])
    );
}

#[test]
fn test_shared_across_threads() {
    let dir = TempDir::new().unwrap();
    let hierarchy = std::sync::Arc::new(read_hierarchy(&dir));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let hierarchy = std::sync::Arc::clone(&hierarchy);
            std::thread::spawn(move || {
                let query: &dyn HierarchyQuery = &*hierarchy;
                query.all_descendants(&["C10"]).len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 7);
    }
}

#[test]
fn test_cyclic_edge_file_is_malformed() {
    let dir = TempDir::new().unwrap();
    let codes = write_file(&dir, "Concepts.tsv", "1\tA\n2\tB\n");
    let edges = write_file(&dir, "Hierarchy.tsv", "child\tparent\trelationships\n1\t2\t\n2\t1\t\n");

    let result = CodeHierarchy::from_source(
        HierarchyKind::ExternallySupplied,
        &HierarchySource::descriptions(codes).with_edges(edges),
        &LoadConfig::default(),
    );
    assert!(result.unwrap_err().is_malformed_source());
}
