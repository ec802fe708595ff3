//! Small hierarchies shared by the unit tests.

use crate::store::CodeHierarchy;
use crate::types::LoadConfig;

pub(crate) const READ_CODES: &str = "\
C\tEndocrine, nutritional and metabolic diseases
C1\tOther endocrine gland diseases
C10\tDiabetes mellitus
C10E\tType 1 diabetes mellitus
C10E4\tType 1 diabetes mellitus with ulcer
C10F\tType 2 diabetes mellitus
C10F8\tType 2 diabetes mellitus with ulcer
C11\tDiabetes insipidus
1\tHistory/symptoms
12\tFamily history
12D\t[V]Family history of diabetes mellitus
";

pub(crate) const SNOMED_CODES: &str = "\
100\tClinical finding
200\tDisorder of glucose metabolism
300\tDiabetes mellitus
400\tType 1 diabetes mellitus
500\tFoot ulcer
600\tDiabetic foot ulcer
700\tFinding of foot
";

pub(crate) const SNOMED_EDGES: &str = "\
child\tparent\trelationships
200\t100\tis_a
300\t200\tis_a
400\t300\tis_a
500\t700\tis_a
700\t100\t
600\t500\tis_a
600\t300\tdue_to
";

pub(crate) fn read_hierarchy() -> CodeHierarchy {
    CodeHierarchy::prefix_coded_from_reader(READ_CODES.as_bytes(), &LoadConfig::default()).unwrap()
}

pub(crate) fn snomed_hierarchy() -> CodeHierarchy {
    CodeHierarchy::externally_supplied_from_readers(
        SNOMED_CODES.as_bytes(),
        SNOMED_EDGES.as_bytes(),
        &LoadConfig::default(),
    )
    .unwrap()
}
