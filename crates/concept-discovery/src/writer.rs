//! Result files.
//!
//! Every run writes [`ALL_CODES_FILE`] and [`POSITIVE_CODES_FILE`]. A run with
//! generalisation also writes [`ALL_CODES_GENERAL_FILE`] and
//! [`POSITIVE_CODES_GENERAL_FILE`]. Concepts appear in definition order and
//! codes in sorted order, each followed by a tab and its description.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use codedict_loader::HierarchyQuery;
use codedict_types::Polarity;

use crate::error::{DiscoveryError, DiscoveryResult};
use crate::identify::ConceptResult;

/// Positive and negative codes of every concept.
pub const ALL_CODES_FILE: &str = "AllConceptCodes.txt";
/// Positive codes that are not negative.
pub const POSITIVE_CODES_FILE: &str = "PositiveConceptCodes.txt";
/// Generalised positive codes, marking the ones found by generalisation, and negative codes.
pub const ALL_CODES_GENERAL_FILE: &str = "AllConceptCodes_General.txt";
/// Generalised positive codes that are not negative.
pub const POSITIVE_CODES_GENERAL_FILE: &str = "PositiveConceptCodes_General.txt";

/// Marker for codes found only by generalisation.
const GENERALISED_MARKER: &str = "*";

/// `Results/ConceptDiscovery_<timestamp>` under `base_dir`.
pub fn default_output_dir(base_dir: &Path, now: DateTime<Local>) -> PathBuf {
    base_dir
        .join("Results")
        .join(format!("ConceptDiscovery_{}", now.format("%Y_%m_%d_%H_%M_%S")))
}

/// Creates the output directory.
///
/// # Errors
/// Returns [`DiscoveryError::OutputExists`] when the directory exists and
/// `overwrite` is false. With `overwrite`, result files already in the
/// directory are replaced.
pub fn prepare_output_dir(path: &Path, overwrite: bool) -> DiscoveryResult<()> {
    if path.exists() && !overwrite {
        return Err(DiscoveryError::OutputExists {
            path: path.display().to_string(),
        });
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Writes the result files for `results` into `dir` and returns their paths.
///
/// The generalised files are written when any concept was generalised.
pub fn write_results(
    dir: &Path,
    hierarchy: &dyn HierarchyQuery,
    results: &[ConceptResult],
) -> DiscoveryResult<Vec<PathBuf>> {
    let mut written = Vec::new();

    let path = dir.join(ALL_CODES_FILE);
    write_file(&path, |out| write_all_codes(out, hierarchy, results))?;
    written.push(path);

    let path = dir.join(POSITIVE_CODES_FILE);
    write_file(&path, |out| {
        write_positive_codes(out, hierarchy, results, |r| r.codes.final_positive())
    })?;
    written.push(path);

    if results.iter().any(|r| r.codes.generalised.is_some()) {
        let path = dir.join(ALL_CODES_GENERAL_FILE);
        write_file(&path, |out| write_all_general_codes(out, hierarchy, results))?;
        written.push(path);

        let path = dir.join(POSITIVE_CODES_GENERAL_FILE);
        write_file(&path, |out| {
            write_positive_codes(out, hierarchy, results, |r| {
                r.codes.final_general_positive()
            })
        })?;
        written.push(path);
    }

    for path in &written {
        tracing::info!("Wrote {}", path.display());
    }
    Ok(written)
}

fn write_file<F>(path: &Path, write: F) -> DiscoveryResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> std::io::Result<()>,
{
    let mut out = BufWriter::new(File::create(path)?);
    write(&mut out)?;
    out.flush()?;
    Ok(())
}

fn write_code<W: Write>(
    out: &mut W,
    prefix: &str,
    code: &str,
    hierarchy: &dyn HierarchyQuery,
) -> std::io::Result<()> {
    let description = hierarchy.description(code).unwrap_or_default();
    writeln!(out, "{prefix}{code}\t{description}")
}

/// `# concept`, then `## POSITIVE` and `## NEGATIVE` sections.
pub fn write_all_codes<W: Write>(
    out: &mut W,
    hierarchy: &dyn HierarchyQuery,
    results: &[ConceptResult],
) -> std::io::Result<()> {
    for result in results {
        writeln!(out, "# {}", result.name)?;
        for polarity in Polarity::ALL {
            writeln!(out, "## {}", polarity.header())?;
            for code in result.codes.codes(polarity) {
                write_code(out, "", code, hierarchy)?;
            }
        }
    }
    Ok(())
}

/// `# concept`, then the codes chosen by `select`.
pub fn write_positive_codes<W, F>(
    out: &mut W,
    hierarchy: &dyn HierarchyQuery,
    results: &[ConceptResult],
    select: F,
) -> std::io::Result<()>
where
    W: Write,
    F: Fn(&ConceptResult) -> BTreeSet<String>,
{
    for result in results {
        writeln!(out, "# {}", result.name)?;
        for code in select(result) {
            write_code(out, "", &code, hierarchy)?;
        }
    }
    Ok(())
}

/// Like [`write_all_codes`], but the positive section lists the generalised
/// positive codes. Lines are indented with a tab; codes found only by
/// generalisation are marked with `*` instead.
pub fn write_all_general_codes<W: Write>(
    out: &mut W,
    hierarchy: &dyn HierarchyQuery,
    results: &[ConceptResult],
) -> std::io::Result<()> {
    for result in results {
        writeln!(out, "# {}", result.name)?;
        writeln!(out, "## {}", Polarity::Positive.header())?;
        for code in result.codes.general_positive() {
            let prefix = if result.codes.positive.contains(&code) {
                "\t".to_string()
            } else {
                format!("{GENERALISED_MARKER}\t")
            };
            write_code(out, &prefix, &code, hierarchy)?;
        }
        writeln!(out, "## {}", Polarity::Negative.header())?;
        for code in &result.codes.negative {
            write_code(out, "\t", code, hierarchy)?;
        }
    }
    Ok(())
}
