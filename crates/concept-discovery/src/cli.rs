//! Command-line interface.

use std::path::PathBuf;

use clap::ArgAction;
use codedict_types::HierarchyKind;

use crate::definitions::ConceptSource;
use crate::error::DiscoveryResult;
use crate::identify::GeneraliseParams;
use crate::pipeline::{self, DiscoveryOptions, DiscoverySummary};

fn parse_dictionary(s: &str) -> Result<HierarchyKind, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_concept_source(s: &str) -> Result<ConceptSource, String> {
    s.parse().map_err(|e| format!("{e}"))
}

/// Find the codes that define medical concepts.
#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The concept definition file
    input: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Code dictionary type (readv2 or snomed)
    #[arg(short, long, default_value = "readv2", value_parser = parse_dictionary)]
    dictionary: HierarchyKind,

    /// Generalise the positive codes up the hierarchy
    #[arg(short, long)]
    generalise: bool,

    /// Level at which generalisation stops. Only parents deeper than this
    /// level are added, so root codes (level 1) are never added
    #[arg(short = 'l', long, default_value_t = 1, allow_negative_numbers = true)]
    search_level: i64,

    /// Output directory (default: Results/ConceptDiscovery_<timestamp>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Concept definition format (flatfile or json)
    #[arg(short = 's', long, default_value = "flatfile", value_parser = parse_concept_source)]
    concept_src: ConceptSource,

    /// Fraction of a parent's children that must be positive for the parent to be added
    #[arg(short = 't', long, default_value_t = 0.2, allow_negative_numbers = true)]
    child_threshold: f64,

    /// Write into an existing output directory
    #[arg(short = 'w', long)]
    overwrite: bool,
}

impl Cli {
    /// Installs logging and runs discovery.
    pub fn run(self) -> DiscoveryResult<DiscoverySummary> {
        Self::setup_logging(self.verbose);
        pipeline::run(&self.options())
    }

    /// The run options these arguments describe.
    pub fn options(&self) -> DiscoveryOptions {
        let mut options = DiscoveryOptions::new(&self.input);
        options.config = self.config.clone();
        options.dictionary = self.dictionary;
        options.concept_source = self.concept_src;
        options.output = self.output.clone();
        options.overwrite = self.overwrite;
        if self.generalise {
            options.generalise = Some(GeneraliseParams::new(self.search_level, self.child_threshold));
        }
        options
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["concept-discovery", "Concepts.txt"]).unwrap();
        let options = cli.options();
        assert_eq!(options.input, PathBuf::from("Concepts.txt"));
        assert_eq!(options.dictionary, HierarchyKind::PrefixCoded);
        assert_eq!(options.concept_source, ConceptSource::FlatFile);
        assert!(options.generalise.is_none());
        assert!(!options.overwrite);
    }

    #[test]
    fn test_all_options() {
        let cli = Cli::try_parse_from([
            "concept-discovery",
            "defs.json",
            "-c",
            "config.json",
            "-d",
            "snomed",
            "-g",
            "-l",
            "-2",
            "-t",
            "0.5",
            "-o",
            "out",
            "-s",
            "json",
            "-w",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);

        let options = cli.options();
        assert_eq!(options.config, Some(PathBuf::from("config.json")));
        assert_eq!(options.dictionary, HierarchyKind::ExternallySupplied);
        assert_eq!(options.concept_source, ConceptSource::Json);
        assert_eq!(options.generalise, Some(GeneraliseParams::new(-2, 0.5)));
        assert_eq!(options.output, Some(PathBuf::from("out")));
        assert!(options.overwrite);
    }

    #[test]
    fn test_search_level_help_names_ceiling() {
        use clap::CommandFactory;

        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "search_level")
            .unwrap();
        let help = arg.get_long_help().or(arg.get_help()).unwrap().to_string();
        assert!(help.contains("root codes (level 1) are never added"));
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!(Cli::try_parse_from(["concept-discovery", "x", "-d", "icd10"]).is_err());
        assert!(Cli::try_parse_from(["concept-discovery", "x", "-s", "xml"]).is_err());
        assert!(Cli::try_parse_from(["concept-discovery"]).is_err());
    }
}
