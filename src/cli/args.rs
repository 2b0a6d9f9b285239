//! Command line argument parsing for VeriNews CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactFormat, ArtifactKind};
use crate::config::VeriNewsConfig;
use crate::error::Result;

/// VeriNews - Fake news detection with pre-fitted TF-IDF models
#[derive(Parser, Debug, Clone)]
#[command(name = "verinews")]
#[command(about = "Classify news text as real or fake with pre-fitted models")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct VeriNewsArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON) naming the artifacts
    #[arg(long, env = "VERINEWS_CONFIG", value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Vectorizer artifact, overrides the configuration file
    #[arg(long, env = "VERINEWS_VECTORIZER", value_name = "VECTORIZER_FILE", global = true)]
    pub vectorizer: Option<PathBuf>,

    /// Model artifact, overrides the configuration file
    #[arg(long, env = "VERINEWS_MODEL", value_name = "MODEL_FILE", global = true)]
    pub model: Option<PathBuf>,

    /// Encoding of the artifacts (detected when omitted)
    #[arg(long, value_enum, value_name = "FORMAT", global = true)]
    pub artifact_format: Option<ArtifactFormatArg>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VeriNewsArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Build the artifact configuration: file first, then flags and
    /// environment variables.
    pub fn artifact_config(&self) -> Result<VeriNewsConfig> {
        let mut config = match &self.config {
            Some(path) => VeriNewsConfig::from_file(path)?,
            None => VeriNewsConfig::default(),
        };

        if let Some(path) = &self.vectorizer {
            config = config.with_vectorizer_path(path);
        }
        if let Some(path) = &self.model {
            config = config.with_model_path(path);
        }
        if let Some(format) = self.artifact_format {
            config = config.with_format(format.into());
        }
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Classify one news item as real or fake
    Classify(TextArgs),

    /// Print the normalized form of a text
    Normalize(TextArgs),

    /// Classify news items typed one per line
    Interactive,

    /// Show what the loaded artifacts contain
    Inspect,

    /// Re-encode an artifact between JSON and binary
    Convert(ConvertArgs),
}

/// Arguments for commands that take one text
#[derive(Parser, Debug, Clone)]
pub struct TextArgs {
    /// The news text (read from stdin when omitted)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Read the text from stdin
    #[arg(long, conflicts_with = "text")]
    pub stdin: bool,
}

/// Arguments for converting an artifact
#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    /// Artifact to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// File to write
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// What the artifact contains
    #[arg(long, value_enum)]
    pub kind: ArtifactKindArg,

    /// Encoding to write (taken from the output extension when omitted)
    #[arg(long, value_enum)]
    pub to: Option<ArtifactFormatArg>,
}

/// Artifact kinds accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKindArg {
    /// The fitted TF-IDF vectorizer
    Vectorizer,
    /// The fitted classifier
    Model,
}

impl From<ArtifactKindArg> for ArtifactKind {
    fn from(kind: ArtifactKindArg) -> Self {
        match kind {
            ArtifactKindArg::Vectorizer => ArtifactKind::Vectorizer,
            ArtifactKindArg::Model => ArtifactKind::Model,
        }
    }
}

/// Artifact encodings accepted on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormatArg {
    /// JSON envelope
    Json,
    /// bincode
    Binary,
}

impl From<ArtifactFormatArg> for ArtifactFormat {
    fn from(format: ArtifactFormatArg) -> Self {
        match format {
            ArtifactFormatArg::Json => ArtifactFormat::Json,
            ArtifactFormatArg::Binary => ArtifactFormat::Binary,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classify() {
        let args = VeriNewsArgs::try_parse_from([
            "verinews",
            "-vv",
            "--model",
            "m.bin",
            "classify",
            "Shocking hoax!",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        assert_eq!(args.model, Some(PathBuf::from("m.bin")));
        match args.command {
            Command::Classify(text_args) => {
                assert_eq!(text_args.text.as_deref(), Some("Shocking hoax!"));
                assert!(!text_args.stdin);
            }
            _ => panic!("Expected classify command"),
        }
    }

    #[test]
    fn test_verbosity() {
        let args = VeriNewsArgs::try_parse_from(["verinews", "inspect"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = VeriNewsArgs::try_parse_from(["verinews", "-q", "-vvv", "inspect"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_text_conflicts_with_stdin() {
        assert!(VeriNewsArgs::try_parse_from(["verinews", "classify", "text", "--stdin"]).is_err());
    }

    #[test]
    fn test_parse_convert() {
        let args = VeriNewsArgs::try_parse_from([
            "verinews",
            "convert",
            "model.json",
            "model.bin",
            "--kind",
            "model",
            "--to",
            "binary",
        ])
        .unwrap();

        match args.command {
            Command::Convert(convert) => {
                assert_eq!(ArtifactKind::from(convert.kind), ArtifactKind::Model);
                assert_eq!(convert.to.map(ArtifactFormat::from), Some(ArtifactFormat::Binary));
            }
            _ => panic!("Expected convert command"),
        }
    }

    #[test]
    fn test_artifact_config_overrides() {
        let args = VeriNewsArgs::try_parse_from([
            "verinews",
            "--vectorizer",
            "v.json",
            "--artifact-format",
            "json",
            "inspect",
        ])
        .unwrap();

        let config = args.artifact_config().unwrap();
        assert_eq!(config.vectorizer_path, PathBuf::from("v.json"));
        assert_eq!(config.format, Some(ArtifactFormat::Json));
    }

    #[test]
    fn test_json_output_format() {
        let args =
            VeriNewsArgs::try_parse_from(["verinews", "-f", "json", "--pretty", "inspect"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
    }
}
