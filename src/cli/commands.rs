//! Command implementations for VeriNews CLI.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Read, Write};

use log::{info, warn};

use crate::artifact::{self, Artifact, ArtifactFormat, ArtifactKind};
use crate::classifier::NewsClassifier;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, VeriNewsError};
use crate::ml::model::ModelArtifact;
use crate::ml::vectorizer::TfidfVectorizer;
use crate::normalizer::Normalizer;

/// Execute a CLI command.
pub fn execute_command(args: VeriNewsArgs) -> Result<()> {
    match &args.command {
        Command::Classify(text_args) => classify(text_args.clone(), &args),
        Command::Normalize(text_args) => normalize(text_args.clone(), &args),
        Command::Interactive => interactive(&args),
        Command::Inspect => inspect(&args),
        Command::Convert(convert_args) => convert(convert_args.clone(), &args),
    }
}

/// Reject text that contains nothing but whitespace.
pub fn require_text(text: &str) -> Result<&str> {
    if text.trim().is_empty() {
        warn!("Rejected empty news text");
        return Err(VeriNewsError::EmptyInput);
    }
    Ok(text)
}

/// Take the text from the argument or, failing that, from stdin.
fn read_text(args: &TextArgs) -> Result<String> {
    match &args.text {
        Some(text) if !args.stdin => Ok(text.clone()),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Load the classifier the arguments point at.
fn load_classifier(cli_args: &VeriNewsArgs) -> Result<NewsClassifier> {
    let config = cli_args.artifact_config()?;
    if cli_args.verbosity() > 1 {
        println!(
            "Loading artifacts: vectorizer {}, model {}",
            config.vectorizer_path.display(),
            config.model_path.display()
        );
    }
    NewsClassifier::load(&config)
}

/// Classify one news item.
fn classify(args: TextArgs, cli_args: &VeriNewsArgs) -> Result<()> {
    let text = read_text(&args)?;
    let text = require_text(&text)?;

    let classifier = load_classifier(cli_args)?;
    let prediction = classifier.predict(text);

    output_classification(&ClassificationResult::from(prediction), cli_args)
}

/// Print the normalized form of a text. No artifacts are needed.
fn normalize(args: TextArgs, cli_args: &VeriNewsArgs) -> Result<()> {
    let text = read_text(&args)?;
    let text = require_text(&text)?;

    let normalized = Normalizer::new().normalize(text);
    output_result(
        "Normalized text",
        &NormalizationResult {
            terms: normalized.terms().count(),
            normalized: normalized.into_string(),
        },
        cli_args,
    )
}

/// Classify one news item per input line until end of input.
fn interactive(cli_args: &VeriNewsArgs) -> Result<()> {
    let classifier = load_classifier(cli_args)?;

    let stdin = io::stdin();
    let prompt = stdin.is_terminal() && cli_args.verbosity() > 0;
    let mut classified = 0usize;

    if prompt {
        println!("Enter the news text, one item per line (Ctrl-D to finish).");
    }

    let mut lines = stdin.lock().lines();
    loop {
        if prompt {
            print!("> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;

        match require_text(&line) {
            Ok(text) => {
                let prediction = classifier.predict(text);
                output_classification(&ClassificationResult::from(prediction), cli_args)?;
                classified += 1;
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    info!("Classified {classified} news items");
    Ok(())
}

/// Show what the loaded artifacts contain.
fn inspect(cli_args: &VeriNewsArgs) -> Result<()> {
    let config = cli_args.artifact_config()?;
    let classifier = NewsClassifier::load(&config)?;

    output_result(
        "Artifact summary",
        &ArtifactSummary::new(&classifier, &config.vectorizer_path, &config.model_path),
        cli_args,
    )
}

/// Re-encode an artifact.
fn convert(args: ConvertArgs, cli_args: &VeriNewsArgs) -> Result<()> {
    let format = match args
        .to
        .map(ArtifactFormat::from)
        .or_else(|| ArtifactFormat::from_extension(&args.output))
    {
        Some(format) => format,
        None => {
            return Err(VeriNewsError::invalid_argument(format!(
                "Cannot tell the output format of {}; pass --to json or --to binary",
                args.output.display()
            )));
        }
    };

    let kind = ArtifactKind::from(args.kind);
    let input_format = cli_args.artifact_format.map(ArtifactFormat::from);
    match kind {
        ArtifactKind::Vectorizer => {
            convert_artifact::<TfidfVectorizer>(&args, format, input_format)?
        }
        ArtifactKind::Model => convert_artifact::<ModelArtifact>(&args, format, input_format)?,
    }

    let bytes_written = fs::metadata(&args.output)?.len();
    if cli_args.verbosity() > 1 {
        println!("Wrote {}", format_bytes(bytes_written));
    }

    output_result(
        "Artifact converted successfully",
        &ConversionResult {
            input: args.input.display().to_string(),
            output: args.output.display().to_string(),
            kind: kind.to_string(),
            format: format.to_string(),
            bytes_written,
        },
        cli_args,
    )
}

fn convert_artifact<A: Artifact>(
    args: &ConvertArgs,
    format: ArtifactFormat,
    input_format: Option<ArtifactFormat>,
) -> Result<()> {
    let artifact: A = artifact::load(&args.input, input_format)?;
    artifact::save(&artifact, &args.output, format)
}
