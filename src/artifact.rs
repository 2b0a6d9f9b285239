//! Reading and writing fitted artifacts.
//!
//! Each artifact file wraps its payload in a small envelope:
//!
//! ```text
//! { "format_version": 1, "kind": "model", "payload": { ... } }
//! ```
//!
//! Two encodings exist. JSON files hold the envelope above as one object.
//! Binary files hold the bincode-encoded header `(format_version, kind)`
//! immediately followed by the bincode-encoded payload. The version and the
//! kind are always checked before the payload is decoded, so a model file
//! passed where the vectorizer is expected fails with a clear message.
//!
//! # Examples
//!
//! ```no_run
//! use verinews::artifact;
//! use verinews::ml::TfidfVectorizer;
//!
//! let vectorizer: TfidfVectorizer = artifact::load("models/vectorizer.json", None).unwrap();
//! println!("{} terms", vectorizer.vocabulary_size());
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, VeriNewsError};
use crate::ml::model::ModelArtifact;
use crate::ml::vectorizer::{TfidfVectorizer, VectorizerParams};

/// Envelope version written by this crate and the only one it reads.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// What an artifact file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// The fitted TF-IDF vectorizer.
    Vectorizer,
    /// The fitted classifier.
    Model,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Vectorizer => write!(f, "vectorizer"),
            ArtifactKind::Model => write!(f, "model"),
        }
    }
}

impl FromStr for ArtifactKind {
    type Err = VeriNewsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "vectorizer" => Ok(ArtifactKind::Vectorizer),
            "model" => Ok(ArtifactKind::Model),
            other => Err(VeriNewsError::invalid_argument(format!(
                "Unknown artifact kind '{other}'"
            ))),
        }
    }
}

/// On-disk encoding of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Self-describing JSON envelope.
    Json,
    /// bincode header followed by the bincode payload.
    Binary,
}

impl ArtifactFormat {
    /// Guess the format from the file extension.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        match path.as_ref().extension()?.to_str()? {
            "json" => Some(ArtifactFormat::Json),
            "bin" | "bincode" => Some(ArtifactFormat::Binary),
            _ => None,
        }
    }

    /// Guess the format from the file contents: JSON when the first
    /// non-whitespace byte opens an object.
    pub fn sniff(bytes: &[u8]) -> Self {
        match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'{') => ArtifactFormat::Json,
            _ => ArtifactFormat::Binary,
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactFormat::Json => write!(f, "json"),
            ArtifactFormat::Binary => write!(f, "binary"),
        }
    }
}

/// A value that can be stored in an artifact file.
pub trait Artifact: Sized {
    /// Kind recorded in the envelope.
    const KIND: ArtifactKind;

    /// Serialized form of the artifact.
    type Payload: Serialize + DeserializeOwned;

    /// Build (and validate) the artifact from its decoded payload.
    fn from_payload(payload: Self::Payload) -> Result<Self>;

    /// Get the serialized form of the artifact.
    fn to_payload(&self) -> Self::Payload;
}

impl Artifact for TfidfVectorizer {
    const KIND: ArtifactKind = ArtifactKind::Vectorizer;
    type Payload = VectorizerParams;

    fn from_payload(payload: Self::Payload) -> Result<Self> {
        TfidfVectorizer::from_params(payload)
    }

    fn to_payload(&self) -> Self::Payload {
        self.to_params()
    }
}

impl Artifact for ModelArtifact {
    const KIND: ArtifactKind = ArtifactKind::Model;
    type Payload = ModelArtifact;

    fn from_payload(payload: Self::Payload) -> Result<Self> {
        payload.validate()?;
        Ok(payload)
    }

    fn to_payload(&self) -> Self::Payload {
        self.clone()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    format_version: u32,
    kind: ArtifactKind,
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    format_version: u32,
    kind: ArtifactKind,
    payload: &'a T,
}

fn check_header(header: &Header, expected: ArtifactKind) -> Result<()> {
    if header.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(VeriNewsError::invalid_artifact(
            expected,
            format!(
                "unsupported format_version {}, expected {ARTIFACT_FORMAT_VERSION}",
                header.format_version
            ),
        ));
    }
    if header.kind != expected {
        return Err(VeriNewsError::invalid_artifact(
            expected,
            format!("file holds a {} artifact", header.kind),
        ));
    }
    Ok(())
}

fn decode_json<A: Artifact>(bytes: &[u8]) -> Result<A> {
    let mut value: Value = serde_json::from_slice(bytes)?;

    let header = Header {
        format_version: value
            .get("format_version")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| {
                VeriNewsError::invalid_artifact(A::KIND, "missing or invalid format_version")
            })?,
        kind: value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| VeriNewsError::invalid_artifact(A::KIND, "missing kind"))?
            .parse::<ArtifactKind>()
            .map_err(|e| VeriNewsError::invalid_artifact(A::KIND, e.to_string()))?,
    };
    check_header(&header, A::KIND)?;

    let payload = value
        .get_mut("payload")
        .map(Value::take)
        .ok_or_else(|| VeriNewsError::invalid_artifact(A::KIND, "missing payload"))?;
    A::from_payload(serde_json::from_value(payload)?)
}

fn decode_binary<A: Artifact>(bytes: &[u8]) -> Result<A> {
    let config = bincode::config::standard();
    let corrupt = |e: bincode::error::DecodeError| {
        VeriNewsError::invalid_artifact(A::KIND, format!("corrupt binary artifact: {e}"))
    };

    let (header, header_len): (Header, usize) =
        bincode::serde::decode_from_slice(bytes, config).map_err(corrupt)?;
    check_header(&header, A::KIND)?;

    let (payload, payload_len): (A::Payload, usize) =
        bincode::serde::decode_from_slice(&bytes[header_len..], config).map_err(corrupt)?;
    if header_len + payload_len != bytes.len() {
        return Err(VeriNewsError::invalid_artifact(
            A::KIND,
            "trailing bytes after the payload",
        ));
    }
    A::from_payload(payload)
}

/// Decode an artifact from memory.
///
/// Without an explicit format the contents are sniffed.
pub fn decode<A: Artifact>(bytes: &[u8], format: Option<ArtifactFormat>) -> Result<A> {
    match format.unwrap_or_else(|| ArtifactFormat::sniff(bytes)) {
        ArtifactFormat::Json => decode_json(bytes),
        ArtifactFormat::Binary => decode_binary(bytes),
    }
}

/// Encode an artifact into memory.
pub fn encode<A: Artifact>(artifact: &A, format: ArtifactFormat) -> Result<Vec<u8>> {
    let payload = artifact.to_payload();
    match format {
        ArtifactFormat::Json => {
            let envelope = Envelope {
                format_version: ARTIFACT_FORMAT_VERSION,
                kind: A::KIND,
                payload: &payload,
            };
            Ok(serde_json::to_vec_pretty(&envelope)?)
        }
        ArtifactFormat::Binary => {
            let config = bincode::config::standard();
            let header = Header {
                format_version: ARTIFACT_FORMAT_VERSION,
                kind: A::KIND,
            };
            let mut bytes = bincode::serde::encode_to_vec(&header, config).map_err(|e| {
                VeriNewsError::other(format!("Failed to serialize artifact header: {e}"))
            })?;
            bytes.extend(bincode::serde::encode_to_vec(&payload, config).map_err(|e| {
                VeriNewsError::other(format!("Failed to serialize artifact payload: {e}"))
            })?);
            Ok(bytes)
        }
    }
}

/// Load an artifact from `path`.
///
/// The format is taken from `format`, then from the file extension, then
/// from the contents. Every failure is reported with the artifact kind and
/// path.
pub fn load<A: Artifact, P: AsRef<Path>>(path: P, format: Option<ArtifactFormat>) -> Result<A> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).map_err(|e| VeriNewsError::artifact(A::KIND, path, e.to_string()))?;

    let format = format
        .or_else(|| ArtifactFormat::from_extension(path))
        .unwrap_or_else(|| ArtifactFormat::sniff(&bytes));
    debug!(
        "Decoding {} artifact {} as {format} ({} bytes)",
        A::KIND,
        path.display(),
        bytes.len()
    );

    let artifact = decode(&bytes, Some(format)).map_err(|e| e.at_path(A::KIND, path))?;
    info!("Loaded {} artifact from {}", A::KIND, path.display());
    Ok(artifact)
}

/// Write an artifact to `path` in the given format.
pub fn save<A: Artifact, P: AsRef<Path>>(artifact: &A, path: P, format: ArtifactFormat) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(artifact, format)?;
    fs::write(path, bytes)?;
    info!("Wrote {} artifact to {} as {format}", A::KIND, path.display());
    Ok(())
}
