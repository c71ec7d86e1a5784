//! Persisted `RawData` artifacts.
//!
//! Parsing a large trace is slow, so the parsed form can be saved and loaded
//! back. An artifact is a JSON envelope around the data:
//!
//! ```text
//! { "format": "ratesim-rawdata", "version": 1, "generated_at": "...", "data": { ... } }
//! ```
//!
//! Paths ending in `.gz` are gzip compressed. The envelope is checked before
//! the data is decoded, so an artifact from another schema version fails with
//! `ArtifactError::Version` instead of a decoding error.

use super::{ensure_parent_dir, validate_path};
use crate::parser::RawData;
use crate::utils::config::{ARTIFACT_FORMAT, ARTIFACT_VERSION};
use crate::utils::error::ArtifactError;
use chrono::Utc;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// What a caller-supplied input file holds, chosen from its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Raw simulator trace (`*.log`, `*.log.gz`)
    Trace { compressed: bool },
    /// Saved artifact (`*.dat`, `*.dat.gz`)
    Artifact { compressed: bool },
}

impl InputKind {
    /// Classify a path by its extension
    ///
    /// # Errors
    /// * `ArtifactError::InvalidPath` - The name has none of the known extensions
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let name = path.to_string_lossy();

        let kind = if name.ends_with(".log") {
            InputKind::Trace { compressed: false }
        } else if name.ends_with(".log.gz") {
            InputKind::Trace { compressed: true }
        } else if name.ends_with(".dat") {
            InputKind::Artifact { compressed: false }
        } else if name.ends_with(".dat.gz") {
            InputKind::Artifact { compressed: true }
        } else {
            return Err(ArtifactError::InvalidPath(format!(
                "{} (expected .log, .log.gz, .dat or .dat.gz)",
                path.display()
            )));
        };
        Ok(kind)
    }
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    format: &'a str,
    version: u32,
    generated_at: String,
    data: &'a RawData,
}

#[derive(Deserialize)]
struct EnvelopeIn {
    format: String,
    version: u32,
    #[serde(default)]
    generated_at: Option<String>,
    data: serde_json::Value,
}

/// Serialize an artifact to any writer
pub fn write_artifact<W: Write>(raw: &RawData, writer: W) -> Result<(), ArtifactError> {
    let envelope = EnvelopeOut {
        format: ARTIFACT_FORMAT,
        version: ARTIFACT_VERSION,
        generated_at: Utc::now().to_rfc3339(),
        data: raw,
    };
    serde_json::to_writer(writer, &envelope)?;
    Ok(())
}

/// Deserialize an artifact from any reader
///
/// # Errors
/// * `ArtifactError::UnknownFormat` - Not a ratesim artifact
/// * `ArtifactError::Version` - Artifact written by another schema version
/// * `ArtifactError::Json` - Malformed content
pub fn read_artifact<R: Read>(reader: R) -> Result<RawData, ArtifactError> {
    let envelope: EnvelopeIn = serde_json::from_reader(reader)?;

    if envelope.format != ARTIFACT_FORMAT {
        return Err(ArtifactError::UnknownFormat(envelope.format));
    }
    if envelope.version != ARTIFACT_VERSION {
        return Err(ArtifactError::Version {
            found: envelope.version,
            expected: ARTIFACT_VERSION,
        });
    }
    if let Some(generated_at) = &envelope.generated_at {
        debug!("Artifact generated at {}", generated_at);
    }

    Ok(serde_json::from_value(envelope.data)?)
}

/// Save parsed data to a `.dat` or `.dat.gz` file
///
/// **Public** - main entry point for caching parsed traces
pub fn save(raw: &RawData, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
    let path = path.as_ref();
    let compressed = match InputKind::from_path(path)? {
        InputKind::Artifact { compressed } => compressed,
        InputKind::Trace { .. } => {
            return Err(ArtifactError::InvalidPath(format!(
                "{} (artifacts must end in .dat or .dat.gz)",
                path.display()
            )))
        }
    };

    info!("Writing artifact to: {}", path.display());
    validate_path(path).map_err(|e| ArtifactError::InvalidPath(e.to_string()))?;
    ensure_parent_dir(path).map_err(|e| ArtifactError::InvalidPath(e.to_string()))?;

    let writer = BufWriter::new(File::create(path)?);
    if compressed {
        let mut encoder = GzEncoder::new(writer, Compression::default());
        write_artifact(raw, &mut encoder)?;
        encoder.finish()?.flush()?;
    } else {
        let mut writer = writer;
        write_artifact(raw, &mut writer)?;
        writer.flush()?;
    }
    Ok(())
}

/// Load parsed data from a `.dat` or `.dat.gz` file
pub fn load(path: impl AsRef<Path>) -> Result<RawData, ArtifactError> {
    let path = path.as_ref();
    let compressed = match InputKind::from_path(path)? {
        InputKind::Artifact { compressed } => compressed,
        InputKind::Trace { .. } => {
            return Err(ArtifactError::InvalidPath(format!(
                "{} is a raw trace, not an artifact",
                path.display()
            )))
        }
    };

    debug!("Loading artifact from: {}", path.display());
    let reader = BufReader::new(File::open(path)?);
    if compressed {
        read_artifact(GzDecoder::new(reader))
    } else {
        read_artifact(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_trace_str, Number};
    use crate::utils::config::ParserConfig;
    use pretty_assertions::assert_eq;

    const TRACE: &str = "{\n\"rate_limit\": 2,\n\"name\": \"run\"\n}\n\
        [10:0]Sender_0:handle_sendMessage:|size=4 trans=7 type=0\n\
        [12:0]Sender_0:handle_send:|src=0 dst=3 size=4 trans=7 type=0\n\
        [20:1]Receiver_3:handle_recv:|src=0 dst=3 size=4 trans=7 type=0\n\
        \n\
        Total simulation ticks: 30\n\
        Offered load: 0.5\n";

    fn sample() -> RawData {
        parse_trace_str(TRACE, &ParserConfig::new()).unwrap()
    }

    #[test]
    fn test_round_trip_in_memory() {
        let raw = sample();
        let mut buf = Vec::new();
        write_artifact(&raw, &mut buf).unwrap();

        let loaded = read_artifact(buf.as_slice()).unwrap();
        assert_eq!(loaded, raw);
        assert_eq!(loaded.stats()["Offered load"], Number::Float(0.5));
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let json = format!(
            r#"{{"format":"{}","version":99,"data":{{"anything":true}}}}"#,
            ARTIFACT_FORMAT
        );
        let err = read_artifact(json.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::Version {
                found: 99,
                expected: ARTIFACT_VERSION
            }
        ));
    }

    #[test]
    fn test_foreign_format_rejected() {
        let json = r#"{"format":"something-else","version":1,"data":{}}"#;
        assert!(matches!(
            read_artifact(json.as_bytes()),
            Err(ArtifactError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_input_kind_from_path() {
        assert_eq!(
            InputKind::from_path("run.log").unwrap(),
            InputKind::Trace { compressed: false }
        );
        assert_eq!(
            InputKind::from_path("dir/run.log.gz").unwrap(),
            InputKind::Trace { compressed: true }
        );
        assert_eq!(
            InputKind::from_path("run.dat.gz").unwrap(),
            InputKind::Artifact { compressed: true }
        );
        assert!(InputKind::from_path("run.txt").is_err());
    }

    #[test]
    fn test_save_rejects_trace_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = save(&sample(), dir.path().join("out.log")).unwrap_err();
        assert!(matches!(err, ArtifactError::InvalidPath(_)));
    }

    #[test]
    fn test_save_and_load_compressed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/run.dat.gz");
        let raw = sample();

        save(&raw, &path).unwrap();
        assert_eq!(load(&path).unwrap(), raw);
    }
}
