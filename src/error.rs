//! Error types for planet mesh generation and persistence

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during planet generation, queries or persistence
///
/// Degenerate faces, non-manifold edges and failed pentagon checks are not
/// errors: they are reported through validation results and `tracing` warnings.
#[derive(Debug, Error)]
pub enum PlanetError {
    /// A generation or configuration parameter was rejected before any work began
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A filesystem operation failed
    #[error("failed to {operation} {}: {source}", path.display())]
    Io {
        /// What was being attempted ("create directory", "write", "read", ...)
        operation: &'static str,
        /// File or directory involved
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required planet file (mesh artifact or metadata) does not exist
    #[error("required planet file is missing: {}", path.display())]
    MissingArtifact {
        /// Expected location of the file
        path: PathBuf,
    },

    /// Binary encoding of a mesh or layer failed
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    /// Binary decoding of a mesh or layer failed
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    /// The compressed mesh artifact could not be decompressed
    #[error("failed to decompress {}: {source}", path.display())]
    Decompress {
        path: PathBuf,
        #[source]
        source: lz4_flex::block::DecompressError,
    },

    /// A per-face layer file does not hold one value per mesh face
    #[error("layer {} has {found} values, mesh has {expected} faces", path.display())]
    InvalidLayer {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// A JSON document (metadata or biome tags) could not be read or written
    #[error("invalid JSON document {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PlanetError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlanetError::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for planet operations
pub type Result<T> = std::result::Result<T, PlanetError>;
