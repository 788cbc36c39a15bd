use std::path::PathBuf;

/// Errors raised while building a map document.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Invalid feature: {0}")]
    Schema(String),

    #[error("Unknown geometry type '{0}', expected one of Point, MultiPoint, LineString, MultiLineString")]
    UnknownGeometryType(String),

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template has {capacity} {kind} slots but {required} are needed")]
    SlotOverflow {
        kind: &'static str,
        capacity: usize,
        required: usize,
    },

    #[error("No features were added, cannot compute map bounds")]
    NoFeatures,
}

impl MapError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MapError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
