use std::io;
use std::path::PathBuf;

pub type GeomResult<T> = Result<T, GeomError>;

#[derive(Debug, thiserror::Error)]
pub enum GeomError {
    #[error("cannot normalize a value with zero magnitude")]
    DegenerateNormalization,

    #[error("quaternion is not unit length (magnitude {magnitude})")]
    NotUnitQuaternion { magnitude: f64 },

    #[error("error opening {}: {}", .0.display(), .1)]
    FileOpenError(PathBuf, #[source] io::Error),

    #[error("error creating {}: {}", .0.display(), .1)]
    FileCreateError(PathBuf, #[source] io::Error),

    #[error("error writing {}: {}", .0.display(), .1)]
    FileWriteError(PathBuf, #[source] io::Error),

    #[error("access denied: {}", .0.display())]
    AccessDenied(PathBuf),

    #[error("error parsing point file {}: {}", .0.display(), .1)]
    PointParseError(PathBuf, #[source] serde_json::Error),

    #[error("error writing point file {}: {}", .0.display(), .1)]
    PointWriteError(PathBuf, #[source] serde_json::Error),

    #[error("invalid rotation: {0}")]
    InvalidRotation(String),
}
