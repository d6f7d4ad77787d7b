use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error -> {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error -> {0}")]
    Image(#[from] image::ImageError),

    #[error("scene description error -> {0}")]
    Json(#[from] serde_json::Error),

    #[error("image must be at least 1x1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid render settings -> {0}")]
    InvalidSettings(String),

    #[error("can't read scene file {path:?} -> {source}")]
    SceneFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
