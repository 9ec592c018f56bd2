use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or JPEG re-encoding failed.
    #[error("Failed to convert image")]
    Conversion(#[source] image::ImageError),

    #[error("Invalid image key '{0}'")]
    InvalidKey(String),

    #[error("Invalid image metadata: {0}")]
    Metadata(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ImageError>;
