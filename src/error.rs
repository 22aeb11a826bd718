use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("image width must be at least 2 pixels, got {0}")]
    ImageTooNarrow(u32),

    #[error("image height must be at least 2 pixels, got {0}")]
    ImageTooShort(u32),

    #[error("samples per pixel must be at least 1")]
    NoSamples,

    #[error("aspect ratio must be finite and positive, got {0}")]
    InvalidAspectRatio(f64),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}
