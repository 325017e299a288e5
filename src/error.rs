//! Error types for cave generation.

/// Everything that can go wrong while generating or exporting a cave.
#[derive(thiserror::Error, Debug)]
pub enum CaveError {
    #[error("cannot write cell ({x}, {y}): the grid border has already been applied")]
    BorderedWrite { x: i32, y: i32 },

    #[error("the grid border has already been applied")]
    AlreadyBordered,

    #[error("a smoothing pass is still in progress")]
    PassInProgress,

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds { x: i32, y: i32, width: usize, height: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image export failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for cave operations
pub type Result<T> = std::result::Result<T, CaveError>;
