use std::path::PathBuf;

/// Result type for cataloguing operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Error types for cataloguing operations
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(PathBuf),

    #[error("Unknown credit role: {0}")]
    UnknownRole(String),

    #[error("No credits found in pages {0} - {1}")]
    CreditsNotFound(u32, u32),

    #[error("PDF engine error: {0}")]
    Engine(String),
}
