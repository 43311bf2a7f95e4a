//! Error types for loading and validating chip documents.

use std::path::PathBuf;

/// Errors that can occur while loading a chip description or AF table.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// TOML deserialization error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error reading a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document file not found.
    #[error("document not found: {}", path.display())]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// A chip references an AF table that is not present in the data directory.
    #[error("chip '{chip}' references unknown AF table '{id}'")]
    UnknownAfTable {
        /// The chip whose reference dangles.
        chip: String,
        /// The missing AF-table identifier.
        id: String,
    },

    /// A block identifier does not have the `family_version/Variant` shape.
    #[error("peripheral '{peripheral}' has malformed block identifier '{block}'")]
    MalformedBlock {
        /// The peripheral declaring the block.
        peripheral: String,
        /// The offending block string.
        block: String,
    },
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
