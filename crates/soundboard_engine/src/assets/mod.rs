//! Asset management system
//!
//! Assets are addressed by relative paths such as `image/cow.jpg`. Where the
//! bytes come from is decided by an [`AssetSource`]: a directory on disk, or a
//! table compiled into the binary.

pub mod image_loader;
mod source;

pub use image_loader::ImageData;
pub use source::{AssetSource, EmbeddedSource, FileSystemSource};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// No asset exists at the path
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// The asset exists but could not be read
    #[error("Failed to read asset {path}: {source}")]
    Io {
        /// Relative asset path
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not a valid image or sound
    #[error("Failed to decode {path}: {reason}")]
    DecodeFailed {
        /// Relative asset path
        path: String,
        /// Decoder message
        reason: String,
    },

    /// Asset data is structurally invalid
    #[error("Invalid asset data: {0}")]
    InvalidData(String),
}
