//! Wrapper codec: fiche ⇄ compressed, tagged, QR-encodable envelope text.

pub mod compress;
pub mod envelope;

pub use compress::{DecompressionError, MAX_INFLATED_LEN};
pub use envelope::{decode, encode, is_dense, FormatError, FormatTag, SCAN_COMFORT_LIMIT};

use crate::fiche::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("fiche serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("compression failed: {0}")]
    Compress(#[source] std::io::Error),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Decompression(#[from] DecompressionError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
