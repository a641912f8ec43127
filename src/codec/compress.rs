//! DEFLATE-family byte adapters behind the wrapper codec.

use flate2::read::{DeflateDecoder, ZlibDecoder};
use flate2::write::{DeflateEncoder, ZlibEncoder};
use flate2::Compression;
use std::io::{self, Read, Write};
use thiserror::Error;

/// Inflated payloads larger than this are treated as corrupt. QR payloads
/// are a few hundred bytes; a megabyte leaves ample headroom.
pub const MAX_INFLATED_LEN: usize = 1 << 20;

#[derive(Debug, Error)]
pub enum DecompressionError {
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("compressed payload is corrupt: {0}")]
    Corrupt(#[from] io::Error),
    #[error("inflated payload exceeds {MAX_INFLATED_LEN} bytes")]
    TooLarge,
}

/// Raw DEFLATE, no zlib/gzip framing.
pub fn deflate_raw(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

pub fn inflate_raw(data: &[u8]) -> Result<Vec<u8>, DecompressionError> {
    read_capped(DeflateDecoder::new(data))
}

/// Zlib-framed DEFLATE, the framing the legacy encoder emitted.
pub fn deflate_zlib(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

pub fn inflate_zlib(data: &[u8]) -> Result<Vec<u8>, DecompressionError> {
    read_capped(ZlibDecoder::new(data))
}

fn read_capped<R: Read>(reader: R) -> Result<Vec<u8>, DecompressionError> {
    let mut out = Vec::new();
    let mut limited = reader.take(MAX_INFLATED_LEN as u64 + 1);
    limited.read_to_end(&mut out)?;
    if out.len() > MAX_INFLATED_LEN {
        return Err(DecompressionError::TooLarge);
    }
    Ok(out)
}
