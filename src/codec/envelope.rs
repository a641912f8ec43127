//! The `{z,d}` wrapper: tagged, versioned, base64 envelope for QR transport.

use crate::codec::compress;
use crate::codec::{DecodeError, EncodeError};
use crate::fiche::{self, Fiche};
use base64::Engine;
use serde::Serialize;
use serde_json::Value;
use std::io;
use thiserror::Error;
use tracing::debug;

const BASE64: base64::engine::general_purpose::GeneralPurpose =
    base64::engine::general_purpose::STANDARD;

/// Preprompt+variable weight above which the QR gets dense enough to hurt
/// scanning. Callers should warn past it; the codec never refuses.
pub const SCAN_COMFORT_LIMIT: usize = 300;

/// Wrapper format revisions. Each tag owns its compression framing; the
/// two are incompatible on the wire and never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatTag {
    /// Current format: raw DEFLATE, compact tag.
    P1,
    /// Legacy format: zlib-framed DEFLATE under the long tag.
    PakoBase64V1,
}

impl FormatTag {
    pub fn wire(self) -> &'static str {
        match self {
            FormatTag::P1 => "p1",
            FormatTag::PakoBase64V1 => "pako-base64-v1",
        }
    }

    pub fn from_wire(tag: &str) -> Option<FormatTag> {
        match tag {
            "p1" => Some(FormatTag::P1),
            "pako-base64-v1" => Some(FormatTag::PakoBase64V1),
            _ => None,
        }
    }

    fn compress(self, data: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            FormatTag::P1 => compress::deflate_raw(data),
            FormatTag::PakoBase64V1 => compress::deflate_zlib(data),
        }
    }

    fn decompress(self, data: &[u8]) -> Result<Vec<u8>, compress::DecompressionError> {
        match self {
            FormatTag::P1 => compress::inflate_raw(data),
            FormatTag::PakoBase64V1 => compress::inflate_zlib(data),
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("payload is not valid JSON: {0}")]
    OuterJson(#[source] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("envelope `z`/`d` fields are malformed")]
    MalformedEnvelope,
    #[error("unsupported wrapper tag `{0}`")]
    UnknownTag(String),
    #[error("fiche record is not valid: {0}")]
    FichePayload(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct Envelope<'a> {
    z: &'a str,
    d: String,
}

/// Validate, serialize, compress and wrap a fiche as QR-encodable text.
/// Validation runs first: no partial envelope is ever produced.
pub fn encode(fiche: &Fiche, tag: FormatTag) -> Result<String, EncodeError> {
    fiche::validate(fiche)?;
    let json = serde_json::to_vec(fiche).map_err(EncodeError::Serialize)?;
    let compressed = tag.compress(&json).map_err(EncodeError::Compress)?;
    let envelope = Envelope {
        z: tag.wire(),
        d: BASE64.encode(compressed),
    };
    let text = serde_json::to_string(&envelope).map_err(EncodeError::Serialize)?;
    debug!(
        tag = tag.wire(),
        source = json.len(),
        wrapped = text.len(),
        "fiche wrapped"
    );
    Ok(text)
}

/// Unwrap, decompress, parse and validate envelope text back into a fiche.
/// A bare JSON object without `z`/`d` is accepted as an uncompressed fiche;
/// an unknown tag is a hard failure, never a guess.
pub fn decode(text: &str) -> Result<Fiche, DecodeError> {
    let value: Value = serde_json::from_str(text).map_err(FormatError::OuterJson)?;
    if !value.is_object() {
        return Err(FormatError::NotAnObject.into());
    }

    let z = value.get("z").cloned();
    let d = value.get("d").cloned();
    match (z, d) {
        (None, None) => {
            debug!("bare fiche payload, no wrapper");
            let fiche: Fiche = serde_json::from_value(value).map_err(FormatError::FichePayload)?;
            fiche::validate(&fiche)?;
            Ok(fiche)
        }
        (Some(Value::String(z)), Some(Value::String(d))) => {
            let tag =
                FormatTag::from_wire(&z).ok_or_else(|| FormatError::UnknownTag(z.clone()))?;
            let compressed = BASE64
                .decode(d.as_bytes())
                .map_err(compress::DecompressionError::Base64)?;
            let json = tag.decompress(&compressed)?;
            debug!(
                tag = %z,
                compressed = compressed.len(),
                inflated = json.len(),
                "envelope unwrapped"
            );
            let fiche: Fiche = serde_json::from_slice(&json).map_err(FormatError::FichePayload)?;
            fiche::validate(&fiche)?;
            Ok(fiche)
        }
        _ => Err(FormatError::MalformedEnvelope.into()),
    }
}

/// Soft scannability check for the surrounding surface.
pub fn is_dense(fiche: &Fiche) -> bool {
    fiche.source_weight() > SCAN_COMFORT_LIMIT
}
