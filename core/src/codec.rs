//! JSON encoding of request payloads and decoding of buffered response bodies.
//!
//! Decoding is lenient about unknown fields: serde skips them unless the
//! target type opts into `deny_unknown_fields`. A body that is empty or only
//! whitespace means "no payload" and decodes to `None`. The single and list
//! paths never cross: an array body is always rejected by `decode_one`, even
//! when the target struct could be read positionally from it.

use bytes::Bytes;
use serde::de::{DeserializeOwned, Error as _};
use serde::Serialize;

use crate::error::DecodeError;

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Bytes, serde_json::Error> {
    serde_json::to_vec(value).map(Bytes::from)
}

/// Decode a single value. A JSON array is a shape mismatch.
pub fn decode_one<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, DecodeError> {
    if is_blank(body) {
        return Ok(None);
    }
    if first_token(body) == Some(b'[') {
        return Err(DecodeError::new(
            ".".to_string(),
            serde_json::Error::custom("expected a single value, found an array"),
        ));
    }
    decode(body).map(Some)
}

/// Decode a JSON array, preserving element order.
pub fn decode_many<T: DeserializeOwned>(body: &[u8]) -> Result<Option<Vec<T>>, DecodeError> {
    if is_blank(body) {
        return Ok(None);
    }
    decode(body).map(Some)
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

fn first_token(body: &[u8]) -> Option<u8> {
    body.iter().copied().find(|b| !b.is_ascii_whitespace())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|err| DecodeError::new(err.path().to_string(), err.into_inner()))?;
    // Reject trailing data after the document.
    deserializer
        .end()
        .map_err(|err| DecodeError::new(".".to_string(), err))?;
    Ok(value)
}
