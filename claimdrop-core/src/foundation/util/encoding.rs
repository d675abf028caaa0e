use crate::foundation::{ClaimError, HASH_SIZE};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use data_encoding::BASE32_NOPAD;
use sha2::{Digest, Sha512_256};

/// SHA-512/256 over the concatenation of `parts`.
pub fn sha512_256(parts: &[&[u8]]) -> [u8; HASH_SIZE] {
    let mut hasher = Sha512_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

pub fn encode_base32(bytes: &[u8]) -> String {
    BASE32_NOPAD.encode(bytes)
}

pub fn decode_base32(value: &str) -> Result<Vec<u8>, ClaimError> {
    BASE32_NOPAD.decode(value.as_bytes()).map_err(|err| ClaimError::EncodingError(format!("base32 decode error: {}", err)))
}

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn decode_base64(value: &str) -> Result<Vec<u8>, ClaimError> {
    Ok(STANDARD.decode(value.trim())?)
}

/// Decode a secret given as `hex:<..>`, `b64:<..>` or bare hex.
pub fn decode_prefixed_secret(value: &str) -> Result<Vec<u8>, ClaimError> {
    let value = value.trim();
    if let Some(b64_data) = value.strip_prefix("b64:") {
        return decode_base64(b64_data);
    }
    let hex_data = value.strip_prefix("hex:").unwrap_or(value);
    Ok(hex::decode(hex_data.trim_start_matches("0x"))?)
}

pub fn redact_url(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let (scheme, rest) = url.split_at(scheme_end + 3);
    let Some(at) = rest.find('@') else {
        return url.to_string();
    };
    format!("{scheme}<redacted>@{}", &rest[at + 1..])
}
