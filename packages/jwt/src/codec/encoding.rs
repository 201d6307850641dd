//! Base64url segment encoding (RFC 7515, unpadded)

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

#[inline]
pub(crate) fn base64_url_encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Rejects padding, non-alphabet characters and non-canonical trailing bits.
#[inline]
pub(crate) fn base64_url_decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(input)
}
