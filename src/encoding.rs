//! Base64 transport encoding for download links

use crate::error::{Error, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Encode bytes with the standard base64 alphabet (padded)
pub fn encode(content: &[u8]) -> String {
    STANDARD.encode(content)
}

/// Decode standard base64 produced by [`encode`]
pub fn decode(encoded: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(encoded)
        .map_err(|e| Error::Encoding(e.to_string()))
}
