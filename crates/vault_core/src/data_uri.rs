//! Parsing and decoding of `data:` URIs stored in file records.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::VaultError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A parsed `data:<mime>;base64,<payload>` URI.
pub struct DataUri {
    mime: String,
    payload: String,
}

impl DataUri {
    /// Splits a data URI into its MIME header and base64 payload.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::MalformedData`] when the scheme, `;base64`
    /// marker, or payload separator is missing.
    pub fn parse(input: &str) -> Result<Self, VaultError> {
        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| VaultError::MalformedData("missing data: scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| VaultError::MalformedData("missing payload separator".to_string()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| VaultError::MalformedData("missing base64 marker".to_string()))?;
        Ok(Self {
            mime: mime.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Declared MIME type; empty when the source file had no known type.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Decodes the payload to raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::MalformedData`] when the payload is not valid
    /// base64.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, VaultError> {
        STANDARD
            .decode(self.payload.as_bytes())
            .map_err(|e| VaultError::MalformedData(format!("invalid base64 payload: {e}")))
    }

    /// Decodes the payload to text.
    ///
    /// Non-UTF-8 byte sequences are replaced rather than treated as errors;
    /// text files with odd encodings still get a usable preview.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::MalformedData`] when the payload is not valid
    /// base64.
    pub fn decode_text(&self) -> Result<String, VaultError> {
        let bytes = self.decode_bytes()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_decodes_a_text_payload() {
        let uri = DataUri::parse("data:text/plain;base64,SGVsbG8=").expect("parse");
        assert_eq!(uri.mime(), "text/plain");
        assert_eq!(uri.decode_text().expect("decode"), "Hello");
    }

    #[test]
    fn empty_mime_is_preserved() {
        let uri = DataUri::parse("data:;base64,SGVsbG8=").expect("parse");
        assert_eq!(uri.mime(), "");
    }

    #[test]
    fn missing_scheme_is_malformed() {
        let err = DataUri::parse("text/plain;base64,SGVsbG8=").expect_err("no scheme");
        assert!(matches!(err, VaultError::MalformedData(_)));
    }

    #[test]
    fn missing_separator_is_malformed() {
        let err = DataUri::parse("data:text/plain;base64").expect_err("no comma");
        assert!(matches!(err, VaultError::MalformedData(_)));
    }

    #[test]
    fn missing_base64_marker_is_malformed() {
        let err = DataUri::parse("data:text/plain,Hello").expect_err("no marker");
        assert!(matches!(err, VaultError::MalformedData(_)));
    }

    #[test]
    fn invalid_payload_is_malformed() {
        let uri = DataUri::parse("data:text/plain;base64,!!!!").expect("parse");
        let err = uri.decode_bytes().expect_err("bad payload");
        assert!(matches!(err, VaultError::MalformedData(_)));
    }
}
