//! Private-key credentials for transaction signing.
//!
//! Keys are 32-byte secp256k1 secrets written as 64 hex characters with an
//! optional `0x` prefix. The wrapper normalizes the textual form, rejects
//! anything that is not exactly a key, and redacts itself in `Debug`,
//! `Display`, and serde output so key material never reaches logs or JSON.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::config::ConfigError;

/// Number of hex characters in an encoded key (32 bytes).
pub const KEY_HEX_LEN: usize = 64;

/// A validated signing key, stored as `0x` + 64 lowercase hex characters.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(String);

impl PrivateKey {
    /// Parse and normalize a key literal.
    ///
    /// Accepts an optional `0x`/`0X` prefix followed by exactly 64 hex
    /// characters. Error messages describe the shape of the failure without
    /// echoing the candidate string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);

        if digits.len() != KEY_HEX_LEN {
            return Err(ConfigError::InvalidPrivateKey(format!(
                "expected {} hex characters, got {}",
                KEY_HEX_LEN,
                digits.len()
            )));
        }

        hex::decode(digits).map_err(|_| {
            ConfigError::InvalidPrivateKey("non-hexadecimal character in key".to_string())
        })?;

        Ok(PrivateKey(format!("0x{}", digits.to_ascii_lowercase())))
    }

    /// Return the full key material for handing to the signing toolchain.
    ///
    /// Callers must not log or persist the returned string.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HEX: &str =
        "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";

    #[test]
    fn test_parse_prefixed() {
        let key = PrivateKey::parse(&format!("0x{}", SAMPLE_HEX)).unwrap();
        assert_eq!(key.expose(), format!("0x{}", SAMPLE_HEX));
    }

    #[test]
    fn test_parse_unprefixed_gets_prefix() {
        let key = PrivateKey::parse(SAMPLE_HEX).unwrap();
        assert_eq!(key.expose(), format!("0x{}", SAMPLE_HEX));
    }

    #[test]
    fn test_parse_normalizes_case() {
        let upper = SAMPLE_HEX.to_ascii_uppercase();
        let key = PrivateKey::parse(&format!("0X{}", upper)).unwrap();
        assert_eq!(key.expose(), format!("0x{}", SAMPLE_HEX));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(PrivateKey::parse("0xabcdef").is_err());
        assert!(PrivateKey::parse("").is_err());
        assert!(PrivateKey::parse(&format!("0x{}ff", SAMPLE_HEX)).is_err());
    }

    #[test]
    fn test_rejects_non_hex() {
        assert!(PrivateKey::parse("not-a-key").is_err());
        let mut bad = SAMPLE_HEX.to_string();
        bad.replace_range(0..1, "g");
        assert!(PrivateKey::parse(&bad).is_err());
    }

    #[test]
    fn test_debug_and_display_redact() {
        let key = PrivateKey::parse(SAMPLE_HEX).unwrap();
        assert_eq!(format!("{:?}", key), "PrivateKey(<redacted>)");
        assert_eq!(key.to_string(), "<redacted>");
        assert!(!format!("{:?}", key).contains("abcdef01"));
    }

    #[test]
    fn test_serialize_redacts() {
        let key = PrivateKey::parse(SAMPLE_HEX).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"<redacted>\"");
    }
}
