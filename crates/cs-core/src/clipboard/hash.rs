use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic hash of clipboard content used to test
/// recent-processing identity.
///
/// Stored hex-encoded so it can be logged and compared without
/// carrying raw bytes around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(blake3::hash(bytes).as_bytes()))
    }

    pub fn of_text(text: &str) -> Self {
        Self::of_bytes(text.as_bytes())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for log lines.
    pub fn short(&self) -> &str {
        &self.0[..12]
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_produces_identical_fingerprint() {
        assert_eq!(Fingerprint::of_text("# Title"), Fingerprint::of_text("# Title"));
    }

    #[test]
    fn different_text_produces_different_fingerprint() {
        assert_ne!(Fingerprint::of_text("a"), Fingerprint::of_text("b"));
    }

    #[test]
    fn fingerprint_is_hex_encoded_blake3() {
        let fp = Fingerprint::of_text("hello");
        assert_eq!(fp.as_str().len(), 64);
        assert!(fp.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }
}
