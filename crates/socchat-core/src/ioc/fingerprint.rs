//! Stand-in fingerprints for uploaded files.
//!
//! The upload path never reads file contents. Instead a 32-character value
//! is derived from the file name so the demo lookup has something hash-shaped
//! to work with. This is not a digest of anything.

use std::fmt;

use serde::{Deserialize, Serialize};

const FINGERPRINT_LEN: usize = 32;
const FILLER: char = 'a';

/// A deterministic, name-derived placeholder for a file hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadFingerprint(String);

impl UploadFingerprint {
    /// Derives the fingerprint from `file_name`.
    ///
    /// - Names of 32 characters or more keep their last 32 characters, with
    ///   every non-hex character replaced by `a`.
    /// - Shorter names are left-padded with `a` up to 32 characters.
    pub fn from_file_name(file_name: &str) -> Self {
        let chars: Vec<char> = file_name.chars().collect();

        let value = if chars.len() >= FINGERPRINT_LEN {
            chars[chars.len() - FINGERPRINT_LEN..]
                .iter()
                .map(|c| if c.is_ascii_hexdigit() { *c } else { FILLER })
                .collect()
        } else {
            let mut padded: String = std::iter::repeat_n(FILLER, FINGERPRINT_LEN - chars.len())
                .collect();
            padded.push_str(file_name);
            padded
        };

        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UploadFingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_is_left_padded() {
        let fingerprint = UploadFingerprint::from_file_name("sample.exe");
        assert_eq!(fingerprint.as_str(), "aaaaaaaaaaaaaaaaaaaaaasample.exe");
        assert_eq!(fingerprint.as_str().chars().count(), 32);
    }

    #[test]
    fn test_long_name_keeps_tail_and_masks_non_hex() {
        let name = "quarterly-report-final-version-2024.pdf";
        let fingerprint = UploadFingerprint::from_file_name(name);

        assert_eq!(fingerprint.as_str().len(), 32);
        assert!(fingerprint.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        // tail is "ly-report-final-version-2024.pdf"
        assert_eq!(fingerprint.as_str(), "aaaaeaaaaafaaaaaaeaaaaaa2024aadf");
    }

    #[test]
    fn test_exactly_32_characters() {
        let name = "0123456789abcdef0123456789ABCDEF";
        assert_eq!(UploadFingerprint::from_file_name(name).as_str(), name);
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            UploadFingerprint::from_file_name("invoice.docm"),
            UploadFingerprint::from_file_name("invoice.docm")
        );
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(UploadFingerprint::from_file_name("").as_str(), "a".repeat(32));
    }
}
