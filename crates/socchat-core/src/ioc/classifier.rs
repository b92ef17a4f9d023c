//! Input classification.
//!
//! Maps analyst input to an indicator kind. Classification is total: any
//! input that is not an IP, URL or hash is `Unknown`, which routes it to the
//! conversational responder instead of the enrichment service.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use url::Url;

static IPV4_SYNTAX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}(\.[0-9]{1,3}){3}$").expect("valid IPv4 pattern"));

static HEX_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-fA-F0-9]+$").expect("valid hex pattern"));

/// How strictly IPv4 octets are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ipv4Policy {
    /// Four groups of 1-3 digits; `999.999.999.999` is an IP.
    #[default]
    Lenient,
    /// Additionally require every octet to be at most 255.
    Strict,
}

/// An indicator kind that the enrichment service can look up.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IndicatorKind {
    Ip,
    Url,
    Hash,
}

impl IndicatorKind {
    /// Upper-case label used in scan headers ("IP", "URL", "HASH").
    pub fn label(&self) -> String {
        self.to_string().to_uppercase()
    }
}

/// Result of classifying raw input.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InputKind {
    Ip,
    Url,
    Hash,
    Unknown,
}

impl InputKind {
    /// The lookup kind, or `None` for free text.
    pub fn indicator(&self) -> Option<IndicatorKind> {
        match self {
            Self::Ip => Some(IndicatorKind::Ip),
            Self::Url => Some(IndicatorKind::Url),
            Self::Hash => Some(IndicatorKind::Hash),
            Self::Unknown => None,
        }
    }
}

impl From<IndicatorKind> for InputKind {
    fn from(kind: IndicatorKind) -> Self {
        match kind {
            IndicatorKind::Ip => Self::Ip,
            IndicatorKind::Url => Self::Url,
            IndicatorKind::Hash => Self::Hash,
        }
    }
}

/// Digest family implied by a hash length. Informative only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum HashAlgorithm {
    #[strum(serialize = "MD5")]
    Md5,
    #[strum(serialize = "SHA-1")]
    Sha1,
    #[strum(serialize = "SHA-256")]
    Sha256,
}

impl HashAlgorithm {
    fn from_hex_len(len: usize) -> Option<Self> {
        match len {
            32 => Some(Self::Md5),
            40 => Some(Self::Sha1),
            64 => Some(Self::Sha256),
            _ => None,
        }
    }
}

/// Trimmed input together with its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedInput {
    pub raw_text: String,
    pub kind: InputKind,
}

impl ClassifiedInput {
    pub fn indicator(&self) -> Option<IndicatorKind> {
        self.kind.indicator()
    }

    /// Digest family for `Hash` input.
    pub fn hash_algorithm(&self) -> Option<HashAlgorithm> {
        match self.kind {
            InputKind::Hash => HashAlgorithm::from_hex_len(self.raw_text.len()),
            _ => None,
        }
    }
}

/// Classifier with a configurable IPv4 policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    ipv4_policy: Ipv4Policy,
}

impl Classifier {
    pub fn new(ipv4_policy: Ipv4Policy) -> Self {
        Self { ipv4_policy }
    }

    /// Classifies `text` with precedence ip → url → hash → unknown.
    pub fn classify(&self, text: &str) -> ClassifiedInput {
        let trimmed = text.trim();
        let kind = if self.is_ip(trimmed) {
            InputKind::Ip
        } else if is_url(trimmed) {
            InputKind::Url
        } else if is_hash(trimmed) {
            InputKind::Hash
        } else {
            InputKind::Unknown
        };

        ClassifiedInput {
            raw_text: trimmed.to_string(),
            kind,
        }
    }

    pub fn is_ip(&self, input: &str) -> bool {
        let input = input.trim();
        if !IPV4_SYNTAX.is_match(input) {
            return false;
        }
        match self.ipv4_policy {
            Ipv4Policy::Lenient => true,
            Ipv4Policy::Strict => input
                .split('.')
                .all(|octet| octet.parse::<u16>().is_ok_and(|value| value <= 255)),
        }
    }
}

/// Classifies with the lenient default policy.
pub fn classify(text: &str) -> ClassifiedInput {
    Classifier::default().classify(text)
}

/// Absolute `http`/`https` URL.
pub fn is_url(input: &str) -> bool {
    Url::parse(input.trim())
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// MD5, SHA-1 or SHA-256 hex digest.
pub fn is_hash(input: &str) -> bool {
    let input = input.trim();
    HashAlgorithm::from_hex_len(input.len()).is_some() && HEX_DIGITS.is_match(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_syntax_is_ip_regardless_of_octet_values() {
        for input in ["1.1.1.1", "10.0.0.254", "999.999.999.999", "  8.8.4.4  "] {
            assert_eq!(classify(input).kind, InputKind::Ip, "{input}");
        }
    }

    #[test]
    fn test_malformed_ipv4_is_not_ip() {
        for input in ["1.1.1", "1.1.1.1.1", "1234.1.1.1", "a.b.c.d", "1..1.1"] {
            assert_ne!(classify(input).kind, InputKind::Ip, "{input}");
        }
    }

    #[test]
    fn test_strict_policy_rejects_out_of_range_octets() {
        let strict = Classifier::new(Ipv4Policy::Strict);
        assert_eq!(strict.classify("192.168.1.255").kind, InputKind::Ip);
        assert_eq!(strict.classify("999.999.999.999").kind, InputKind::Unknown);
        assert_eq!(strict.classify("1.2.3.256").kind, InputKind::Unknown);
    }

    #[test]
    fn test_http_and_https_urls() {
        for input in [
            "https://example.com",
            "http://evil.test/path?q=1",
            "HTTPS://EXAMPLE.COM/login",
        ] {
            assert_eq!(classify(input).kind, InputKind::Url, "{input}");
        }
    }

    #[test]
    fn test_other_schemes_and_relative_urls_are_not_url() {
        for input in [
            "ftp://files.example.com",
            "mailto:soc@example.com",
            "example.com",
            "/relative/path",
            "not a url at all",
        ] {
            assert_ne!(classify(input).kind, InputKind::Url, "{input}");
        }
    }

    #[test]
    fn test_hash_lengths() {
        let md5 = "d41d8cd98f00b204e9800998ecf8427e";
        let sha1 = "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709";
        let sha256 = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

        let classified = classify(md5);
        assert_eq!(classified.kind, InputKind::Hash);
        assert_eq!(classified.hash_algorithm(), Some(HashAlgorithm::Md5));
        assert_eq!(classify(sha1).hash_algorithm(), Some(HashAlgorithm::Sha1));
        assert_eq!(classify(sha256).hash_algorithm(), Some(HashAlgorithm::Sha256));
    }

    #[test]
    fn test_other_hex_lengths_are_unknown() {
        for len in [1, 16, 31, 33, 39, 41, 63, 65, 128] {
            let input = "a".repeat(len);
            assert_eq!(classify(&input).kind, InputKind::Unknown, "len={len}");
        }
    }

    #[test]
    fn test_non_hex_of_hash_length_is_unknown() {
        let input = "g".repeat(32);
        assert_eq!(classify(&input).kind, InputKind::Unknown);
    }

    #[test]
    fn test_free_text_is_unknown_and_trimmed() {
        let classified = classify("  how do I triage a phishing alert?  ");
        assert_eq!(classified.kind, InputKind::Unknown);
        assert_eq!(classified.raw_text, "how do I triage a phishing alert?");
        assert_eq!(classified.indicator(), None);
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(IndicatorKind::Ip.label(), "IP");
        assert_eq!(IndicatorKind::Hash.to_string(), "hash");
        assert_eq!(HashAlgorithm::Sha256.to_string(), "SHA-256");
        assert_eq!(InputKind::from(IndicatorKind::Url), InputKind::Url);
    }
}
