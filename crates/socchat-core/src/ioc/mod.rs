//! Indicator-of-compromise handling.
//!
//! - `classifier`: maps analyst input to ip / url / hash / unknown
//! - `fingerprint`: name-derived stand-in hashes for uploaded files

mod classifier;
mod fingerprint;

pub use classifier::{
    ClassifiedInput, Classifier, HashAlgorithm, IndicatorKind, InputKind, Ipv4Policy, classify,
    is_hash, is_url,
};
pub use fingerprint::UploadFingerprint;
