//! Renders enrichment results as chat annotations.

use serde_json::Value;

use super::model::EnrichmentResult;
use crate::error::ChatError;
use crate::ioc::IndicatorKind;

const WARNING_SIGN: &str = "\u{26A0}\u{FE0F}";

/// What was scanned, as named in the annotation header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanSubject {
    Indicator(IndicatorKind),
    File(String),
}

impl ScanSubject {
    fn describe(&self) -> String {
        match self {
            Self::Indicator(kind) => kind.label(),
            Self::File(name) => format!("File: {name}"),
        }
    }
}

/// Formats a verdict annotation:
///
/// ```text
/// ⚠️ VirusTotal Scan Result (IP):
/// Verdict: **malicious**
/// sources: ["AbuseIPDB","Spamhaus"]
/// country: US
/// ```
///
/// One line per detail entry in insertion order. Strings are written bare;
/// arrays, objects and null as compact JSON.
pub fn format_verdict(subject: &ScanSubject, result: &EnrichmentResult) -> String {
    let mut lines = Vec::with_capacity(result.details.len() + 2);
    lines.push(format!(
        "{WARNING_SIGN} VirusTotal Scan Result ({}):",
        subject.describe()
    ));
    lines.push(format!("Verdict: **{}**", result.verdict));
    lines.extend(
        result
            .details
            .iter()
            .map(|(key, value)| format!("{key}: {}", render_value(value))),
    );
    lines.join("\n")
}

/// Degraded annotation used when a lookup could not be completed.
pub fn format_unavailable(subject: &ScanSubject, error: &ChatError) -> String {
    format!(
        "{WARNING_SIGN} VirusTotal lookup unavailable ({}): {error}",
        subject.describe()
    )
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
