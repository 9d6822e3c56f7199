//! Format classification.
//!
//! A total, order-sensitive prefix match on the first token. The urine
//! check must run before the CBC check, and CBC before the biochem
//! fallback; there is no format detection beyond these two literal
//! prefixes plus the catch-all.

/// The two-backslash host marker opening a urinalysis export.
const URINE_HOST_MARKER: &str = "\\\\SCAN\n";
/// Literal code opening a CBC panel export.
const CBC_MARKER: &str = "02001^Take Mode";

/// Instrument export format, selected by prefix match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Panel/list format (analyser 1).
    Cbc,
    /// Single-result format (analyser 2, the default).
    Biochem,
    /// Urinalysis panel format (analyser 3); parsed from raw bytes.
    Urine,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportKind::Cbc => "cbc",
            ExportKind::Biochem => "biochem",
            ExportKind::Urine => "urine",
        }
    }
}

/// Choose a parser from the first parsed token. An empty token list
/// falls through to the biochem parser, which rejects it.
pub fn classify(tokens: &[String]) -> ExportKind {
    match tokens.first() {
        Some(first) if first.starts_with(URINE_HOST_MARKER) => ExportKind::Urine,
        Some(first) if first.starts_with(CBC_MARKER) => ExportKind::Cbc,
        _ => ExportKind::Biochem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(first: &str) -> Vec<String> {
        vec![first.to_string(), "rest".to_string()]
    }

    #[test]
    fn test_urine_marker_wins() {
        assert_eq!(classify(&toks("\\\\SCAN\nTest-1")), ExportKind::Urine);
    }

    #[test]
    fn test_cbc_marker() {
        assert_eq!(classify(&toks("02001^Take Mode^N")), ExportKind::Cbc);
    }

    #[test]
    fn test_fallback_is_biochem() {
        assert_eq!(classify(&toks("GLU^Glucose^SER|R|98")), ExportKind::Biochem);
        assert_eq!(classify(&[]), ExportKind::Biochem);
    }

    #[test]
    fn test_marker_requires_line_break() {
        // "\\SCAN" without the newline is not the host marker.
        assert_eq!(classify(&toks("\\\\SCANX")), ExportKind::Biochem);
    }
}
