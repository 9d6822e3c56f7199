//! Single-result biochemistry parser (analyser 2, the fallback
//! format).

use super::tokenize::split_field;
use super::RejectReason;
use labbridge_protocol::BiochemResult;

/// Parse the first top-level token into exactly one entry.
///
/// An export with no first token (or one whose split yields no parts)
/// is rejected; no upload is attempted and the file survives.
pub fn parse(tokens: &[String]) -> Result<BiochemResult, RejectReason> {
    let first = tokens.first().ok_or(RejectReason::EmptyExport)?;
    let columns = split_field(first, '|');
    if columns.is_empty() {
        return Err(RejectReason::EmptyExport);
    }

    let code_parts = split_field(columns[0], '^');
    let units_parts: Vec<&str> = columns
        .get(3)
        .map(|c| split_field(c, '^'))
        .unwrap_or_default();

    let mut units_system = String::new();
    if let Some(part) = units_parts.get(1) {
        units_system.push_str(part);
    }
    if let Some(part) = units_parts.get(2) {
        units_system.push_str(part);
    }

    Ok(BiochemResult {
        test_code: code_parts.first().copied().unwrap_or("").to_string(),
        test_name: code_parts.get(1).copied().unwrap_or("").to_string(),
        system: code_parts.get(2).copied().unwrap_or("").to_string(),
        result: columns.get(2).copied().unwrap_or("").to_string(),
        units: units_parts.first().copied().unwrap_or("").to_string(),
        units_system,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(first: &str) -> Vec<String> {
        vec![first.to_string()]
    }

    #[test]
    fn test_full_row() {
        let entry = parse(&toks("GLU^Glucose^SER|R|98|mg^dL^SER")).unwrap();
        assert_eq!(entry.test_code, "GLU");
        assert_eq!(entry.test_name, "Glucose");
        assert_eq!(entry.system, "SER");
        assert_eq!(entry.result, "98");
        assert_eq!(entry.units, "mg");
        assert_eq!(entry.units_system, "dLSER");
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        assert_eq!(parse(&[]), Err(RejectReason::EmptyExport));
    }

    #[test]
    fn test_missing_units_column() {
        let entry = parse(&toks("GLU^Glucose|R|98")).unwrap();
        assert_eq!(entry.result, "98");
        assert_eq!(entry.units, "");
        assert_eq!(entry.units_system, "");
    }

    #[test]
    fn test_units_with_two_subparts() {
        let entry = parse(&toks("A|R|1|mmol^L")).unwrap();
        assert_eq!(entry.units, "mmol");
        assert_eq!(entry.units_system, "L");
    }

    #[test]
    fn test_bare_token_still_parses() {
        let entry = parse(&toks("CODE")).unwrap();
        assert_eq!(entry.test_code, "CODE");
        assert_eq!(entry.result, "");
    }
}
