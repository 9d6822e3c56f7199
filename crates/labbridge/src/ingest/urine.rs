//! Urinalysis panel parser (analyser 3).
//!
//! Works on the raw file text, bypassing the tokenizer. The result
//! block is delimited by literal marker lines and read positionally:
//! line *i* after the start marker carries label *i*. Label omission is
//! tolerated, label reordering is not.

use super::RejectReason;
use labbridge_protocol::{UrinePanel, URINE_LABELS};

/// 24-character marker opening the result block.
const DOT_MARKER: &str = "........................";
/// 24-character marker closing the result block.
const DASH_MARKER: &str = "------------------------";
/// Literal text the instrument prints on a failed measurement.
const MEASUREMENT_ERROR: &str = "Measurementerror!";
/// Line index the measurement-error text appears on.
const ERROR_LINE: usize = 7;
/// Lines required between the markers.
const PANEL_LINES: usize = 10;

/// Parse a urinalysis export into the fixed ten-parameter panel.
pub fn parse(raw_text: &str) -> Result<UrinePanel, RejectReason> {
    // Strip every space and asterisk before any line handling.
    let cleaned: String = raw_text.chars().filter(|&c| c != ' ' && c != '*').collect();
    let lines: Vec<&str> = cleaned.split('\n').filter(|l| !l.is_empty()).collect();

    if let Some(&line) = lines.get(ERROR_LINE) {
        if line.strip_suffix('\r').unwrap_or(line) == MEASUREMENT_ERROR {
            return Err(RejectReason::MeasurementError);
        }
    }

    let start = lines
        .iter()
        .position(|&l| l == DOT_MARKER)
        .ok_or(RejectReason::MarkersNotFound)?;
    let end = lines[start..]
        .iter()
        .position(|&l| l == DASH_MARKER)
        .map(|offset| start + offset)
        .ok_or(RejectReason::MarkersNotFound)?;
    if start + 1 >= end {
        return Err(RejectReason::MarkersNotFound);
    }
    let between = end - start - 1;
    if between < PANEL_LINES {
        return Err(RejectReason::ShortResultBlock(between));
    }

    let mut panel = UrinePanel::default();
    for (i, label) in URINE_LABELS.iter().enumerate() {
        let line = lines[start + 1 + i];
        let value = line.strip_prefix(label).unwrap_or(line);
        panel.values[i] = strip_mg_dl(value);
    }
    Ok(panel)
}

/// Remove every `mg/dl` occurrence, advancing four characters per
/// match instead of five. A value that is exactly `mg/dl` collapses to
/// `l`. The remote API was brought up against this behavior; do not
/// correct it without live instrument samples.
fn strip_mg_dl(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"mg/dl") {
            i += 4;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}
