//! CBC panel parser (analyser 1).
//!
//! Rows live at fixed token positions; a contiguous middle block of
//! rows carries three extra leading columns. Both windows are explicit
//! tables of positions, not inferred structure: the instrument's field
//! offsets are a quirk to be reproduced, not generalized.

use super::tokenize::split_field;
use labbridge_protocol::CbcEntry;
use std::ops::Range;

/// Token positions that can carry panel rows; everything outside is
/// header/footer noise.
const ROW_WINDOW: Range<usize> = 6..28;
/// Offsets within the window whose rows carry three leading columns
/// not present elsewhere.
const SHIFTED_ROWS: Range<usize> = 4..22;
const SHIFTED_BASE: usize = 3;

/// Parse candidate rows into panel entries.
///
/// Total: a sequence with no rows in the window (or none surviving)
/// yields an empty list, which still produces an envelope.
pub fn parse(tokens: &[String]) -> Vec<CbcEntry> {
    let mut entries = Vec::new();
    let end = tokens.len().min(ROW_WINDOW.end);
    for idx in ROW_WINDOW.start..end {
        let columns = split_field(&tokens[idx], '|');
        let base = if SHIFTED_ROWS.contains(&(idx - ROW_WINDOW.start)) {
            SHIFTED_BASE
        } else {
            0
        };
        if base >= columns.len() {
            continue;
        }

        let code_parts = split_field(columns[base], '^');
        let column = |offset: usize| -> String {
            columns.get(base + offset).copied().unwrap_or("").to_string()
        };
        entries.push(CbcEntry {
            test_code: code_parts.first().copied().unwrap_or("").to_string(),
            name: code_parts.get(1).copied().unwrap_or("").to_string(),
            system: code_parts.get(2).copied().unwrap_or("").to_string(),
            result: column(1),
            units: column(2),
            // column base+3 is not part of the record
            normal_range: column(4),
            flag: column(5),
        });
    }
    entries
}
