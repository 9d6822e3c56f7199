//! Export-file ingestion: tokenization, classification and the three
//! instrument parsers.

pub mod biochem;
pub mod cbc;
pub mod classify;
pub mod tokenize;
pub mod urine;

use labbridge_protocol::ResultRecord;
use thiserror::Error;

pub use classify::ExportKind;

/// Why an export file was rejected without an upload attempt.
///
/// All of these are recoverable: the file is left in place and seen
/// again on the next scan pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RejectReason {
    #[error("empty token sequence")]
    EmptyExport,

    #[error("instrument reported a measurement failure")]
    MeasurementError,

    #[error("result block markers missing or adjacent")]
    MarkersNotFound,

    #[error("insufficient result lines between markers: {0}")]
    ShortResultBlock(usize),
}

/// Run the parser selected by `kind` over an export.
///
/// The urinalysis parser works from the raw file text; the other two
/// consume the tokenized form.
pub fn parse_export(
    kind: ExportKind,
    tokens: &[String],
    raw_text: &str,
) -> Result<ResultRecord, RejectReason> {
    match kind {
        ExportKind::Cbc => Ok(ResultRecord::Cbc(cbc::parse(tokens))),
        ExportKind::Biochem => biochem::parse(tokens).map(ResultRecord::Biochem),
        ExportKind::Urine => urine::parse(raw_text).map(ResultRecord::Urine),
    }
}
