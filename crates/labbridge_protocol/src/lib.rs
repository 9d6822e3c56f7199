//! Wire-level types shared across the labbridge workspace.
//!
//! Holds the normalized result-record shapes produced by the instrument
//! parsers, the upload-envelope encoder, and the canonical deployment
//! defaults.

pub mod defaults;
pub mod envelope;
pub mod types;

pub use envelope::encode_envelope;
pub use types::{BiochemResult, CbcEntry, MachineIdentity, ResultRecord, UrinePanel, URINE_LABELS};
