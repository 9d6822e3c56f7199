//! Normalized result-record shapes.
//!
//! These are the CANONICAL definitions of what each parser produces;
//! the envelope encoder consumes them verbatim.

/// One row of a CBC panel export (analyser 1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CbcEntry {
    pub test_code: String,
    pub name: String,
    pub system: String,
    pub result: String,
    pub units: String,
    pub normal_range: String,
    pub flag: String,
}

/// The single entry produced by a biochemistry export (analyser 2).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BiochemResult {
    pub test_code: String,
    pub test_name: String,
    pub system: String,
    pub result: String,
    pub units: String,
    /// Second and third `^` sub-parts of the units column, concatenated
    /// with no separator.
    pub units_system: String,
}

/// Fixed label sequence of the ten-parameter urinalysis panel, in the
/// positional order the instrument prints them.
pub const URINE_LABELS: [&str; 10] = [
    "BLD", "LEU", "BIL", "UBG", "KET", "GLU", "PRO", "pH", "NIT", "SG",
];

/// Urinalysis panel (analyser 3): one cleaned value per label, aligned
/// with [`URINE_LABELS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrinePanel {
    pub values: [String; 10],
}

impl UrinePanel {
    /// Iterate `(label, value)` pairs in panel order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        URINE_LABELS
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }
}

/// Normalized output of a parser; the shape depends on instrument type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultRecord {
    /// List of test entries, possibly empty.
    Cbc(Vec<CbcEntry>),
    /// Exactly one entry, delivered as a single-element list.
    Biochem(BiochemResult),
    /// Object keyed by the ten fixed urine labels.
    Urine(UrinePanel),
}

/// Process-wide identity attached to every envelope, resolved once at
/// startup.
#[derive(Debug, Clone)]
pub struct MachineIdentity {
    pub machine_id: String,
    pub mac: String,
}
