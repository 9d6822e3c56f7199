//! Canonical default values shared across the bridge.

/// Upload endpoint for CBC panel results (analyser 1).
pub const CBC_ENDPOINT: &str = "https://api.superceuticals.in/test-one/saveCbc";
/// Upload endpoint for single biochemistry results (analyser 2).
pub const BIOCHEM_ENDPOINT: &str = "https://api.superceuticals.in/test-two/saveResults";
/// Upload endpoint for urinalysis panels (analyser 3).
pub const URINE_ENDPOINT: &str = "https://api.superceuticals.in/test-three/saveUrine";

/// Machine identity fallbacks when the environment supplies nothing.
pub const DEFAULT_MACHINE_ID: &str = "MC0003";
pub const DEFAULT_MAC: &str = "00:11:22:33:44:55";

/// Directory watched for instrument export files.
pub const DEFAULT_SCAN_DIR: &str = "./ss";
/// Only files with this extension are eligible for a scan pass.
pub const EXPORT_EXTENSION: &str = "txt";

pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_RECONNECT_DELAY_SECS: u64 = 3;
pub const UPLOAD_TIMEOUT_SECS: u64 = 30;

/// Reference deployment: both analysers stream from the same host.
pub const DEFAULT_TAP_HOST: &str = "192.168.0.173";
pub const F200_TAP_PORT: u16 = 50001;
pub const H360_TAP_PORT: u16 = 50002;
pub const F200_CAPTURE_FILE: &str = "out_f200.txt";
pub const H360_CAPTURE_FILE: &str = "out_h360.txt";
