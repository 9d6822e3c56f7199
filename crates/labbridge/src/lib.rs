//! Labbridge library
//!
//! Bridges laboratory analyser instruments and the remote ingestion
//! API: a periodic scan of a watched export directory (batch path) and
//! persistent TCP taps that mirror instrument byte streams into
//! capture logs (streaming path). The two paths share nothing but the
//! shutdown token.

pub mod config;
pub mod ingest;
pub mod scan;
pub mod shutdown;
pub mod tap;
pub mod upload;

pub use config::{Args, BridgeConfig};
pub use scan::{ScanConfig, ScanDispatcher};
pub use shutdown::ShutdownToken;
pub use tap::{TapConfig, TapListener};
pub use upload::Uploader;
