//! Process configuration: CLI arguments, the optional TOML deployment
//! file, and the fixed fallbacks from `labbridge_protocol::defaults`.
//!
//! Machine identity is resolved exactly once here and reused on every
//! envelope for the process lifetime.

use crate::scan::ScanConfig;
use crate::tap::TapConfig;
use anyhow::{Context, Result};
use clap::Parser;
use labbridge_protocol::defaults;
use labbridge_protocol::MachineIdentity;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "labbridge", about = "Bridges laboratory analysers to the ingestion API")]
pub struct Args {
    /// Directory watched for instrument export files
    #[arg(long, env = "LABBRIDGE_SCAN_DIR", default_value = defaults::DEFAULT_SCAN_DIR)]
    pub scan_dir: PathBuf,

    /// TOML deployment file (tap endpoints, identity overrides)
    #[arg(long, env = "LABBRIDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Seconds between scan passes
    #[arg(long, default_value_t = defaults::DEFAULT_SCAN_INTERVAL_SECS)]
    pub scan_interval: u64,

    /// Verbose console logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Optional per-deployment overrides.
#[derive(Debug, Default, Deserialize)]
pub struct DeploymentFile {
    #[serde(default)]
    pub machine_id: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub tap: Vec<TapEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TapEntry {
    pub host: String,
    pub port: u16,
    pub capture_file: PathBuf,
}

/// Fully resolved process configuration.
#[derive(Debug)]
pub struct BridgeConfig {
    pub scan: ScanConfig,
    pub identity: MachineIdentity,
    pub taps: Vec<TapConfig>,
}

/// Layer the CLI over the deployment file over the fixed defaults.
pub fn resolve(args: &Args) -> Result<BridgeConfig> {
    let file = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&text)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        }
        None => DeploymentFile::default(),
    };

    let identity = resolve_identity(&file);
    let taps = resolve_taps(&file, &args.scan_dir);

    Ok(BridgeConfig {
        scan: ScanConfig {
            scan_dir: args.scan_dir.clone(),
            interval: Duration::from_secs(args.scan_interval),
            cbc_endpoint: defaults::CBC_ENDPOINT.to_string(),
            biochem_endpoint: defaults::BIOCHEM_ENDPOINT.to_string(),
            urine_endpoint: defaults::URINE_ENDPOINT.to_string(),
        },
        identity,
        taps,
    })
}

/// Identity precedence: environment, then deployment file, then the
/// fixed fallbacks.
fn resolve_identity(file: &DeploymentFile) -> MachineIdentity {
    let machine_id = non_empty_env("MachineID")
        .or_else(|| file.machine_id.clone())
        .unwrap_or_else(|| defaults::DEFAULT_MACHINE_ID.to_string());
    let mac = non_empty_env("MAC")
        .or_else(|| file.mac.clone())
        .unwrap_or_else(|| defaults::DEFAULT_MAC.to_string());
    MachineIdentity { machine_id, mac }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Tap endpoints from the deployment file, or the reference F200/H360
/// pair capturing into the scan directory.
fn resolve_taps(file: &DeploymentFile, scan_dir: &std::path::Path) -> Vec<TapConfig> {
    let delay = Duration::from_secs(defaults::DEFAULT_RECONNECT_DELAY_SECS);
    if file.tap.is_empty() {
        return vec![
            TapConfig {
                host: defaults::DEFAULT_TAP_HOST.to_string(),
                port: defaults::F200_TAP_PORT,
                capture_path: scan_dir.join(defaults::F200_CAPTURE_FILE),
                reconnect_delay: delay,
            },
            TapConfig {
                host: defaults::DEFAULT_TAP_HOST.to_string(),
                port: defaults::H360_TAP_PORT,
                capture_path: scan_dir.join(defaults::H360_CAPTURE_FILE),
                reconnect_delay: delay,
            },
        ];
    }
    file.tap
        .iter()
        .map(|entry| TapConfig {
            host: entry.host.clone(),
            port: entry.port,
            capture_path: entry.capture_file.clone(),
            reconnect_delay: delay,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_file_parses() {
        let file: DeploymentFile = toml::from_str(
            r#"
            machine_id = "MC0042"

            [[tap]]
            host = "10.0.0.5"
            port = 50001
            capture_file = "/var/lib/labbridge/f200.bin"
            "#,
        )
        .unwrap();
        assert_eq!(file.machine_id.as_deref(), Some("MC0042"));
        assert!(file.mac.is_none());
        assert_eq!(file.tap.len(), 1);
        assert_eq!(file.tap[0].port, 50001);
    }

    #[test]
    fn test_default_taps_cover_both_analysers() {
        let taps = resolve_taps(&DeploymentFile::default(), std::path::Path::new("/tmp/ss"));
        assert_eq!(taps.len(), 2);
        assert_eq!(taps[0].port, defaults::F200_TAP_PORT);
        assert_eq!(taps[1].port, defaults::H360_TAP_PORT);
        assert!(taps[0].capture_path.ends_with("out_f200.txt"));
    }

    #[test]
    fn test_file_identity_used_when_env_absent() {
        let file = DeploymentFile {
            machine_id: Some("MC0042".to_string()),
            mac: None,
            tap: vec![],
        };
        // Env vars are not set under the test harness.
        if non_empty_env("MachineID").is_none() {
            let identity = resolve_identity(&file);
            assert_eq!(identity.machine_id, "MC0042");
            assert_eq!(identity.mac, defaults::DEFAULT_MAC);
        }
    }
}
