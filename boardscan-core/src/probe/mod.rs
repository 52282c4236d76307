//! Probe discovery module.
//!
//! Finds the serial numbers of connected J-Link debug probes, either by
//! parsing `nrfjprog -i` or by enumerating USB probes with probe-rs.

use crate::config::ProbeSource;
use crate::error::{SetupError, SetupResult};
use crate::runner::CommandRunner;
use crate::Scan;

/// Marker `nrfjprog -i` prints before listing probes.
pub const CONNECTED_MARKER: &str = "Connected probes:";

/// Number of digits in a J-Link serial number as printed by nrfjprog.
pub const SERIAL_LEN: usize = 9;

/// USB vendor id of SEGGER J-Link probes.
pub const JLINK_VENDOR_ID: u16 = 0x1366;

/// Information about a debug probe found over USB.
#[derive(Debug, Clone)]
pub struct ProbeInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial_number: Option<String>,
    pub probe_type: ProbeType,
}

/// Type of debug probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeType {
    JLink,
    Other,
}

impl ProbeInfo {
    /// Classify a probe by its USB ids.
    pub fn new(vendor_id: u16, product_id: u16, serial_number: Option<String>) -> Self {
        let probe_type =
            if vendor_id == JLINK_VENDOR_ID { ProbeType::JLink } else { ProbeType::Other };
        Self { vendor_id, product_id, serial_number, probe_type }
    }

    /// Get a human-readable name for this probe.
    pub fn name(&self) -> String {
        match self.probe_type {
            ProbeType::JLink => format!("J-Link ({:04X}:{:04X})", self.vendor_id, self.product_id),
            ProbeType::Other => format!("Unknown ({:04X}:{:04X})", self.vendor_id, self.product_id),
        }
    }
}

#[cfg(feature = "hardware")]
impl From<&probe_rs::probe::DebugProbeInfo> for ProbeInfo {
    fn from(info: &probe_rs::probe::DebugProbeInfo) -> Self {
        Self::new(info.vendor_id, info.product_id, info.serial_number.clone())
    }
}

/// Extract probe serial numbers from `nrfjprog -i` output.
///
/// Nothing is returned unless the output contains [`CONNECTED_MARKER`]. Only
/// lines mentioning `J-Link` or `DK` are searched, and only whitespace
/// separated tokens of exactly [`SERIAL_LEN`] ASCII digits are kept, in the
/// order they appear.
pub fn parse_probe_serials(stdout: &str) -> Vec<String> {
    if !stdout.contains(CONNECTED_MARKER) {
        return Vec::new();
    }

    stdout
        .lines()
        .filter(|line| line.contains("J-Link") || line.contains("DK"))
        .flat_map(str::split_whitespace)
        .filter(|token| token.len() == SERIAL_LEN && token.bytes().all(|b| b.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Keep the serial numbers of J-Link probes, in enumeration order.
pub fn jlink_serials(probes: &[ProbeInfo]) -> Vec<String> {
    probes
        .iter()
        .filter(|p| p.probe_type == ProbeType::JLink)
        .filter_map(|p| p.serial_number.clone())
        .collect()
}

/// Probe manager for locating connected boards.
pub struct ProbeManager {
    source: ProbeSource,
    nrfjprog: String,
}

impl ProbeManager {
    /// Create a new probe manager.
    pub fn new(source: ProbeSource, nrfjprog: impl Into<String>) -> Self {
        Self { source, nrfjprog: nrfjprog.into() }
    }

    /// Name of the tool used for the scan, for messages.
    pub fn tool(&self) -> &str {
        match self.source {
            ProbeSource::Nrfjprog => &self.nrfjprog,
            ProbeSource::ProbeRs => "probe-rs",
        }
    }

    /// Find connected boards.
    pub fn scan(&self, runner: &dyn CommandRunner) -> SetupResult<Scan> {
        match self.source {
            ProbeSource::Nrfjprog => {
                let output = runner.run(&self.nrfjprog, &["-i"])?;
                let serials = parse_probe_serials(&output.stdout);
                log::debug!("nrfjprog reported {} probe(s)", serials.len());
                Ok(Scan::from_tool(serials, output.stdout))
            }
            ProbeSource::ProbeRs => {
                let probes = list_probes()?;
                Ok(Scan::native(jlink_serials(&probes)))
            }
        }
    }
}

impl Default for ProbeManager {
    fn default() -> Self {
        Self::new(ProbeSource::default(), "nrfjprog")
    }
}

/// List all USB debug probes.
#[cfg(feature = "hardware")]
pub fn list_probes() -> SetupResult<Vec<ProbeInfo>> {
    let lister = probe_rs::probe::list::Lister::new();
    let probes: Vec<ProbeInfo> = lister.list_all().iter().map(ProbeInfo::from).collect();
    for probe in &probes {
        log::debug!("Found {} serial {:?}", probe.name(), probe.serial_number);
    }
    Ok(probes)
}

/// List all USB debug probes.
#[cfg(not(feature = "hardware"))]
pub fn list_probes() -> SetupResult<Vec<ProbeInfo>> {
    Err(SetupError::Unsupported("probe-rs"))
}

/// Console message for a failed board scan.
pub fn failure_message(tool: &str, err: &SetupError) -> String {
    if err.is_not_found() {
        format!(
            "❌ {tool} not found. Install it: https://www.nordicsemi.com/Products/Development-tools/nrf-command-line-tools"
        )
    } else {
        format!("❌ Error: {err}")
    }
}
