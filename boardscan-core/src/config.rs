//! Scan configuration.
//!
//! Built by the binary from its command-line flags.

use serde::Serialize;
use std::fmt;

/// Where board serial numbers come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProbeSource {
    /// Parse the output of `nrfjprog -i`.
    #[default]
    Nrfjprog,
    /// Enumerate J-Link probes over USB with probe-rs.
    ProbeRs,
}

/// Where serial port names come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortSource {
    /// Parse the output of `python -m serial.tools.list_ports`.
    #[default]
    Pyserial,
    /// Ask the operating system directly.
    Native,
}

impl fmt::Display for ProbeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nrfjprog => write!(f, "nrfjprog"),
            Self::ProbeRs => write!(f, "probe-rs"),
        }
    }
}

impl fmt::Display for PortSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pyserial => write!(f, "pyserial"),
            Self::Native => write!(f, "native"),
        }
    }
}

/// Default Python interpreter name for the current platform.
pub const fn default_python() -> &'static str {
    if cfg!(windows) {
        "python"
    } else {
        "python3"
    }
}

/// Everything a scan needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub probe_source: ProbeSource,
    /// Path or name of the `nrfjprog` executable.
    pub nrfjprog: String,
    pub port_source: PortSource,
    /// Interpreter used to run `serial.tools.list_ports`.
    pub python: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            probe_source: ProbeSource::default(),
            nrfjprog: "nrfjprog".to_string(),
            port_source: PortSource::default(),
            python: default_python().to_string(),
        }
    }
}
