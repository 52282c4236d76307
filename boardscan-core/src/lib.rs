//! Boardscan Core - board and serial port discovery.
//!
//! This crate finds connected J-Link boards and their serial ports, turns
//! what it finds into VS Code `tasks.json` recommendations, and can write
//! those recommendations into an existing tasks file.

pub mod config;
pub mod error;
pub mod ports;
pub mod probe;
pub mod recommend;
pub mod report;
pub mod runner;
pub mod tasks;

// Re-export commonly used types
pub use config::{PortSource, ProbeSource, ScanConfig};
pub use error::{SetupError, SetupResult};
pub use ports::PortManager;
pub use probe::{ProbeInfo, ProbeManager, ProbeType};
pub use recommend::{Assignment, Recommendation, Role};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
pub use tasks::TasksFile;

/// Items found by one discovery step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    /// Serial numbers or port names, in the order they were reported.
    pub items: Vec<String>,
    /// Raw stdout of the external tool, when one was run.
    pub output: Option<String>,
}

impl Scan {
    /// Result of parsing an external tool's stdout.
    pub const fn from_tool(items: Vec<String>, output: String) -> Self {
        Self { items, output: Some(output) }
    }

    /// Result of a native enumeration.
    pub const fn native(items: Vec<String>) -> Self {
        Self { items, output: None }
    }
}

impl ScanConfig {
    /// Probe manager for this configuration.
    pub fn probe_manager(&self) -> ProbeManager {
        ProbeManager::new(self.probe_source, self.nrfjprog.clone())
    }

    /// Port manager for this configuration.
    pub fn port_manager(&self) -> PortManager {
        PortManager::new(self.port_source, self.python.clone())
    }
}
