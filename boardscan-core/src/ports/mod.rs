//! Serial port discovery.

use crate::config::PortSource;
use crate::error::{SetupError, SetupResult};
use crate::runner::CommandRunner;
use crate::Scan;

/// Arguments that make Python print the pyserial port list.
pub const LIST_PORTS_ARGS: [&str; 2] = ["-m", "serial.tools.list_ports"];

/// Whether a line or name refers to a UART device.
pub fn is_port_name(text: &str) -> bool {
    text.contains("COM") || text.contains("/dev/tty")
}

/// Extract port names from `serial.tools.list_ports` output.
///
/// The first token of every line that mentions `COM` or `/dev/tty` is taken
/// as the port name.
pub fn parse_port_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|line| is_port_name(line))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Locates serial ports.
pub struct PortManager {
    source: PortSource,
    python: String,
}

impl PortManager {
    pub fn new(source: PortSource, python: impl Into<String>) -> Self {
        Self { source, python: python.into() }
    }

    /// Find serial ports.
    pub fn scan(&self, runner: &dyn CommandRunner) -> SetupResult<Scan> {
        match self.source {
            PortSource::Pyserial => {
                let output = runner.run(&self.python, &LIST_PORTS_ARGS)?;
                let ports = parse_port_names(&output.stdout);
                log::debug!("list_ports reported {} port(s)", ports.len());
                Ok(Scan::from_tool(ports, output.stdout))
            }
            PortSource::Native => {
                let ports = list_ports()?;
                Ok(Scan::native(ports.into_iter().filter(|p| is_port_name(p)).collect()))
            }
        }
    }
}

impl Default for PortManager {
    fn default() -> Self {
        Self::new(PortSource::default(), crate::config::default_python())
    }
}

/// Ask the operating system for its serial ports.
#[cfg(feature = "hardware")]
pub fn list_ports() -> SetupResult<Vec<String>> {
    let ports = tokio_serial::available_ports()
        .map_err(|e| SetupError::PortEnumeration(e.to_string()))?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

/// Ask the operating system for its serial ports.
#[cfg(not(feature = "hardware"))]
pub fn list_ports() -> SetupResult<Vec<String>> {
    Err(SetupError::Unsupported("native serial port"))
}

/// Console message for a failed port scan.
pub fn failure_message(err: &SetupError) -> String {
    format!("❌ Error: {err}\nInstall pyserial: pip install pyserial")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::CommandOutput;

    struct FakePython {
        stdout: &'static str,
    }

    impl CommandRunner for FakePython {
        fn run(&self, program: &str, args: &[&str]) -> SetupResult<CommandOutput> {
            assert_eq!(program, "python3");
            assert_eq!(args, LIST_PORTS_ARGS);
            Ok(CommandOutput::success(self.stdout))
        }
    }

    #[test]
    fn test_windows_ports() {
        let stdout = "COM3                 JLink CDC UART Port (COM3)\nCOM7                 JLink CDC UART Port (COM7)\n2 ports found\n";
        assert_eq!(parse_port_names(stdout), vec!["COM3", "COM7"]);
    }

    #[test]
    fn test_unix_ports() {
        let stdout = "/dev/ttyACM0\n/dev/ttyACM1\n/dev/ttyS0\n3 ports found\n";
        assert_eq!(parse_port_names(stdout), vec!["/dev/ttyACM0", "/dev/ttyACM1", "/dev/ttyS0"]);
    }

    #[test]
    fn test_other_lines_skipped() {
        let stdout = "no ports found\n/dev/cu.usbmodem0006831\n";
        assert!(parse_port_names(stdout).is_empty());
    }

    #[test]
    fn test_first_token_of_indented_line() {
        let stdout = "   /dev/tty.usbmodem1  desc\n";
        assert_eq!(parse_port_names(stdout), vec!["/dev/tty.usbmodem1"]);
    }

    #[test]
    fn test_empty_output() {
        assert!(parse_port_names("").is_empty());
    }

    #[test]
    fn test_scan_with_fake_python() {
        let manager = PortManager::new(PortSource::Pyserial, "python3");
        let scan = manager.scan(&FakePython { stdout: "/dev/ttyACM0\n1 ports found\n" }).expect("scan");
        assert_eq!(scan.items, vec!["/dev/ttyACM0"]);
        assert!(scan.output.is_some());
    }

    #[test]
    fn test_failure_message_mentions_pyserial() {
        let err = SetupError::ToolNotFound { tool: "python3".to_string() };
        let msg = failure_message(&err);
        assert_eq!(msg.lines().next(), Some("❌ Error: python3 not found"));
        assert!(msg.ends_with("Install pyserial: pip install pyserial"));
    }
}
