//! Setup recommendations for `.vscode/tasks.json`.
//!
//! The first board or port found becomes the initiator and every later one a
//! responder. Input values are only recommended once two of a kind exist.

use serde::Serialize;
use std::fmt;

/// Role a board plays in the two-board setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Role {
    Initiator,
    Responder,
}

impl Role {
    /// Role of the item at `index` (0-based).
    pub const fn for_index(index: usize) -> Self {
        if index == 0 {
            Self::Initiator
        } else {
            Self::Responder
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initiator => write!(f, "Initiator"),
            Self::Responder => write!(f, "Responder"),
        }
    }
}

/// Values for the `inputs` of tasks.json.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Assignment {
    #[serde(rename = "initiatorSN", skip_serializing_if = "Option::is_none")]
    pub initiator_sn: Option<String>,
    #[serde(rename = "responderSN", skip_serializing_if = "Option::is_none")]
    pub responder_sn: Option<String>,
    #[serde(rename = "initiatorCOM", skip_serializing_if = "Option::is_none")]
    pub initiator_com: Option<String>,
    #[serde(rename = "responderCOM", skip_serializing_if = "Option::is_none")]
    pub responder_com: Option<String>,
}

impl Assignment {
    /// Pick the initiator and responder from each list that has at least two entries.
    pub fn from_found(boards: &[String], ports: &[String]) -> Self {
        let (initiator_sn, responder_sn) = pair(boards);
        let (initiator_com, responder_com) = pair(ports);
        Self { initiator_sn, responder_sn, initiator_com, responder_com }
    }

    /// `(input id, value)` for every value that is set.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("initiatorSN", &self.initiator_sn),
            ("responderSN", &self.responder_sn),
            ("initiatorCOM", &self.initiator_com),
            ("responderCOM", &self.responder_com),
        ]
        .into_iter()
        .filter_map(|(id, value)| value.as_deref().map(|v| (id, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

fn pair(items: &[String]) -> (Option<String>, Option<String>) {
    match items {
        [first, second, ..] => (Some(first.clone()), Some(second.clone())),
        _ => (None, None),
    }
}

/// Boards and ports found by a run, and what to put in tasks.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub boards: Vec<String>,
    pub ports: Vec<String>,
    pub assignment: Assignment,
}

impl Recommendation {
    pub fn new(boards: Vec<String>, ports: Vec<String>) -> Self {
        let assignment = Assignment::from_found(&boards, &ports);
        Self { boards, ports, assignment }
    }

    fn fmt_boards(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.boards.as_slice() {
            [] => {
                writeln!(f, "\n❌ No boards detected!")?;
                writeln!(f, "  1. Check USB connections")?;
                writeln!(f, "  2. Check J-Link drivers installed")?;
                writeln!(f, "  3. Run: nrfjprog -i (directly)")
            }
            [only] => {
                writeln!(f, "\n⚠ Found only 1 board: SN = {only}")?;
                writeln!(f, "  Connect second board via USB")
            }
            boards => {
                writeln!(f, "\n✓ Found {} boards:", boards.len())?;
                for (i, sn) in boards.iter().enumerate() {
                    writeln!(f, "  {}. {}: SN = {}", i + 1, Role::for_index(i), sn)?;
                }
                writeln!(f, "\nAdd to tasks.json inputs:")?;
                writeln!(f, "  \"initiatorSN\": \"{}\"", boards[0])?;
                writeln!(f, "  \"responderSN\": \"{}\"", boards[1])
            }
        }
    }

    fn fmt_ports(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ports.as_slice() {
            [] => {
                writeln!(f, "\n⚠ No serial ports detected!")?;
                writeln!(f, "  Boards may not be connected via USB UART")
            }
            [only] => {
                writeln!(f, "\n⚠ Found only 1 serial port: {only}")?;
                writeln!(f, "  Connect second board via USB")
            }
            ports => {
                writeln!(f, "\n✓ Found {} serial ports:", ports.len())?;
                for (i, port) in ports.iter().enumerate() {
                    writeln!(f, "  {}. {}: {}", i + 1, Role::for_index(i), port)?;
                }
                writeln!(f, "\nAdd to tasks.json inputs:")?;
                writeln!(f, "  \"initiatorCOM\": \"{}\"", ports[0])?;
                writeln!(f, "  \"responderCOM\": \"{}\"", ports[1])
            }
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_boards(f)?;
        self.fmt_ports(f)
    }
}
