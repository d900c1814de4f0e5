//! Value types describing the satellite and its command history

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pointing direction of the satellite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Every valid direction, in canonical order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::North => "North",
            Direction::South => "South",
            Direction::East => "East",
            Direction::West => "West",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token that does not name one of the four directions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction: {0}")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Exact, case-sensitive match against the canonical names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// Solar panel activation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PanelState {
    Active,
    #[default]
    Inactive,
}

impl fmt::Display for PanelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelState::Active => write!(f, "Active"),
            PanelState::Inactive => write!(f, "Inactive"),
        }
    }
}

/// The fixed set of commands the satellite understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Initialize,
    Rotate,
    ActivatePanels,
    DeactivatePanels,
    CollectData,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Initialize => "initialize",
            CommandKind::Rotate => "rotate",
            CommandKind::ActivatePanels => "activatePanels",
            CommandKind::DeactivatePanels => "deactivatePanels",
            CommandKind::CollectData => "collectData",
        };
        f.write_str(name)
    }
}

/// One state-changing command in the audit trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Monotonic per-device sequence number
    pub sequence: u64,
    pub kind: CommandKind,
    /// Orientation right after the command was applied
    pub orientation: Direction,
    pub recorded_at_ms: u64,
}

/// Point-in-time copy of the observable device state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateSnapshot {
    pub orientation: Direction,
    pub panels: PanelState,
    pub data_collected: u64,
    pub history_len: usize,
}
