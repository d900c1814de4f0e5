//! Command execution engine for the satellite
//!
//! This module handles:
//! - The closed set of satellite commands
//! - Dispatching each attempt to its handler
//! - Retry policies and the failure taxonomy
//! - Surfacing or absorbing failures once retries run out

mod error;
mod executor;
pub mod handlers;
mod policy;

#[cfg(test)]
pub(crate) mod testing;

pub use error::CommandError;
pub use executor::{CommandExecutor, CommandOutcome};
pub use policy::{Exhaustion, FailureKind, PolicySet, RetryPolicy};

use satellite_shared::CommandKind;

/// A request to change satellite state
///
/// Built per invocation, executed once, then dropped. The satellite is only
/// borrowed while the command executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatelliteCommand {
    Initialize,
    /// Raw direction token from the caller, validated on execution
    Rotate { target: String },
    ActivatePanels,
    DeactivatePanels,
    CollectData,
}

impl SatelliteCommand {
    pub fn rotate(target: impl Into<String>) -> Self {
        SatelliteCommand::Rotate {
            target: target.into(),
        }
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            SatelliteCommand::Initialize => CommandKind::Initialize,
            SatelliteCommand::Rotate { .. } => CommandKind::Rotate,
            SatelliteCommand::ActivatePanels => CommandKind::ActivatePanels,
            SatelliteCommand::DeactivatePanels => CommandKind::DeactivatePanels,
            SatelliteCommand::CollectData => CommandKind::CollectData,
        }
    }
}
