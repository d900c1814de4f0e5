//! Command failure taxonomy

use super::policy::FailureKind;
use crate::actuator::ActuatorFault;
use satellite_shared::Rejection;
use thiserror::Error;

/// Why a command did not complete
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// Caller asked for a direction outside North/South/East/West
    #[error("Invalid rotation: {direction}. Please use 'North'/'South'/'East'/'West'.")]
    InvalidDirection { direction: String },

    /// Device state did not allow the transition
    #[error(transparent)]
    Rejected(#[from] Rejection),

    /// Hardware did not carry out the movement
    #[error(transparent)]
    Actuator(#[from] ActuatorFault),

    #[error("Error in solar panel activation after {attempts} attempts: {source}")]
    ActivationFailed {
        attempts: u32,
        #[source]
        source: Box<CommandError>,
    },

    #[error("Error in solar panel deactivation after {attempts} attempts: {source}")]
    DeactivationFailed {
        attempts: u32,
        #[source]
        source: Box<CommandError>,
    },

    #[error("Error in data collection after {attempts} attempts: {source}")]
    DataCollectionFailed {
        attempts: u32,
        #[source]
        source: Box<CommandError>,
    },
}

impl CommandError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CommandError::InvalidDirection { .. } => FailureKind::Validation,
            CommandError::Rejected(_) => FailureKind::Precondition,
            CommandError::Actuator(_) => FailureKind::Transient,
            CommandError::ActivationFailed { .. }
            | CommandError::DeactivationFailed { .. }
            | CommandError::DataCollectionFailed { .. } => FailureKind::Terminal,
        }
    }

    /// Whether this is a classified command failure rather than a raw fault
    /// that escaped its command
    pub fn is_expected(&self) -> bool {
        self.kind() != FailureKind::Transient
    }
}
