//! Actuator bridge
//!
//! Physical side effects of a command (slewing the bus, driving the panel
//! motors) go through an [`Actuator`]. The nominal actuator never fails;
//! the fault injector lets the retry machinery be exercised.

mod faults;
mod nominal;

pub use faults::FaultInjector;
pub use nominal::NominalActuator;

use async_trait::async_trait;
use satellite_shared::{Direction, PanelState};
use thiserror::Error;

/// Hardware subsystem an actuator call targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsystem {
    Attitude,
    SolarPanels,
}

impl std::fmt::Display for Subsystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Subsystem::Attitude => write!(f, "attitude"),
            Subsystem::SolarPanels => write!(f, "solar panel"),
        }
    }
}

/// A failed actuation; always considered transient
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{subsystem} actuator fault: {detail}")]
pub struct ActuatorFault {
    pub subsystem: Subsystem,
    pub detail: String,
}

impl ActuatorFault {
    pub fn new(subsystem: Subsystem, detail: impl Into<String>) -> Self {
        Self {
            subsystem,
            detail: detail.into(),
        }
    }
}

/// Drives the satellite hardware
#[async_trait]
pub trait Actuator: Send + Sync {
    /// Slew the satellite to face `direction`
    async fn slew(&self, direction: Direction) -> Result<(), ActuatorFault>;

    /// Move the solar panels into `state`
    async fn drive_panels(&self, state: PanelState) -> Result<(), ActuatorFault>;

    /// Human-readable name for this actuator
    fn name(&self) -> &'static str;
}
