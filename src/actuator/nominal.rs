//! Actuator for normal operation

use super::{Actuator, ActuatorFault};
use async_trait::async_trait;
use satellite_shared::{Direction, PanelState};
use tracing::debug;

/// Actuator whose movements always succeed
#[derive(Debug, Default, Clone, Copy)]
pub struct NominalActuator;

#[async_trait]
impl Actuator for NominalActuator {
    async fn slew(&self, direction: Direction) -> Result<(), ActuatorFault> {
        debug!("[ACTUATOR] slew to {}", direction);
        Ok(())
    }

    async fn drive_panels(&self, state: PanelState) -> Result<(), ActuatorFault> {
        debug!("[ACTUATOR] panels -> {}", state);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "nominal"
    }
}
