//! Fault injection for a flaky actuator

use super::{Actuator, ActuatorFault, Subsystem};
use async_trait::async_trait;
use satellite_shared::{Direction, PanelState};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Wraps an actuator and fails its next `budget` calls
pub struct FaultInjector {
    inner: Arc<dyn Actuator>,
    remaining: AtomicU32,
}

impl FaultInjector {
    /// Create an injector that fails the first `failures` actuations
    pub fn new(inner: Arc<dyn Actuator>, failures: u32) -> Self {
        Self {
            inner,
            remaining: AtomicU32::new(failures),
        }
    }

    /// Consume one fault from the budget, if any is left
    fn trip(&self, subsystem: Subsystem) -> Result<(), ActuatorFault> {
        let tripped = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if tripped {
            warn!("[ACTUATOR] injected {} fault", subsystem);
            return Err(ActuatorFault::new(subsystem, "no response (injected)"));
        }
        Ok(())
    }
}

#[async_trait]
impl Actuator for FaultInjector {
    async fn slew(&self, direction: Direction) -> Result<(), ActuatorFault> {
        self.trip(Subsystem::Attitude)?;
        self.inner.slew(direction).await
    }

    async fn drive_panels(&self, state: PanelState) -> Result<(), ActuatorFault> {
        self.trip(Subsystem::SolarPanels)?;
        self.inner.drive_panels(state).await
    }

    fn name(&self) -> &'static str {
        "fault-injector"
    }
}
