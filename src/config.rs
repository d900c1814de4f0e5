//! Console configuration

use crate::actuator::{Actuator, FaultInjector, NominalActuator};
use crate::command::PolicySet;
use clap::Parser;
use satellite_shared::retry;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "satellite-console")]
#[command(about = "Interactive command console for a simulated satellite", long_about = None)]
pub struct Cli {
    /// Attempts per command before giving up
    #[arg(long, default_value_t = retry::DEFAULT_MAX_ATTEMPTS)]
    pub retry_attempts: u32,

    /// Delay between attempts in milliseconds
    #[arg(long, default_value_t = retry::DEFAULT_BACKOFF_MS)]
    pub retry_backoff_ms: u64,

    /// Report exhausted panel failures as errors instead of only logging them
    #[arg(long)]
    pub surface_panel_failures: bool,

    /// Make the actuator fail its first N movements
    #[arg(long, default_value_t = 0)]
    pub inject_actuator_faults: u32,
}

/// Configuration for the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Attempts per retrying command
    pub max_attempts: u32,
    /// Wait between attempts
    pub backoff: Duration,
    pub surface_panel_failures: bool,
    /// Actuator faults to inject at startup
    pub injected_faults: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            max_attempts: retry::DEFAULT_MAX_ATTEMPTS,
            backoff: Duration::from_millis(retry::DEFAULT_BACKOFF_MS),
            surface_panel_failures: false,
            injected_faults: 0,
        }
    }
}

impl From<Cli> for ConsoleConfig {
    fn from(cli: Cli) -> Self {
        Self {
            max_attempts: cli.retry_attempts,
            backoff: Duration::from_millis(cli.retry_backoff_ms),
            surface_panel_failures: cli.surface_panel_failures,
            injected_faults: cli.inject_actuator_faults,
        }
    }
}

impl ConsoleConfig {
    /// Retry policies for every command kind
    pub fn policies(&self) -> PolicySet {
        let policies = PolicySet::uniform(self.max_attempts, self.backoff);
        if self.surface_panel_failures {
            policies.surface_panel_failures()
        } else {
            policies
        }
    }

    /// Actuator to drive the satellite with
    pub fn actuator(&self) -> Arc<dyn Actuator> {
        let nominal: Arc<dyn Actuator> = Arc::new(NominalActuator);
        if self.injected_faults == 0 {
            nominal
        } else {
            Arc::new(FaultInjector::new(nominal, self.injected_faults))
        }
    }
}
