//! Test doubles for the command engine

use super::{CommandExecutor, PolicySet};
use crate::actuator::{Actuator, FaultInjector, NominalActuator};
use satellite_shared::{Notice, Observer, StateSnapshot};
use std::sync::{Arc, Mutex};

/// Observer that keeps everything it is told
#[derive(Default)]
pub struct RecordingObserver {
    notices: Mutex<Vec<Notice>>,
    states: Mutex<Vec<StateSnapshot>>,
}

impl RecordingObserver {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn states(&self) -> Vec<StateSnapshot> {
        self.states.lock().unwrap().clone()
    }

    /// Number of failed attempts reported so far
    pub fn failed_attempts(&self) -> usize {
        self.notices()
            .iter()
            .filter(|n| matches!(n, Notice::AttemptFailed { .. }))
            .count()
    }
}

impl Observer for RecordingObserver {
    fn state(&self, snapshot: &StateSnapshot) {
        self.states.lock().unwrap().push(*snapshot);
    }

    fn notice(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}

/// Executor over a nominal actuator with default policies
pub fn nominal_executor() -> (CommandExecutor, Arc<RecordingObserver>) {
    executor_with(Arc::new(NominalActuator), PolicySet::default())
}

/// Executor whose actuator fails its first `faults` calls
pub fn faulty_executor(faults: u32, policies: PolicySet) -> (CommandExecutor, Arc<RecordingObserver>) {
    let actuator = Arc::new(FaultInjector::new(Arc::new(NominalActuator), faults));
    executor_with(actuator, policies)
}

pub fn executor_with(
    actuator: Arc<dyn Actuator>,
    policies: PolicySet,
) -> (CommandExecutor, Arc<RecordingObserver>) {
    let observer = Arc::new(RecordingObserver::default());
    let executor = CommandExecutor::new(actuator, observer.clone(), policies);
    (executor, observer)
}
