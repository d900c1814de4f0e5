//! Retry policies
//!
//! Each command kind gets one [`RetryPolicy`]. The differences between
//! commands (what is retried, what happens when attempts run out) live here
//! as configuration rather than in the handlers.

use satellite_shared::{retry, CommandKind};
use std::time::Duration;

/// Classification of a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Bad caller input; never retried
    Validation,
    /// Device state did not allow the command (may clear on its own)
    Precondition,
    /// Hardware or other unexpected fault
    Transient,
    /// Already the result of an exhausted retry loop
    Terminal,
}

/// What to do with the final failure once attempts are used up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    /// Return the failure to the caller
    Surface,
    /// Report it to the observer and return success
    Absorb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Fixed wait between attempts
    pub backoff: Duration,
    pub retry_on: &'static [FailureKind],
    pub on_exhausted: Exhaustion,
}

const TRANSIENT: &[FailureKind] = &[FailureKind::Transient];
const PRECONDITION_OR_TRANSIENT: &[FailureKind] =
    &[FailureKind::Precondition, FailureKind::Transient];

impl RetryPolicy {
    /// Single attempt, failures surfaced
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
            retry_on: &[],
            on_exhausted: Exhaustion::Surface,
        }
    }

    pub fn retrying(
        max_attempts: u32,
        backoff: Duration,
        retry_on: &'static [FailureKind],
    ) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
            retry_on,
            on_exhausted: Exhaustion::Surface,
        }
    }

    pub fn absorbing(mut self) -> Self {
        self.on_exhausted = Exhaustion::Absorb;
        self
    }

    pub fn surfacing(mut self) -> Self {
        self.on_exhausted = Exhaustion::Surface;
        self
    }

    /// Whether a failure of `kind` on attempt `attempt` (1-based) earns another try
    pub fn should_retry(&self, kind: FailureKind, attempt: u32) -> bool {
        kind != FailureKind::Validation
            && self.retry_on.contains(&kind)
            && attempt < self.max_attempts
    }
}

/// Retry policy for every command kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySet {
    pub initialize: RetryPolicy,
    pub rotate: RetryPolicy,
    pub activate_panels: RetryPolicy,
    pub deactivate_panels: RetryPolicy,
    pub collect_data: RetryPolicy,
}

impl Default for PolicySet {
    fn default() -> Self {
        Self::uniform(
            retry::DEFAULT_MAX_ATTEMPTS,
            Duration::from_millis(retry::DEFAULT_BACKOFF_MS),
        )
    }
}

impl PolicySet {
    /// Same attempt budget and backoff for every retrying command
    ///
    /// Exhausted panel failures are absorbed; every other command surfaces.
    pub fn uniform(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            initialize: RetryPolicy::once(),
            rotate: RetryPolicy::retrying(max_attempts, backoff, TRANSIENT),
            activate_panels: RetryPolicy::retrying(max_attempts, backoff, TRANSIENT)
                .absorbing(),
            deactivate_panels: RetryPolicy::retrying(max_attempts, backoff, TRANSIENT)
                .absorbing(),
            collect_data: RetryPolicy::retrying(max_attempts, backoff, PRECONDITION_OR_TRANSIENT),
        }
    }

    /// Report exhausted panel failures to the caller like every other command
    pub fn surface_panel_failures(mut self) -> Self {
        self.activate_panels = self.activate_panels.surfacing();
        self.deactivate_panels = self.deactivate_panels.surfacing();
        self
    }

    pub fn for_kind(&self, kind: CommandKind) -> &RetryPolicy {
        match kind {
            CommandKind::Initialize => &self.initialize,
            CommandKind::Rotate => &self.rotate,
            CommandKind::ActivatePanels => &self.activate_panels,
            CommandKind::DeactivatePanels => &self.deactivate_panels,
            CommandKind::CollectData => &self.collect_data,
        }
    }
}
