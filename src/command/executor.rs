//! Command executor - dispatches commands and applies retry policies

use super::handlers::{self, HandlerContext};
use super::{CommandError, Exhaustion, FailureKind, PolicySet, RetryPolicy, SatelliteCommand};
use crate::actuator::Actuator;
use satellite_shared::{CommandKind, Notice, Observer, Satellite};
use std::sync::Arc;
use tokio::time::sleep;

/// Result of a successful command execution
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// State changed and was recorded in history
    Applied,
    /// Requested state already held; nothing recorded
    Unchanged,
    /// Retries ran out and policy swallowed the failure; state untouched
    Absorbed(CommandError),
}

/// Executes satellite commands one at a time
pub struct CommandExecutor {
    actuator: Arc<dyn Actuator>,
    observer: Arc<dyn Observer>,
    policies: PolicySet,
}

impl CommandExecutor {
    /// Create a new command executor
    pub fn new(
        actuator: Arc<dyn Actuator>,
        observer: Arc<dyn Observer>,
        policies: PolicySet,
    ) -> Self {
        Self {
            actuator,
            observer,
            policies,
        }
    }

    pub fn observer(&self) -> &dyn Observer {
        self.observer.as_ref()
    }

    /// Execute a command to completion, retries included
    ///
    /// Backoff waits hold the satellite borrow, so nothing else touches the
    /// device until this returns.
    pub async fn execute(
        &self,
        command: &SatelliteCommand,
        satellite: &mut Satellite,
    ) -> Result<CommandOutcome, CommandError> {
        let kind = command.kind();
        let policy = self.policies.for_kind(kind);

        self.observer.notice(&Notice::Executing { kind });

        let mut attempt = 1;
        loop {
            let err = match self.attempt(command, satellite).await {
                Ok(outcome) => return Ok(outcome),
                Err(err) => err,
            };

            let will_retry = policy.should_retry(err.kind(), attempt);
            self.observer.notice(&Notice::AttemptFailed {
                kind,
                attempt,
                max_attempts: policy.max_attempts,
                error: err.to_string(),
                will_retry,
            });

            if !will_retry {
                return self.conclude(kind, policy, err, attempt);
            }

            if !policy.backoff.is_zero() {
                sleep(policy.backoff).await;
            }
            attempt += 1;
        }
    }

    /// Run a single attempt through the matching handler
    async fn attempt(
        &self,
        command: &SatelliteCommand,
        satellite: &mut Satellite,
    ) -> Result<CommandOutcome, CommandError> {
        let mut ctx = HandlerContext {
            satellite,
            actuator: self.actuator.as_ref(),
            observer: self.observer.as_ref(),
        };

        match command {
            SatelliteCommand::Initialize => handlers::handle_initialize(&mut ctx).await,
            SatelliteCommand::Rotate { target } => handlers::handle_rotate(&mut ctx, target).await,
            SatelliteCommand::ActivatePanels => handlers::handle_activate_panels(&mut ctx).await,
            SatelliteCommand::DeactivatePanels => {
                handlers::handle_deactivate_panels(&mut ctx).await
            }
            SatelliteCommand::CollectData => handlers::handle_collect_data(&mut ctx).await,
        }
    }

    /// Turn the last failure into the command's terminal result
    fn conclude(
        &self,
        kind: CommandKind,
        policy: &RetryPolicy,
        err: CommandError,
        attempts: u32,
    ) -> Result<CommandOutcome, CommandError> {
        // Caller input defects are reported as-is, never absorbed
        if err.kind() == FailureKind::Validation {
            return Err(err);
        }

        let terminal = match kind {
            CommandKind::ActivatePanels => CommandError::ActivationFailed {
                attempts,
                source: Box::new(err),
            },
            CommandKind::DeactivatePanels => CommandError::DeactivationFailed {
                attempts,
                source: Box::new(err),
            },
            CommandKind::CollectData => CommandError::DataCollectionFailed {
                attempts,
                source: Box::new(err),
            },
            // Rotation faults surface verbatim
            CommandKind::Initialize | CommandKind::Rotate => err,
        };

        match policy.on_exhausted {
            Exhaustion::Surface => Err(terminal),
            Exhaustion::Absorb => {
                self.observer.notice(&Notice::Absorbed {
                    kind,
                    error: terminal.to_string(),
                });
                Ok(CommandOutcome::Absorbed(terminal))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::{ActuatorFault, Subsystem};
    use crate::command::testing::{faulty_executor, nominal_executor};
    use satellite_shared::{Direction, PanelState, Rejection, StateSnapshot};
    use std::time::Duration;
    use tokio::time::Instant;

    fn state(orientation: Direction, panels: PanelState, data_collected: u64, history_len: usize) -> StateSnapshot {
        StateSnapshot {
            orientation,
            panels,
            data_collected,
            history_len,
        }
    }

    async fn initialized(executor: &CommandExecutor) -> Satellite {
        let mut sat = Satellite::new();
        executor
            .execute(&SatelliteCommand::Initialize, &mut sat)
            .await
            .unwrap();
        sat
    }

    #[tokio::test(start_paused = true)]
    async fn test_initialize_resets_any_state() {
        let (executor, _) = nominal_executor();
        let mut sat = initialized(&executor).await;

        executor.execute(&SatelliteCommand::rotate("West"), &mut sat).await.unwrap();
        executor.execute(&SatelliteCommand::ActivatePanels, &mut sat).await.unwrap();
        executor.execute(&SatelliteCommand::CollectData, &mut sat).await.unwrap();

        let outcome = executor.execute(&SatelliteCommand::Initialize, &mut sat).await;
        assert_eq!(outcome, Ok(CommandOutcome::Applied));
        assert_eq!(sat.snapshot(), state(Direction::North, PanelState::Inactive, 0, 1));

        // Idempotent
        executor.execute(&SatelliteCommand::Initialize, &mut sat).await.unwrap();
        assert_eq!(sat.snapshot(), state(Direction::North, PanelState::Inactive, 0, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotate_to_every_other_direction() {
        let (executor, _) = nominal_executor();

        for from in Direction::ALL {
            for to in Direction::ALL.into_iter().filter(|d| *d != from) {
                let mut sat = initialized(&executor).await;
                if from != Direction::North {
                    executor
                        .execute(&SatelliteCommand::rotate(from.as_str()), &mut sat)
                        .await
                        .unwrap();
                }
                let before = sat.history().len();

                let outcome = executor
                    .execute(&SatelliteCommand::rotate(to.as_str()), &mut sat)
                    .await;

                assert_eq!(outcome, Ok(CommandOutcome::Applied));
                assert_eq!(sat.orientation(), to);
                assert_eq!(sat.history().len(), before + 1);
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotate_to_current_is_noop() {
        let (executor, observer) = nominal_executor();
        let mut sat = initialized(&executor).await;
        let before = sat.snapshot();

        let outcome = executor.execute(&SatelliteCommand::rotate("North"), &mut sat).await;

        assert_eq!(outcome, Ok(CommandOutcome::Unchanged));
        assert_eq!(sat.snapshot(), before);
        assert!(observer.notices().contains(&Notice::AlreadyOriented {
            direction: Direction::North
        }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_direction_fails_without_delay() {
        let (executor, observer) = nominal_executor();
        let mut sat = initialized(&executor).await;
        let before = sat.snapshot();
        let started = Instant::now();

        let outcome = executor.execute(&SatelliteCommand::rotate("Up"), &mut sat).await;

        assert_eq!(
            outcome,
            Err(CommandError::InvalidDirection {
                direction: "Up".into()
            })
        );
        assert!(started.elapsed() < Duration::from_millis(1));
        assert_eq!(observer.failed_attempts(), 1);
        assert_eq!(sat.snapshot(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_with_inactive_panels_exhausts_retries() {
        let (executor, observer) = nominal_executor();
        let mut sat = initialized(&executor).await;
        let before = sat.snapshot();
        let started = Instant::now();

        let outcome = executor.execute(&SatelliteCommand::CollectData, &mut sat).await;

        assert_eq!(
            outcome,
            Err(CommandError::DataCollectionFailed {
                attempts: 3,
                source: Box::new(CommandError::Rejected(Rejection::PanelsInactive)),
            })
        );
        // Two backoff waits between three attempts
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(2), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(3), "elapsed {:?}", elapsed);
        assert_eq!(observer.failed_attempts(), 3);
        assert_eq!(sat.snapshot(), before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_collect_adds_ten_per_call() {
        let (executor, _) = nominal_executor();
        let mut sat = initialized(&executor).await;

        executor.execute(&SatelliteCommand::ActivatePanels, &mut sat).await.unwrap();
        executor.execute(&SatelliteCommand::CollectData, &mut sat).await.unwrap();
        assert_eq!(sat.data_collected(), 10);
        executor.execute(&SatelliteCommand::CollectData, &mut sat).await.unwrap();
        assert_eq!(sat.data_collected(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deactivate_blocks_collection() {
        let (executor, _) = nominal_executor();
        let mut sat = initialized(&executor).await;

        executor.execute(&SatelliteCommand::ActivatePanels, &mut sat).await.unwrap();
        executor.execute(&SatelliteCommand::DeactivatePanels, &mut sat).await.unwrap();
        assert_eq!(sat.panels(), PanelState::Inactive);

        let outcome = executor.execute(&SatelliteCommand::CollectData, &mut sat).await;
        assert!(matches!(outcome, Err(CommandError::DataCollectionFailed { .. })));
        assert_eq!(sat.data_collected(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotate_recovers_from_transient_faults() {
        let (executor, observer) = faulty_executor(2, PolicySet::default());
        let mut sat = Satellite::new();

        let outcome = executor.execute(&SatelliteCommand::rotate("South"), &mut sat).await;

        assert_eq!(outcome, Ok(CommandOutcome::Applied));
        assert_eq!(sat.orientation(), Direction::South);
        assert_eq!(sat.history().len(), 1);
        assert_eq!(observer.failed_attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rotate_surfaces_last_fault_verbatim() {
        let (executor, _) = faulty_executor(3, PolicySet::default());
        let mut sat = Satellite::new();

        let outcome = executor.execute(&SatelliteCommand::rotate("East"), &mut sat).await;

        let expected = ActuatorFault::new(Subsystem::Attitude, "no response (injected)");
        assert_eq!(outcome, Err(CommandError::Actuator(expected)));
        assert_eq!(sat.orientation(), Direction::North);
        assert!(sat.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_panel_failure_absorbed_by_default() {
        let (executor, observer) = faulty_executor(3, PolicySet::default());
        let mut sat = Satellite::new();

        let outcome = executor.execute(&SatelliteCommand::ActivatePanels, &mut sat).await;

        let expected = CommandError::ActivationFailed {
            attempts: 3,
            source: Box::new(CommandError::Actuator(ActuatorFault::new(
                Subsystem::SolarPanels,
                "no response (injected)",
            ))),
        };
        assert_eq!(outcome, Ok(CommandOutcome::Absorbed(expected)));
        assert_eq!(sat.panels(), PanelState::Inactive);
        assert!(sat.history().is_empty());
        assert!(observer.notices().iter().any(|n| matches!(
            n,
            Notice::Absorbed {
                kind: CommandKind::ActivatePanels,
                ..
            }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn test_panel_failure_surfaced_when_configured() {
        let policies = PolicySet::default().surface_panel_failures();
        let (executor, observer) = faulty_executor(3, policies);
        let mut sat = Satellite::new();
        executor.execute(&SatelliteCommand::Initialize, &mut sat).await.unwrap();

        let outcome = executor.execute(&SatelliteCommand::DeactivatePanels, &mut sat).await;

        assert!(matches!(
            outcome,
            Err(CommandError::DeactivationFailed { attempts: 3, .. })
        ));
        assert_eq!(sat.history().len(), 1);
        assert!(!observer
            .notices()
            .iter()
            .any(|n| matches!(n, Notice::Absorbed { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn test_activate_recovers_from_transient_faults() {
        let (executor, observer) = faulty_executor(2, PolicySet::default());
        let mut sat = Satellite::new();

        let outcome = executor.execute(&SatelliteCommand::ActivatePanels, &mut sat).await;

        assert_eq!(outcome, Ok(CommandOutcome::Applied));
        assert_eq!(sat.panels(), PanelState::Active);
        assert_eq!(sat.history().len(), 1);
        assert_eq!(sat.history()[0].kind, CommandKind::ActivatePanels);
        assert_eq!(observer.failed_attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deactivate_recovers_from_transient_faults() {
        let (executor, observer) = faulty_executor(2, PolicySet::default());
        let mut sat = Satellite::new();
        let started = Instant::now();

        let outcome = executor.execute(&SatelliteCommand::DeactivatePanels, &mut sat).await;

        assert_eq!(outcome, Ok(CommandOutcome::Applied));
        assert_eq!(sat.panels(), PanelState::Inactive);
        assert_eq!(sat.history().len(), 1);
        assert_eq!(sat.history()[0].kind, CommandKind::DeactivatePanels);
        assert_eq!(observer.failed_attempts(), 2);
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_backoff_policy_does_not_wait() {
        let policies = PolicySet::uniform(3, Duration::ZERO);
        let (executor, observer) = faulty_executor(0, policies);
        let mut sat = Satellite::new();
        let started = Instant::now();

        let outcome = executor.execute(&SatelliteCommand::CollectData, &mut sat).await;

        assert!(outcome.is_err());
        assert_eq!(observer.failed_attempts(), 3);
        assert!(started.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_reported_through_observer() {
        let (executor, observer) = nominal_executor();
        let mut sat = initialized(&executor).await;

        executor.execute(&SatelliteCommand::rotate("West"), &mut sat).await.unwrap();
        executor.execute(&SatelliteCommand::ActivatePanels, &mut sat).await.unwrap();
        executor.execute(&SatelliteCommand::CollectData, &mut sat).await.unwrap();
        executor.execute(&SatelliteCommand::DeactivatePanels, &mut sat).await.unwrap();

        let notices = observer.notices();
        for expected in [
            Notice::Initializing,
            Notice::Rotating {
                direction: Direction::West,
            },
            Notice::DrivingPanels {
                state: PanelState::Active,
            },
            Notice::Collecting,
            Notice::DrivingPanels {
                state: PanelState::Inactive,
            },
        ] {
            assert!(notices.contains(&expected), "missing {:?}", expected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_collection_reports_no_collecting() {
        let (executor, observer) = nominal_executor();
        let mut sat = initialized(&executor).await;

        let outcome = executor.execute(&SatelliteCommand::CollectData, &mut sat).await;

        assert!(outcome.is_err());
        assert_eq!(observer.failed_attempts(), 3);
        assert!(!observer.notices().contains(&Notice::Collecting));
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_state_goes_to_injected_observer() {
        let (executor, observer) = nominal_executor();
        let sat = initialized(&executor).await;

        sat.show_state(executor.observer());

        assert_eq!(
            observer.states(),
            vec![state(Direction::North, PanelState::Inactive, 0, 1)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_walkthrough() {
        let (executor, _) = nominal_executor();
        let mut sat = Satellite::new();

        // 1. Initialize
        executor.execute(&SatelliteCommand::Initialize, &mut sat).await.unwrap();
        assert_eq!(sat.snapshot(), state(Direction::North, PanelState::Inactive, 0, 1));

        // 2. Rotate East
        executor.execute(&SatelliteCommand::rotate("East"), &mut sat).await.unwrap();
        assert_eq!(sat.snapshot(), state(Direction::East, PanelState::Inactive, 0, 2));
        let kinds: Vec<CommandKind> = sat.history().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![CommandKind::Initialize, CommandKind::Rotate]);

        // 3. Rotate East again is a no-op
        let outcome = executor.execute(&SatelliteCommand::rotate("East"), &mut sat).await;
        assert_eq!(outcome, Ok(CommandOutcome::Unchanged));
        assert_eq!(sat.snapshot(), state(Direction::East, PanelState::Inactive, 0, 2));

        // 4. Collect with panels inactive
        let outcome = executor.execute(&SatelliteCommand::CollectData, &mut sat).await;
        assert!(matches!(outcome, Err(CommandError::DataCollectionFailed { .. })));
        assert_eq!(sat.snapshot(), state(Direction::East, PanelState::Inactive, 0, 2));

        // 5. Activate, then collect
        executor.execute(&SatelliteCommand::ActivatePanels, &mut sat).await.unwrap();
        assert_eq!(sat.snapshot(), state(Direction::East, PanelState::Active, 0, 3));
        executor.execute(&SatelliteCommand::CollectData, &mut sat).await.unwrap();
        assert_eq!(sat.snapshot(), state(Direction::East, PanelState::Active, 10, 4));

        // 6. Invalid direction leaves state alone
        let outcome = executor.execute(&SatelliteCommand::rotate("North-ish"), &mut sat).await;
        assert!(matches!(outcome, Err(CommandError::InvalidDirection { .. })));
        assert_eq!(sat.snapshot(), state(Direction::East, PanelState::Active, 10, 4));
    }
}
