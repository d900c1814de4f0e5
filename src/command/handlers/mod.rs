//! Command handlers for the satellite commands
//!
//! A handler performs exactly one attempt of its command. Retrying and the
//! final surface/absorb decision belong to the executor.

mod collect;
mod initialize;
mod panels;
mod rotate;

pub use collect::handle_collect_data;
pub use initialize::handle_initialize;
pub use panels::{handle_activate_panels, handle_deactivate_panels};
pub use rotate::handle_rotate;

use super::{CommandError, CommandOutcome};
use crate::actuator::Actuator;
use satellite_shared::{Notice, Observer, Satellite, Transition, TransitionResult};

/// Context passed to command handlers for the duration of one attempt
pub struct HandlerContext<'a> {
    pub satellite: &'a mut Satellite,
    pub actuator: &'a dyn Actuator,
    pub observer: &'a dyn Observer,
}

impl HandlerContext<'_> {
    /// Apply a transition and translate the result into a command outcome
    fn apply(&mut self, transition: Transition) -> Result<CommandOutcome, CommandError> {
        match self.satellite.apply(transition) {
            TransitionResult::Applied(_) => {
                self.observer.notice(&Notice::Applied {
                    kind: transition.command_kind(),
                });
                Ok(CommandOutcome::Applied)
            }
            TransitionResult::Unchanged(_) => Ok(CommandOutcome::Unchanged),
            TransitionResult::Rejected { reason, .. } => Err(reason.into()),
        }
    }
}
