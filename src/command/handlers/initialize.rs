//! Initialize command handler

use super::HandlerContext;
use crate::command::{CommandError, CommandOutcome};
use satellite_shared::{Notice, Transition};

/// Handle INITIALIZE
///
/// Resets the satellite to North / Inactive / 0 whatever state it was in.
pub async fn handle_initialize(ctx: &mut HandlerContext<'_>) -> Result<CommandOutcome, CommandError> {
    ctx.observer.notice(&Notice::Initializing);
    ctx.apply(Transition::Reset)
}
