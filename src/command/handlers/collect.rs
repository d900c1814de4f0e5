//! Data collection command handler

use super::HandlerContext;
use crate::command::{CommandError, CommandOutcome};
use satellite_shared::{Notice, PanelState, Rejection, Transition};

/// Handle COLLECT_DATA
///
/// Fails with a precondition rejection while the panels are inactive.
pub async fn handle_collect_data(
    ctx: &mut HandlerContext<'_>,
) -> Result<CommandOutcome, CommandError> {
    if ctx.satellite.panels() != PanelState::Active {
        return Err(Rejection::PanelsInactive.into());
    }

    ctx.observer.notice(&Notice::Collecting);
    ctx.apply(Transition::Collect)
}
