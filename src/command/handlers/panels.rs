//! Solar panel command handlers (activate, deactivate)

use super::HandlerContext;
use crate::command::{CommandError, CommandOutcome};
use satellite_shared::{Notice, PanelState, Transition};

/// Handle ACTIVATE_PANELS
pub async fn handle_activate_panels(
    ctx: &mut HandlerContext<'_>,
) -> Result<CommandOutcome, CommandError> {
    drive(ctx, PanelState::Active).await
}

/// Handle DEACTIVATE_PANELS
pub async fn handle_deactivate_panels(
    ctx: &mut HandlerContext<'_>,
) -> Result<CommandOutcome, CommandError> {
    drive(ctx, PanelState::Inactive).await
}

async fn drive(
    ctx: &mut HandlerContext<'_>,
    state: PanelState,
) -> Result<CommandOutcome, CommandError> {
    ctx.observer.notice(&Notice::DrivingPanels { state });
    ctx.actuator.drive_panels(state).await?;
    ctx.apply(Transition::SetPanels(state))
}
