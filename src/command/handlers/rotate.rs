//! Rotate command handler

use super::HandlerContext;
use crate::command::{CommandError, CommandOutcome};
use satellite_shared::{Direction, Notice, Transition};

/// Handle ROTATE towards the caller-supplied `target` token
pub async fn handle_rotate(
    ctx: &mut HandlerContext<'_>,
    target: &str,
) -> Result<CommandOutcome, CommandError> {
    let direction: Direction = target
        .parse()
        .map_err(|_| CommandError::InvalidDirection {
            direction: target.to_string(),
        })?;

    if ctx.satellite.orientation() == direction {
        ctx.observer.notice(&Notice::AlreadyOriented { direction });
        return Ok(CommandOutcome::Unchanged);
    }

    ctx.observer.notice(&Notice::Rotating { direction });
    ctx.actuator.slew(direction).await?;

    ctx.apply(Transition::Rotate(direction))
}
