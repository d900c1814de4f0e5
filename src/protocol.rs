//! Console token protocol
//!
//! Maps one line of operator input onto a command or a console action.

use crate::command::SatelliteCommand;

/// Help text listing the accepted tokens
pub const USAGE: &str = "rotate(<direction>)/activate/deactivate/collect/initialize/history/exit";

/// One parsed line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(SatelliteCommand),
    /// Print the command history
    History,
    Exit,
    Unrecognized(String),
}

/// Parse a line of input; surrounding whitespace is ignored
pub fn parse_input(line: &str) -> Input {
    let token = line.trim();

    match token {
        "exit" => Input::Exit,
        "history" => Input::History,
        "initialize" => Input::Command(SatelliteCommand::Initialize),
        "activate" => Input::Command(SatelliteCommand::ActivatePanels),
        "deactivate" => Input::Command(SatelliteCommand::DeactivatePanels),
        "collect" => Input::Command(SatelliteCommand::CollectData),
        _ => match rotate_target(token) {
            // Direction is validated by the command itself
            Some(target) => Input::Command(SatelliteCommand::rotate(target)),
            None => Input::Unrecognized(token.to_string()),
        },
    }
}

fn rotate_target(token: &str) -> Option<&str> {
    token.strip_prefix("rotate(")?.strip_suffix(')')
}
