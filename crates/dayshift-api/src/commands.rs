//! Player and lifecycle commands accepted by the runner

use dayshift_util::DayshiftError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Commands the runner feeds into a session (or into the session lifecycle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerCommand {
    /// The typing minigame finished an email
    SendEmail,
    /// Start holding the charger button
    ChargePress,
    /// Let go of the charger button
    ChargeRelease,
    /// Toggle between laptop and room zoom
    ToggleZoom,
    /// Print the current session snapshot
    Status,
    /// Tear down the session and start a fresh one
    Restart,
    /// Tear down the session and go back to the menu
    ReturnToMenu,
    /// Start a session from the menu
    Start,
    /// Exit the runner
    Quit,
}

impl PlayerCommand {
    /// Commands that only make sense while a session exists
    pub fn needs_session(&self) -> bool {
        matches!(
            self,
            PlayerCommand::SendEmail
                | PlayerCommand::ChargePress
                | PlayerCommand::ChargeRelease
                | PlayerCommand::ToggleZoom
                | PlayerCommand::Status
        )
    }
}

impl FromStr for PlayerCommand {
    type Err = DayshiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "send" | "s" => Ok(PlayerCommand::SendEmail),
            "charge" | "c" => Ok(PlayerCommand::ChargePress),
            "release" | "r" => Ok(PlayerCommand::ChargeRelease),
            "zoom" | "z" => Ok(PlayerCommand::ToggleZoom),
            "status" | "?" => Ok(PlayerCommand::Status),
            "restart" => Ok(PlayerCommand::Restart),
            "menu" => Ok(PlayerCommand::ReturnToMenu),
            "start" | "play" => Ok(PlayerCommand::Start),
            "quit" | "exit" | "q" => Ok(PlayerCommand::Quit),
            "" => Err(DayshiftError::invalid_argument("empty command")),
            other => Err(DayshiftError::unknown_command(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!("send".parse::<PlayerCommand>().unwrap(), PlayerCommand::SendEmail);
        assert_eq!(" CHARGE \n".parse::<PlayerCommand>().unwrap(), PlayerCommand::ChargePress);
        assert_eq!("r".parse::<PlayerCommand>().unwrap(), PlayerCommand::ChargeRelease);
        assert_eq!("menu".parse::<PlayerCommand>().unwrap(), PlayerCommand::ReturnToMenu);
    }

    #[test]
    fn reject_unknown_and_empty() {
        assert!(matches!(
            "dance".parse::<PlayerCommand>(),
            Err(DayshiftError::UnknownCommand(cmd)) if cmd == "dance"
        ));
        assert!(matches!(
            "   ".parse::<PlayerCommand>(),
            Err(DayshiftError::InvalidArgument(_))
        ));
    }

    #[test]
    fn lifecycle_commands_do_not_need_session() {
        assert!(PlayerCommand::SendEmail.needs_session());
        assert!(!PlayerCommand::Start.needs_session());
        assert!(!PlayerCommand::Restart.needs_session());
        assert!(!PlayerCommand::Quit.needs_session());
    }
}
