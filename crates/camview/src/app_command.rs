use crate::AppError;

use camview_core::Recording;

use std::{panic::Location, str::FromStr};

use error_location::ErrorLocation;

/// Operator commands read line by line from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// List the recordings the server offers.
    List,
    /// Select a recording, replacing any current session.
    Select {
        /// Recording to play.
        recording: Recording,
    },
    /// Start playback of the selected recording.
    Play,
    /// Pause playback.
    Pause,
    /// Close the current session.
    Close,
    /// Print the session state.
    Status,
    /// Request application shutdown.
    Quit,
}

impl FromStr for AppCommand {
    type Err = AppError;

    #[track_caller]
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "list" | "ls" => AppCommand::List,
            "select" | "open" => {
                if rest.is_empty() {
                    return Err(AppError::InvalidCommand {
                        reason: "select needs a recording name".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }
                AppCommand::Select {
                    recording: Recording::new(rest),
                }
            }
            "play" => AppCommand::Play,
            "pause" => AppCommand::Pause,
            "close" => AppCommand::Close,
            "status" => AppCommand::Status,
            "quit" | "exit" => AppCommand::Quit,
            "" => {
                return Err(AppError::InvalidCommand {
                    reason: "empty command".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            other => {
                return Err(AppError::InvalidCommand {
                    reason: format!("unknown command '{}'", other),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        if !rest.is_empty() && !matches!(command, AppCommand::Select { .. }) {
            return Err(AppError::InvalidCommand {
                reason: format!("'{}' takes no arguments", verb),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(command)
    }
}
