use std::io::Write;
use std::os::unix::net::UnixStream;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const SOCKET_PATH: &str = "/tmp/tock.sock";

/// One line of the control socket protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ControlCommand {
    /// Same as pressing the start button.
    Start,
    /// Raise the window.
    Present,
}

impl ControlCommand {
    pub fn parse_line(line: &str) -> Result<Self, strum::ParseError> {
        line.trim().parse()
    }
}

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("Failed to connect to tock at {path}: {source}. Is tock running?")]
    Connect {
        path: &'static str,
        source: std::io::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn send_command(cmd: ControlCommand) -> Result<(), ControlError> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|source| ControlError::Connect {
        path: SOCKET_PATH,
        source,
    })?;

    writeln!(stream, "{}", cmd)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        let cases = vec![
            ("start", ControlCommand::Start),
            ("START", ControlCommand::Start),
            ("  Start\n", ControlCommand::Start),
            ("present", ControlCommand::Present),
        ];

        for (line, expected) in cases {
            assert_eq!(ControlCommand::parse_line(line).unwrap(), expected);
        }
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        assert!(ControlCommand::parse_line("stop").is_err());
        assert!(ControlCommand::parse_line("").is_err());
    }

    #[test]
    fn test_commands_round_trip_through_display() {
        for cmd in [ControlCommand::Start, ControlCommand::Present] {
            assert_eq!(ControlCommand::parse_line(&cmd.to_string()).unwrap(), cmd);
        }
    }
}
