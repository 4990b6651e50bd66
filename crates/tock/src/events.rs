use ticker::control::ControlCommand;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Start,
    Present,
    ConfigReload,
}

impl From<ControlCommand> for AppEvent {
    fn from(cmd: ControlCommand) -> Self {
        match cmd {
            ControlCommand::Start => AppEvent::Start,
            ControlCommand::Present => AppEvent::Present,
        }
    }
}

/// Requests handled by the countdown service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownRequest {
    Start,
}
