//! Driver errors

use roomba_protocol::CommandError;

/// Failure of a driver operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OiError {
    /// No byte arrived within the per-byte read timeout
    Timeout,
    /// The robot reported a script length above 100
    ProtocolViolation { count: u8 },
    /// The command could not be encoded
    Command(CommandError),
}

impl From<CommandError> for OiError {
    fn from(e: CommandError) -> Self {
        OiError::Command(e)
    }
}

/// Outcome of a script read
///
/// `count` is what the robot reported; `stored` is how much of it fit in
/// the caller's buffer. `stored < count` means the script was truncated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScriptRead {
    pub count: u8,
    pub stored: usize,
}

impl ScriptRead {
    pub fn is_truncated(&self) -> bool {
        self.stored < usize::from(self.count)
    }
}
