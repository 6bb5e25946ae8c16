//! Commands that change the reading log, and the metadata they carry into logs.

use std::fmt;

use uuid::Uuid;

/// Trait implemented by every request that writes to the store.
pub trait Command: Send + Sync + fmt::Debug {
    /// Dotted name of the command, e.g. `reading_log.save_book`.
    fn command_type(&self) -> &'static str;

    /// Correlation ID to trace this command through the system.
    fn correlation_id(&self) -> Uuid;

    /// Name and correlation ID bundled for a single log field.
    fn meta(&self) -> CommandMeta {
        CommandMeta {
            command_type: self.command_type(),
            correlation_id: self.correlation_id(),
        }
    }
}

/// Identifying metadata of one command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandMeta {
    /// See [`Command::command_type`].
    pub command_type: &'static str,
    /// See [`Command::correlation_id`].
    pub correlation_id: Uuid,
}

impl fmt::Display for CommandMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.command_type, self.correlation_id)
    }
}
