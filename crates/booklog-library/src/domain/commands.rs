//! Commands for the Reading Log context.

use booklog_core::command::Command;
use uuid::Uuid;

use super::book::BookCandidate;

/// Command to validate and save a finished book.
#[derive(Debug, Clone)]
pub struct SaveBook {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The raw book input.
    pub candidate: BookCandidate,
}

/// Command to reset the totals and empty the book list.
#[derive(Debug, Clone)]
pub struct ClearReadingLog {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for SaveBook {
    fn command_type(&self) -> &'static str {
        "reading_log.save_book"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

impl Command for ClearReadingLog {
    fn command_type(&self) -> &'static str {
        "reading_log.clear"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
