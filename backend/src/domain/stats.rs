//! Workspace statistics scoped to one identity's memberships.

use super::TicketStatus;

/// Per-status ticket tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub todo: u64,
    pub in_progress: u64,
    pub done: u64,
}

impl StatusCounts {
    pub fn record(&mut self, status: TicketStatus) {
        match status {
            TicketStatus::Todo => self.todo += 1,
            TicketStatus::InProgress => self.in_progress += 1,
            TicketStatus::Done => self.done += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.todo + self.in_progress + self.done
    }
}

/// Snapshot of the projects an identity belongs to and their tickets.
///
/// ## Invariants
/// - `tickets() == todo + in_progress + done`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkspaceStats {
    projects: u64,
    counts: StatusCounts,
}

impl WorkspaceStats {
    pub fn new(projects: u64, counts: StatusCounts) -> Self {
        Self { projects, counts }
    }

    pub fn projects(&self) -> u64 {
        self.projects
    }

    pub fn tickets(&self) -> u64 {
        self.counts.total()
    }

    pub fn todo(&self) -> u64 {
        self.counts.todo
    }

    pub fn in_progress(&self) -> u64 {
        self.counts.in_progress
    }

    pub fn done(&self) -> u64 {
        self.counts.done
    }
}
