//! Ticket aggregate and its workflow values.
//!
//! Status changes are unconstrained: any status may be assigned from any
//! other, which lets a board move cards between arbitrary columns.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::{ProjectId, TicketId, UserId};

pub const TICKET_TITLE_MAX: usize = 200;
pub const TICKET_DESCRIPTION_MAX: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketValidationError {
    #[error("ticket title must not be empty")]
    EmptyTitle,
    #[error("ticket title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("ticket description must be at most {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("priority must be one of low, medium, high")]
    UnknownPriority,
    #[error("status must be one of todo, in-progress, done")]
    UnknownStatus,
}

impl TicketValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle | Self::TitleTooLong { .. } => "title",
            Self::DescriptionTooLong { .. } => "description",
            Self::UnknownPriority => "priority",
            Self::UnknownStatus => "status",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TicketPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for TicketPriority {
    type Err = TicketValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(TicketValidationError::UnknownPriority),
        }
    }
}

impl fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TicketStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TicketStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }
}

impl FromStr for TicketStatus {
    type Err = TicketValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Self::Todo),
            "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(TicketValidationError::UnknownStatus),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trimmed, non-empty ticket title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketTitle(String);

impl TicketTitle {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TicketValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TicketValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TICKET_TITLE_MAX {
            return Err(TicketValidationError::TitleTooLong {
                max: TICKET_TITLE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketDescription(String);

impl TicketDescription {
    pub fn new(raw: impl Into<String>) -> Result<Self, TicketValidationError> {
        let raw = raw.into();
        if raw.chars().count() > TICKET_DESCRIPTION_MAX {
            return Err(TicketValidationError::DescriptionTooLong {
                max: TICKET_DESCRIPTION_MAX,
            });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fields of a ticket, used both for creation and for rebuilding stored rows.
#[derive(Debug, Clone)]
pub struct TicketDraft {
    pub id: TicketId,
    pub title: TicketTitle,
    pub description: TicketDescription,
    pub priority: TicketPriority,
    pub status: TicketStatus,
    pub project: ProjectId,
    pub assignee: Option<UserId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// A unit of work inside a project.
///
/// The project reference may dangle once its project is deleted; such a
/// ticket is "orphaned" but otherwise intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: TicketId,
    title: TicketTitle,
    description: TicketDescription,
    priority: TicketPriority,
    status: TicketStatus,
    project: ProjectId,
    assignee: Option<UserId>,
    created_by: UserId,
    created_at: DateTime<Utc>,
}

impl From<TicketDraft> for Ticket {
    fn from(draft: TicketDraft) -> Self {
        Self {
            id: draft.id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: draft.status,
            project: draft.project,
            assignee: draft.assignee,
            created_by: draft.created_by,
            created_at: draft.created_at,
        }
    }
}

impl Ticket {
    pub fn id(&self) -> &TicketId {
        &self.id
    }

    pub fn title(&self) -> &TicketTitle {
        &self.title
    }

    pub fn description(&self) -> &TicketDescription {
        &self.description
    }

    pub fn priority(&self) -> TicketPriority {
        self.priority
    }

    pub fn status(&self) -> TicketStatus {
        self.status
    }

    pub fn project(&self) -> &ProjectId {
        &self.project
    }

    pub fn assignee(&self) -> Option<&UserId> {
        self.assignee.as_ref()
    }

    pub fn created_by(&self) -> &UserId {
        &self.created_by
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Merge the present fields of `patch` onto the ticket.
    pub fn apply(&mut self, patch: TicketPatch) {
        let TicketPatch {
            title,
            description,
            priority,
            status,
            assignee,
            project,
        } = patch;
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(priority) = priority {
            self.priority = priority;
        }
        if let Some(status) = status {
            self.status = status;
        }
        if let Some(assignee) = assignee {
            self.assignee = assignee;
        }
        if let Some(project) = project {
            self.project = project;
        }
    }
}

/// Explicit set of ticket fields a caller may change.
///
/// `assignee` is doubly optional: `Some(None)` clears the assignee.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    pub title: Option<TicketTitle>,
    pub description: Option<TicketDescription>,
    pub priority: Option<TicketPriority>,
    pub status: Option<TicketStatus>,
    pub assignee: Option<Option<UserId>>,
    pub project: Option<ProjectId>,
}

impl TicketPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Target project when the patch moves the ticket.
    pub fn moves_to(&self) -> Option<&ProjectId> {
        self.project.as_ref()
    }

    /// Assignee being set, ignoring clears.
    pub fn assigns(&self) -> Option<&UserId> {
        self.assignee.as_ref().and_then(Option::as_ref)
    }
}

/// Optional narrowing applied when listing a project's tickets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketFilter {
    pub search: Option<String>,
    pub priority: Option<TicketPriority>,
    pub status: Option<TicketStatus>,
}

impl TicketFilter {
    /// Case-insensitive title substring plus exact priority and status.
    pub fn matches(&self, ticket: &Ticket) -> bool {
        let search_ok = self.search.as_deref().map(str::trim).is_none_or(|needle| {
            needle.is_empty()
                || ticket
                    .title
                    .as_str()
                    .to_lowercase()
                    .contains(&needle.to_lowercase())
        });
        search_ok
            && self.priority.is_none_or(|priority| ticket.priority == priority)
            && self.status.is_none_or(|status| ticket.status == status)
    }
}
