//! JSON response bodies shared across handlers.
//!
//! Every referenced identity is embedded as a [`UserBody`] display projection
//! rather than a bare id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{CommentView, ProjectSummary, ProjectView, TicketDetail, TicketView};
use crate::domain::{UserProfile, WorkspaceStats};

/// Display projection of an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
}

impl From<UserProfile> for UserBody {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.display_name.as_str().to_owned(),
            email: profile.email.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBody {
    pub id: String,
    #[schema(example = "Alpha")]
    pub name: String,
    pub description: String,
    /// Resolved owner; `null` only if the account has vanished.
    pub owner: Option<UserBody>,
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProjectView> for ProjectBody {
    fn from(view: ProjectView) -> Self {
        let ProjectView { project, owner } = view;
        Self {
            id: project.id().to_string(),
            name: project.name().as_str().to_owned(),
            description: project.description().as_str().to_owned(),
            owner: owner.map(UserBody::from),
            members: project.members().iter().map(ToString::to_string).collect(),
            created_at: project.created_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketBody {
    pub id: String,
    #[schema(example = "Crash when saving")]
    pub title: String,
    pub description: String,
    #[schema(example = "medium")]
    pub priority: String,
    #[schema(example = "todo")]
    pub status: String,
    pub project_id: String,
    pub assignee: Option<UserBody>,
    pub created_by: Option<UserBody>,
    pub created_at: DateTime<Utc>,
}

impl From<TicketView> for TicketBody {
    fn from(view: TicketView) -> Self {
        let TicketView {
            ticket,
            assignee,
            created_by,
        } = view;
        Self {
            id: ticket.id().to_string(),
            title: ticket.title().as_str().to_owned(),
            description: ticket.description().as_str().to_owned(),
            priority: ticket.priority().as_str().to_owned(),
            status: ticket.status().as_str().to_owned(),
            project_id: ticket.project().to_string(),
            assignee: assignee.map(UserBody::from),
            created_by: created_by.map(UserBody::from),
            created_at: ticket.created_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummaryBody {
    pub id: String,
    pub name: String,
}

impl From<ProjectSummary> for ProjectSummaryBody {
    fn from(summary: ProjectSummary) -> Self {
        Self {
            id: summary.id.to_string(),
            name: summary.name.as_str().to_owned(),
        }
    }
}

/// A ticket plus its project's name; `project` is `null` once orphaned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetailBody {
    #[serde(flatten)]
    pub ticket: TicketBody,
    pub project: Option<ProjectSummaryBody>,
}

impl From<TicketDetail> for TicketDetailBody {
    fn from(detail: TicketDetail) -> Self {
        Self {
            ticket: detail.view.into(),
            project: detail.project.map(ProjectSummaryBody::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentBody {
    pub id: String,
    pub ticket_id: String,
    #[schema(example = "Looks good")]
    pub text: String,
    pub user: Option<UserBody>,
    pub created_at: DateTime<Utc>,
}

impl From<CommentView> for CommentBody {
    fn from(view: CommentView) -> Self {
        let CommentView { comment, author } = view;
        Self {
            id: comment.id.to_string(),
            ticket_id: comment.ticket.to_string(),
            text: comment.text.as_str().to_owned(),
            user: author.map(UserBody::from),
            created_at: comment.created_at,
        }
    }
}

/// Workspace counters; `tickets == todo + inProgress + done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsBody {
    pub projects: u64,
    pub tickets: u64,
    pub todo: u64,
    pub in_progress: u64,
    pub done: u64,
}

impl From<WorkspaceStats> for StatsBody {
    fn from(stats: WorkspaceStats) -> Self {
        Self {
            projects: stats.projects(),
            tickets: stats.tickets(),
            todo: stats.todo(),
            in_progress: stats.in_progress(),
            done: stats.done(),
        }
    }
}
