//! Membership and ownership rules.
//!
//! Every mutating use case consults this module before touching storage.
//! The predicates are pure; the `ensure_*` helpers turn a refusal into a
//! `forbidden` domain error and log it.

use tracing::warn;

use super::{Error, Project, Ticket, UserId};

/// Project-scoped actions gated by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    AddMember,
    UpdateProject,
    DeleteProject,
    CreateTicket,
    ModifyTicket,
    MoveTicket,
}

impl ProjectAction {
    fn refusal(self) -> &'static str {
        match self {
            Self::AddMember => "only the project owner can add members",
            Self::UpdateProject => "only project members can update this project",
            Self::DeleteProject => "only the project owner can delete this project",
            Self::CreateTicket => "only project members can create tickets",
            Self::ModifyTicket => "only project members can modify this ticket",
            Self::MoveTicket => "only members of the target project can move tickets into it",
        }
    }
}

pub fn is_member(project: &Project, user: &UserId) -> bool {
    project.members().contains(user)
}

pub fn is_owner(project: &Project, user: &UserId) -> bool {
    project.owner() == user
}

pub fn ensure_member(project: &Project, user: &UserId, action: ProjectAction) -> Result<(), Error> {
    if is_member(project, user) {
        return Ok(());
    }
    Err(refuse(project, user, action))
}

pub fn ensure_owner(project: &Project, user: &UserId, action: ProjectAction) -> Result<(), Error> {
    if is_owner(project, user) {
        return Ok(());
    }
    Err(refuse(project, user, action))
}

/// Gate a change to an existing ticket.
///
/// `project` is the ticket's current project, or `None` when that project
/// was deleted. Orphaned tickets stay editable by their creator only.
pub fn ensure_can_modify_ticket(
    ticket: &Ticket,
    project: Option<&Project>,
    user: &UserId,
) -> Result<(), Error> {
    match project {
        Some(project) => ensure_member(project, user, ProjectAction::ModifyTicket),
        None if ticket.created_by() == user => Ok(()),
        None => {
            warn!(
                ticket_id = %ticket.id(),
                user_id = %user,
                "refused change to orphaned ticket"
            );
            Err(Error::forbidden(
                "only the creator can modify a ticket whose project was deleted",
            ))
        }
    }
}

fn refuse(project: &Project, user: &UserId, action: ProjectAction) -> Error {
    warn!(
        project_id = %project.id(),
        user_id = %user,
        ?action,
        "policy refused project action"
    );
    Error::forbidden(action.refusal())
}
