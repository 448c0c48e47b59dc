//! Ticket use cases.
//!
//! Creation, updates and deletion are all gated by the membership policy.
//! Moving a ticket additionally requires membership of the target project.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::policy::{self, ProjectAction};
use crate::domain::ports::{
    CreateTicketRequest, ProjectRepository, ProjectSummary, TicketCommand, TicketDetail,
    TicketQuery, TicketRepository, TicketView, UserRepository,
};
use crate::domain::{
    Error, Project, ProjectId, Ticket, TicketDraft, TicketFilter, TicketId, TicketPatch,
    TicketStatus, User, UserId, UserProfile,
};

#[derive(Clone)]
pub struct TicketService<T, P, U> {
    tickets: Arc<T>,
    projects: Arc<P>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<T, P, U> TicketService<T, P, U> {
    pub fn new(tickets: Arc<T>, projects: Arc<P>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tickets,
            projects,
            users,
            clock,
        }
    }
}

fn profile_of(users: &[User], id: Option<&UserId>) -> Option<UserProfile> {
    let id = id?;
    users.iter().find(|user| user.id() == id).map(User::profile)
}

impl<T, P, U> TicketService<T, P, U>
where
    T: TicketRepository,
    P: ProjectRepository,
    U: UserRepository,
{
    async fn load_ticket(&self, id: &TicketId) -> Result<Ticket, Error> {
        self.tickets
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("ticket {id} not found")))
    }

    async fn load_project(&self, id: &ProjectId) -> Result<Project, Error> {
        self.projects
            .find_by_id(id)
            .await?
            .ok_or_else(|| Error::not_found(format!("project {id} not found")))
    }

    async fn ensure_user_exists(&self, id: &UserId) -> Result<(), Error> {
        match self.users.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(Error::not_found(format!("assignee {id} not found"))),
        }
    }

    /// Resolve the accounts referenced by `tickets` with a single lookup.
    async fn views(&self, tickets: Vec<Ticket>) -> Result<Vec<TicketView>, Error> {
        let mut ids: Vec<UserId> = tickets
            .iter()
            .flat_map(|ticket| {
                std::iter::once(*ticket.created_by()).chain(ticket.assignee().copied())
            })
            .collect();
        ids.sort_unstable();
        ids.dedup();
        let users = if ids.is_empty() {
            Vec::new()
        } else {
            self.users.find_many(&ids).await?
        };
        Ok(tickets
            .into_iter()
            .map(|ticket| TicketView {
                assignee: profile_of(&users, ticket.assignee()),
                created_by: profile_of(&users, Some(ticket.created_by())),
                ticket,
            })
            .collect())
    }

    async fn view(&self, ticket: Ticket) -> Result<TicketView, Error> {
        self.views(vec![ticket])
            .await?
            .pop()
            .ok_or_else(|| Error::internal("ticket projection was not produced"))
    }

    /// Load the ticket and confirm `caller` may change it.
    async fn authorize_change(&self, caller: &UserId, id: &TicketId) -> Result<Ticket, Error> {
        let ticket = self.load_ticket(id).await?;
        let project = self.projects.find_by_id(ticket.project()).await?;
        policy::ensure_can_modify_ticket(&ticket, project.as_ref(), caller)?;
        Ok(ticket)
    }
}

#[async_trait]
impl<T, P, U> TicketCommand for TicketService<T, P, U>
where
    T: TicketRepository,
    P: ProjectRepository,
    U: UserRepository,
{
    async fn create(
        &self,
        caller: &UserId,
        request: CreateTicketRequest,
    ) -> Result<TicketView, Error> {
        let project = self.load_project(&request.project).await?;
        policy::ensure_member(&project, caller, ProjectAction::CreateTicket)?;
        if let Some(assignee) = &request.assignee {
            self.ensure_user_exists(assignee).await?;
        }
        let ticket = Ticket::from(TicketDraft {
            id: TicketId::random(),
            title: request.title,
            description: request.description,
            priority: request.priority,
            status: TicketStatus::Todo,
            project: request.project,
            assignee: request.assignee,
            created_by: *caller,
            created_at: self.clock.utc(),
        });
        self.tickets.save(&ticket).await?;
        info!(ticket_id = %ticket.id(), project_id = %project.id(), "ticket created");
        self.view(ticket).await
    }

    async fn update(
        &self,
        caller: &UserId,
        id: &TicketId,
        patch: TicketPatch,
    ) -> Result<TicketView, Error> {
        let mut ticket = self.authorize_change(caller, id).await?;
        if let Some(target) = patch.moves_to().filter(|target| *target != ticket.project()) {
            let target = self.load_project(target).await?;
            policy::ensure_member(&target, caller, ProjectAction::MoveTicket)?;
        }
        if let Some(assignee) = patch.assigns() {
            self.ensure_user_exists(assignee).await?;
        }
        if !patch.is_empty() {
            ticket.apply(patch);
            self.tickets.save(&ticket).await?;
            info!(
                ticket_id = %ticket.id(),
                status = %ticket.status(),
                project_id = %ticket.project(),
                "ticket updated"
            );
        }
        self.view(ticket).await
    }

    async fn delete(&self, caller: &UserId, id: &TicketId) -> Result<(), Error> {
        self.authorize_change(caller, id).await?;
        if !self.tickets.delete(id).await? {
            return Err(Error::not_found(format!("ticket {id} not found")));
        }
        info!(ticket_id = %id, "ticket deleted");
        Ok(())
    }
}

#[async_trait]
impl<T, P, U> TicketQuery for TicketService<T, P, U>
where
    T: TicketRepository,
    P: ProjectRepository,
    U: UserRepository,
{
    async fn list_by_project(
        &self,
        project: &ProjectId,
        filter: &TicketFilter,
    ) -> Result<Vec<TicketView>, Error> {
        let tickets = self.tickets.list_by_project(project).await?;
        let matching = tickets
            .into_iter()
            .filter(|ticket| filter.matches(ticket))
            .collect();
        self.views(matching).await
    }

    async fn get_by_id(&self, id: &TicketId) -> Result<TicketDetail, Error> {
        let ticket = self.load_ticket(id).await?;
        let project = self
            .projects
            .find_by_id(ticket.project())
            .await?
            .map(|project| ProjectSummary {
                id: *project.id(),
                name: project.name().clone(),
            });
        let view = self.view(ticket).await?;
        Ok(TicketDetail { view, project })
    }
}

#[cfg(test)]
#[path = "ticket_service_tests.rs"]
mod tests;
