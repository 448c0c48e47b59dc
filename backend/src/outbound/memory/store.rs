//! Single-lock in-memory implementation of every persistence port.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{
    CommentRepository, CommentRepositoryError, ProjectRepository, ProjectRepositoryError,
    TicketRepository, TicketRepositoryError, UserPersistenceError, UserRepository,
    WorkspaceStatsRepository, WorkspaceStatsRepositoryError,
};
use crate::domain::{
    Comment, EmailAddress, Project, ProjectId, ProjectPatch, StatusCounts, Ticket, TicketId, User,
    UserId, WorkspaceStats,
};

/// Row wrapper recording insertion order for stable tie-breaks.
#[derive(Debug, Clone)]
struct Stored<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Default)]
struct Tables {
    next_seq: u64,
    users: HashMap<UserId, User>,
    projects: HashMap<ProjectId, Stored<Project>>,
    tickets: HashMap<TicketId, Stored<Ticket>>,
    comments: Vec<Stored<Comment>>,
}

impl Tables {
    fn next_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// Shared in-memory store. Cheap to wrap in an `Arc` and hand to every service.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_by_creation<T, K: Ord>(mut rows: Vec<&Stored<T>>, key: impl Fn(&T) -> K) -> Vec<T>
where
    T: Clone,
{
    rows.sort_by(|a, b| key(&a.value).cmp(&key(&b.value)).then(a.seq.cmp(&b.seq)));
    rows.into_iter().map(|row| row.value.clone()).collect()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_str()));
        }
        tables.users.insert(*user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(user.id()) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(UserPersistenceError::query(format!(
                "user {} does not exist",
                user.id()
            ))),
        }
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email() == email).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let tables = self.tables.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn list_except(&self, excluded: &UserId) -> Result<Vec<User>, UserPersistenceError> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables
            .users
            .values()
            .filter(|u| u.id() != excluded)
            .cloned()
            .collect();
        users.sort_by(|a, b| {
            a.display_name()
                .as_str()
                .cmp(b.display_name().as_str())
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(users)
    }
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn insert(&self, project: &Project) -> Result<(), ProjectRepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.projects.contains_key(project.id()) {
            return Err(ProjectRepositoryError::query(format!(
                "project {} already exists",
                project.id()
            )));
        }
        let seq = tables.next_seq();
        tables.projects.insert(
            *project.id(),
            Stored {
                seq,
                value: project.clone(),
            },
        );
        Ok(())
    }

    async fn add_member(
        &self,
        project: &ProjectId,
        member: &UserId,
    ) -> Result<bool, ProjectRepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.projects.get_mut(project) else {
            return Ok(false);
        };
        row.value.add_member(*member);
        Ok(true)
    }

    async fn update_details(
        &self,
        project: &ProjectId,
        patch: &ProjectPatch,
    ) -> Result<bool, ProjectRepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(row) = tables.projects.get_mut(project) else {
            return Ok(false);
        };
        row.value.apply(patch.clone());
        Ok(true)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.projects.get(id).map(|row| row.value.clone()))
    }

    async fn list_for_member(
        &self,
        member: &UserId,
    ) -> Result<Vec<Project>, ProjectRepositoryError> {
        let tables = self.tables.read().await;
        let rows = tables
            .projects
            .values()
            .filter(|row| row.value.members().contains(member))
            .collect();
        Ok(sorted_by_creation(rows, Project::created_at))
    }

    async fn delete(&self, id: &ProjectId) -> Result<bool, ProjectRepositoryError> {
        Ok(self.tables.write().await.projects.remove(id).is_some())
    }
}

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn save(&self, ticket: &Ticket) -> Result<(), TicketRepositoryError> {
        let mut tables = self.tables.write().await;
        let seq = match tables.tickets.get(ticket.id()) {
            Some(existing) => existing.seq,
            None => tables.next_seq(),
        };
        tables.tickets.insert(
            *ticket.id(),
            Stored {
                seq,
                value: ticket.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, TicketRepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.tickets.get(id).map(|row| row.value.clone()))
    }

    async fn list_by_project(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<Ticket>, TicketRepositoryError> {
        let tables = self.tables.read().await;
        let rows = tables
            .tickets
            .values()
            .filter(|row| row.value.project() == project)
            .collect();
        Ok(sorted_by_creation(rows, Ticket::created_at))
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, TicketRepositoryError> {
        Ok(self.tables.write().await.tickets.remove(id).is_some())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn insert(&self, comment: &Comment) -> Result<(), CommentRepositoryError> {
        let mut tables = self.tables.write().await;
        let seq = tables.next_seq();
        tables.comments.push(Stored {
            seq,
            value: comment.clone(),
        });
        Ok(())
    }

    async fn list_by_ticket(
        &self,
        ticket: &TicketId,
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let tables = self.tables.read().await;
        let rows = tables
            .comments
            .iter()
            .filter(|row| row.value.ticket == *ticket)
            .collect();
        Ok(sorted_by_creation(rows, |comment: &Comment| comment.created_at))
    }
}

#[async_trait]
impl WorkspaceStatsRepository for InMemoryStore {
    async fn snapshot_for_member(
        &self,
        member: &UserId,
    ) -> Result<WorkspaceStats, WorkspaceStatsRepositoryError> {
        let tables = self.tables.read().await;
        let projects: Vec<&ProjectId> = tables
            .projects
            .values()
            .filter(|row| row.value.members().contains(member))
            .map(|row| row.value.id())
            .collect();
        let mut counts = StatusCounts::default();
        for row in tables.tickets.values() {
            if projects.contains(&row.value.project()) {
                counts.record(row.value.status());
            }
        }
        let project_count = u64::try_from(projects.len()).unwrap_or(u64::MAX);
        Ok(WorkspaceStats::new(project_count, counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{fixture_timestamp, project_owned_by, ticket_in, user};
    use crate::domain::{CommentId, CommentText, TicketPatch, TicketStatus};
    use chrono::Duration;
    use rstest::{fixture, rstest};

    #[fixture]
    fn store() -> InMemoryStore {
        InMemoryStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_emails_are_rejected(store: InMemoryStore) {
        let ada = user("Ada");
        UserRepository::insert(&store, &ada).await.expect("first insert");
        let twin = User::new(
            UserId::random(),
            ada.display_name().clone(),
            ada.email().clone(),
            ada.password().clone(),
            ada.created_at(),
        );
        let err = UserRepository::insert(&store, &twin).await.expect_err("duplicate");
        assert_eq!(err, UserPersistenceError::duplicate_email("ada@example.com"));
    }

    #[rstest]
    #[tokio::test]
    async fn list_except_orders_by_name(store: InMemoryStore) {
        let (ada, chen, brian) = (user("Ada"), user("Chen"), user("Brian"));
        for u in [&ada, &chen, &brian] {
            UserRepository::insert(&store, u).await.expect("insert");
        }
        let listed = store.list_except(ada.id()).await.expect("list");
        let names: Vec<_> = listed.iter().map(|u| u.display_name().as_str()).collect();
        assert_eq!(names, ["Brian", "Chen"]);
    }

    #[rstest]
    #[tokio::test]
    async fn comments_with_equal_timestamps_keep_insertion_order(store: InMemoryStore) {
        let ticket = TicketId::random();
        let author = UserId::random();
        for text in ["one", "two", "three"] {
            let comment = Comment {
                id: CommentId::random(),
                ticket,
                author,
                text: CommentText::new(text).expect("valid"),
                created_at: fixture_timestamp(),
            };
            CommentRepository::insert(&store, &comment).await.expect("insert");
        }
        let earlier = Comment {
            id: CommentId::random(),
            ticket,
            author,
            text: CommentText::new("zero").expect("valid"),
            created_at: fixture_timestamp() - Duration::seconds(1),
        };
        CommentRepository::insert(&store, &earlier).await.expect("insert");

        let listed = store.list_by_ticket(&ticket).await.expect("list");
        let texts: Vec<_> = listed.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["zero", "one", "two", "three"]);
    }

    #[rstest]
    #[tokio::test]
    async fn stats_skip_orphaned_and_foreign_tickets(store: InMemoryStore) {
        let ada = user("Ada");
        let alpha = project_owned_by(ada.id(), "Alpha");
        let beta = project_owned_by(ada.id(), "Beta");
        let foreign = project_owned_by(&UserId::random(), "Foreign");
        for project in [&alpha, &beta, &foreign] {
            ProjectRepository::insert(&store, project).await.expect("insert");
        }
        let mut done = ticket_in(alpha.id(), ada.id(), "Done");
        done.apply(TicketPatch {
            status: Some(TicketStatus::Done),
            ..TicketPatch::default()
        });
        for ticket in [
            ticket_in(alpha.id(), ada.id(), "Todo"),
            done,
            ticket_in(beta.id(), ada.id(), "Orphan"),
            ticket_in(foreign.id(), ada.id(), "Elsewhere"),
        ] {
            TicketRepository::save(&store, &ticket).await.expect("save");
        }
        assert!(ProjectRepository::delete(&store, beta.id()).await.expect("delete"));

        let stats = store.snapshot_for_member(ada.id()).await.expect("stats");
        assert_eq!(stats.projects(), 1);
        assert_eq!(stats.tickets(), 2);
        assert_eq!((stats.todo(), stats.done()), (1, 1));
    }

    #[rstest]
    #[tokio::test]
    async fn member_and_detail_writes_keep_listing_order(store: InMemoryStore) {
        let ada = user("Ada");
        let first = project_owned_by(ada.id(), "First");
        let second = project_owned_by(ada.id(), "Second");
        ProjectRepository::insert(&store, &first).await.expect("insert");
        ProjectRepository::insert(&store, &second).await.expect("insert");
        let patch = ProjectPatch::from_raw(None, Some("Shipping")).expect("valid patch");
        assert!(store.update_details(first.id(), &patch).await.expect("update"));
        let added = store.add_member(second.id(), &UserId::random()).await;
        assert!(added.expect("add member"));

        let listed = store.list_for_member(ada.id()).await.expect("list");
        let names: Vec<_> = listed.iter().map(|p| p.name().as_str()).collect();
        assert_eq!(names, ["First", "Second"]);
        assert_eq!(listed[0].description().as_str(), "Shipping");
        assert_eq!(listed[1].members().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn targeted_writes_report_missing_projects(store: InMemoryStore) {
        let missing = ProjectId::random();
        let patch = ProjectPatch::from_raw(Some("Renamed"), None).expect("valid patch");

        let added = store.add_member(&missing, &UserId::random()).await;
        assert!(!added.expect("add member"));
        assert!(!store.update_details(&missing, &patch).await.expect("update"));
    }

    #[rstest]
    #[tokio::test]
    async fn inserting_a_project_twice_is_rejected(store: InMemoryStore) {
        let project = project_owned_by(&UserId::random(), "Alpha");
        ProjectRepository::insert(&store, &project).await.expect("insert");

        let err = ProjectRepository::insert(&store, &project)
            .await
            .expect_err("duplicate id");

        assert!(matches!(err, ProjectRepositoryError::Query { .. }));
    }
}
