//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised with mocks or the in-memory store.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    AccountCommand, CommentCommand, CommentQuery, CommentRepository, LoginService,
    PasswordHasher, ProjectCommand, ProjectQuery, ProjectRepository, TicketCommand, TicketQuery,
    TicketRepository, UserRepository, UsersQuery, WorkspaceStatsQuery, WorkspaceStatsRepository,
};
use crate::domain::{
    AccountService, CommentService, ProjectService, TicketService, WorkspaceStatsService,
};

/// Driving ports used by the handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn UsersQuery>,
    pub projects: Arc<dyn ProjectCommand>,
    pub projects_query: Arc<dyn ProjectQuery>,
    pub tickets: Arc<dyn TicketCommand>,
    pub tickets_query: Arc<dyn TicketQuery>,
    pub comments: Arc<dyn CommentCommand>,
    pub comments_query: Arc<dyn CommentQuery>,
    pub stats: Arc<dyn WorkspaceStatsQuery>,
}

/// Driven adapters the domain services are built over.
pub struct Repositories<U, P, T, C, S> {
    pub users: Arc<U>,
    pub projects: Arc<P>,
    pub tickets: Arc<T>,
    pub comments: Arc<C>,
    pub stats: Arc<S>,
}

impl<R> Repositories<R, R, R, R, R> {
    /// Use one adapter for every repository port.
    pub fn shared(store: Arc<R>) -> Self {
        Self {
            users: Arc::clone(&store),
            projects: Arc::clone(&store),
            tickets: Arc::clone(&store),
            comments: Arc::clone(&store),
            stats: store,
        }
    }
}

impl HttpState {
    /// Wire the domain services over the given adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use bug_tracker::inbound::http::state::{HttpState, Repositories};
    /// use bug_tracker::outbound::credentials::Argon2PasswordHasher;
    /// use bug_tracker::outbound::memory::InMemoryStore;
    /// use mockable::DefaultClock;
    ///
    /// let state = HttpState::from_repositories(
    ///     Repositories::shared(Arc::new(InMemoryStore::new())),
    ///     Arc::new(Argon2PasswordHasher::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _stats = state.stats.clone();
    /// ```
    pub fn from_repositories<U, P, T, C, S>(
        repositories: Repositories<U, P, T, C, S>,
        hasher: Arc<dyn PasswordHasher>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        P: ProjectRepository + 'static,
        T: TicketRepository + 'static,
        C: CommentRepository + 'static,
        S: WorkspaceStatsRepository + 'static,
    {
        let Repositories {
            users,
            projects,
            tickets,
            comments,
            stats,
        } = repositories;

        let accounts = Arc::new(AccountService::new(
            Arc::clone(&users),
            hasher,
            Arc::clone(&clock),
        ));
        let project_service = Arc::new(ProjectService::new(
            Arc::clone(&projects),
            Arc::clone(&users),
            Arc::clone(&clock),
        ));
        let ticket_service = Arc::new(TicketService::new(
            Arc::clone(&tickets),
            projects,
            Arc::clone(&users),
            Arc::clone(&clock),
        ));
        let comment_service = Arc::new(CommentService::new(comments, tickets, users, clock));

        Self {
            accounts: accounts.clone(),
            login: accounts.clone(),
            users: accounts,
            projects: project_service.clone(),
            projects_query: project_service,
            tickets: ticket_service.clone(),
            tickets_query: ticket_service,
            comments: comment_service.clone(),
            comments_query: comment_service,
            stats: Arc::new(WorkspaceStatsService::new(stats)),
        }
    }
}
