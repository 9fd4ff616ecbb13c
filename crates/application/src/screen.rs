//! Per-activation screen controller.
//!
//! A [`DirectoryScreen`] is what one visit to the directory screen owns: a
//! fresh session resolver, the query engine (built only once the session
//! carries a token) and the detail selection. Every read is reported as a
//! [`ViewState`], so an absent session, a pending session and a failed fetch
//! each render differently.

use std::sync::{Arc, OnceLock};

use studex_domain::{
    DetailSelection, FailureKind, ServiceSettings, SessionStatus, StudentRecord, ViewState,
};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::auth::Authenticator;
use crate::directory::DirectoryQueryEngine;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{CredentialStore, HttpClient};
use crate::session::SessionResolver;

/// Process-wide collaborators shared by every screen.
#[derive(Clone)]
pub struct ClientContext {
    /// Durable token storage.
    pub store: Arc<dyn CredentialStore>,
    /// Outbound HTTP.
    pub http: Arc<dyn HttpClient>,
    /// Service endpoints and defaults.
    pub settings: Arc<ServiceSettings>,
}

impl ClientContext {
    /// Bundles the shared collaborators.
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStore>,
        http: Arc<dyn HttpClient>,
        settings: Arc<ServiceSettings>,
    ) -> Self {
        Self {
            store,
            http,
            settings,
        }
    }

    /// Authenticator writing into this context's store.
    #[must_use]
    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(
            Arc::clone(&self.http),
            Arc::clone(&self.store),
            Arc::clone(&self.settings),
        )
    }
}

impl std::fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// One activation of the directory screen.
pub struct DirectoryScreen {
    http: Arc<dyn HttpClient>,
    settings: Arc<ServiceSettings>,
    session: SessionResolver,
    engine: OnceLock<DirectoryQueryEngine>,
    selection: DetailSelection,
}

impl DirectoryScreen {
    /// Activates a screen with an unresolved session.
    #[must_use]
    pub fn activate(ctx: &ClientContext) -> Self {
        debug!("directory screen activated");
        Self {
            http: Arc::clone(&ctx.http),
            settings: Arc::clone(&ctx.settings),
            session: SessionResolver::new(Arc::clone(&ctx.store)),
            engine: OnceLock::new(),
            selection: DetailSelection::default(),
        }
    }

    /// Activates a screen and waits for its session to resolve.
    pub async fn open(ctx: &ClientContext) -> Self {
        let screen = Self::activate(ctx);
        screen.resolve_session().await;
        screen
    }

    /// Resolves the session from the credential store (once).
    pub async fn resolve_session(&self) -> SessionStatus {
        self.session.resolve().await
    }

    /// Current session status.
    #[must_use]
    pub fn session(&self) -> SessionStatus {
        self.session.status()
    }

    /// Subscribes to session status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.session.subscribe()
    }

    /// The gating guard: the engine, if the session carries a token.
    ///
    /// # Errors
    ///
    /// `SessionUnresolved` while the session is pending and `SessionAbsent`
    /// when it resolved without a token.
    pub fn engine(&self) -> ApplicationResult<&DirectoryQueryEngine> {
        if let Some(engine) = self.engine.get() {
            return Ok(engine);
        }
        match self.session.status() {
            SessionStatus::Unresolved => Err(ApplicationError::SessionUnresolved),
            SessionStatus::Resolved(None) => Err(ApplicationError::SessionAbsent),
            SessionStatus::Resolved(Some(token)) => Ok(self.engine.get_or_init(|| {
                DirectoryQueryEngine::new(Arc::clone(&self.http), Arc::clone(&self.settings), token)
            })),
        }
    }

    /// Loads the full roster.
    pub async fn roster(&self) -> ViewState<Arc<Vec<StudentRecord>>> {
        let result = match self.engine() {
            Ok(engine) => engine.fetch_roster().await,
            Err(e) => Err(e),
        };
        render(result)
    }

    /// Loads today's birthdays.
    pub async fn birthdays(&self) -> ViewState<Arc<Vec<StudentRecord>>> {
        let result = match self.engine() {
            Ok(engine) => engine.fetch_birthday_roster().await,
            Err(e) => Err(e),
        };
        render(result)
    }

    /// Looks a student up and, on success, selects the record for detail view.
    pub async fn search(&mut self, input: &str) -> ViewState<Arc<StudentRecord>> {
        let result = match self.engine() {
            Ok(engine) => engine.fetch_by_id(input).await,
            Err(e) => Err(e),
        };
        if let Ok(record) = &result {
            self.selection.select(Arc::clone(record));
        }
        render(result)
    }

    /// Shows `record` in the detail view, replacing any prior selection.
    pub fn select(&mut self, record: Arc<StudentRecord>) {
        self.selection.select(record);
    }

    /// Hides the detail view. Idempotent.
    pub fn dismiss(&mut self) {
        self.selection.dismiss();
    }

    /// Current detail selection.
    #[must_use]
    pub const fn selection(&self) -> &DetailSelection {
        &self.selection
    }

    /// Image URL for a record.
    #[must_use]
    pub fn image_url(&self, record: &StudentRecord) -> String {
        self.settings.image_url(record.id)
    }

    /// Leaves the screen, discarding its session, engine and cache.
    ///
    /// Stored tokens are kept; see [`Authenticator::forget_credential`].
    pub fn logout(self) {
        info!(
            authenticated = self.session.status().is_authenticated(),
            "logged out of directory screen"
        );
    }
}

impl std::fmt::Debug for DirectoryScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryScreen")
            .field("session", &self.session.status())
            .field("engine", &self.engine.get())
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

fn render<T>(result: ApplicationResult<T>) -> ViewState<T> {
    match result {
        Ok(value) => ViewState::Loaded(value),
        Err(ApplicationError::SessionUnresolved) => ViewState::AwaitingSession,
        Err(ApplicationError::SessionAbsent) => ViewState::Unauthorized,
        Err(e) => ViewState::failed(e.kind().unwrap_or(FailureKind::Fetch), e.user_message()),
    }
}
