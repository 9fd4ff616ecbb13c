//! Per-activation session resolver.

use std::sync::Arc;

use studex_domain::{AccessToken, SessionStatus};
use tokio::sync::{OnceCell, watch};
use tracing::{debug, warn};

use crate::ports::CredentialStore;

/// Loads the access token once and publishes the resulting session status.
///
/// The status starts `Unresolved` and becomes `Resolved` exactly once; later
/// calls to [`resolve`](Self::resolve) return the same status without
/// touching storage again. A storage fault is logged and published as
/// `Resolved(None)`, the same as a missing token.
pub struct SessionResolver {
    store: Arc<dyn CredentialStore>,
    resolved: OnceCell<SessionStatus>,
    status: watch::Sender<SessionStatus>,
}

impl SessionResolver {
    /// Creates an unresolved session backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let (status, _) = watch::channel(SessionStatus::Unresolved);
        Self {
            store,
            resolved: OnceCell::new(),
            status,
        }
    }

    /// Current status without waiting.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status.borrow().clone()
    }

    /// Subscribes to status changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Reads the stored access token, once.
    pub async fn resolve(&self) -> SessionStatus {
        self.resolved
            .get_or_init(|| async {
                let status = match self.store.load_access_token().await {
                    Ok(token) => {
                        debug!(
                            token = ?token.as_ref().map(AccessToken::preview),
                            "session resolved"
                        );
                        SessionStatus::Resolved(token)
                    }
                    Err(e) => {
                        warn!(error = %e, "credential store unreadable; no session");
                        SessionStatus::Resolved(None)
                    }
                };
                self.status.send_replace(status.clone());
                status
            })
            .await
            .clone()
    }
}
