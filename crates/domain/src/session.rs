//! Session status derived from the credential store on each activation.

use crate::credential::AccessToken;

/// Two-stage session state machine.
///
/// A session starts `Unresolved` and moves to `Resolved` exactly once per
/// screen activation. `Resolved(None)` means no authenticated session exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// The stored token is still being read.
    #[default]
    Unresolved,
    /// Resolution finished; `None` when no token was stored.
    Resolved(Option<AccessToken>),
}

impl SessionStatus {
    /// Returns true if resolution completed with a usable token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Resolved(Some(_)))
    }

    /// Returns the token if resolution completed with one.
    #[must_use]
    pub const fn token(&self) -> Option<&AccessToken> {
        match self {
            Self::Resolved(Some(token)) => Some(token),
            _ => None,
        }
    }
}
