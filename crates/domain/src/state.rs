//! Screen view state for presentation binding.
//!
//! This module defines what a screen renders for one directory read,
//! so every outcome (including the absence of a session) maps to something
//! displayable.

/// What a screen shows for one directory read.
///
/// - `AwaitingSession`: the stored token is still being read
/// - `Unauthorized`: no authenticated session; the user must log in again
/// - `Loaded`: data available
/// - `Failed`: terminal failure with a user-facing message
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// The session is still resolving.
    AwaitingSession,

    /// The session resolved without a token.
    Unauthorized,

    /// Data was loaded.
    Loaded(T),

    /// The read failed.
    Failed {
        /// Error category for display.
        kind: FailureKind,
        /// Human-readable error message.
        message: String,
    },
}

impl<T> ViewState<T> {
    /// Creates a Failed state.
    #[must_use]
    pub fn failed(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failed {
            kind,
            message: message.into(),
        }
    }

    /// Returns the loaded data.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// Categories of failures for user-facing display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Caller input was rejected before any request was sent.
    Validation,
    /// The directory read failed after the session was ready.
    Fetch,
    /// The requested record does not exist.
    NotFound,
    /// The service rejected the username or password.
    InvalidCredentials,
    /// Login failed for another reason.
    Auth,
    /// Registration failed.
    Registration,
    /// Local credential storage is unavailable.
    Storage,
}

impl FailureKind {
    /// Returns a human-readable title for this failure.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Validation => "Invalid Input",
            Self::Fetch => "Loading Failed",
            Self::NotFound => "Search Failed",
            Self::InvalidCredentials | Self::Auth => "Login Failed",
            Self::Registration => "Sign-up Failed",
            Self::Storage => "Storage Unavailable",
        }
    }

    /// Returns true if repeating the same action may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch | Self::Auth | Self::Registration)
    }
}
