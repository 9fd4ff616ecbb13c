//! Directory query identity.

use std::fmt;

use crate::error::{DomainError, DomainResult};
use crate::student::StudentId;

/// A validated lookup identifier.
///
/// Built from caller input (typically typed by the user): surrounding
/// whitespace is trimmed, and blank input and the dot segments `.` and `..`
/// are rejected before any request is made. URL path handling would drop
/// a dot segment and address the roster instead. The value is otherwise
/// passed through and encoded as one path segment when the lookup URL is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupId(String);

impl LookupId {
    /// Validates caller input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentifier` if the input is empty, blank,
    /// `.` or `..`.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let trimmed = input.trim();
        if matches!(trimmed, "" | "." | "..") {
            return Err(DomainError::InvalidIdentifier(input.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the trimmed identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<StudentId> for LookupId {
    fn from(id: StudentId) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for LookupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one directory read and of its cached result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// The full roster.
    Roster,
    /// Students with a birthday today.
    BirthdayRoster,
    /// A single record.
    Lookup(LookupId),
}

impl QueryKey {
    /// Returns true for keys whose result is a collection.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Roster | Self::BirthdayRoster)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roster => f.write_str("roster"),
            Self::BirthdayRoster => f.write_str("birthdayRoster"),
            Self::Lookup(id) => write!(f, "lookup:{id}"),
        }
    }
}
