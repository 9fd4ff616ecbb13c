//! Detail selection state for a single screen.

use std::sync::Arc;

use crate::student::StudentRecord;

/// Which record, if any, is expanded for detailed viewing.
///
/// The record is shared with the query cache that produced it; this state
/// never mutates or persists it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DetailSelection {
    /// Nothing is expanded.
    #[default]
    Hidden,
    /// A record is shown in detail.
    Showing(Arc<StudentRecord>),
}

impl DetailSelection {
    /// Shows `record`, replacing any prior selection.
    pub fn select(&mut self, record: Arc<StudentRecord>) {
        *self = Self::Showing(record);
    }

    /// Hides the detail view. Calling this while hidden does nothing.
    pub fn dismiss(&mut self) {
        *self = Self::Hidden;
    }

    /// Returns the selected record.
    #[must_use]
    pub fn selected(&self) -> Option<&Arc<StudentRecord>> {
        match self {
            Self::Hidden => None,
            Self::Showing(record) => Some(record),
        }
    }

    /// Returns true while a record is shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        matches!(self, Self::Showing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_overwrites_previous() {
        let mut selection = DetailSelection::default();
        let first = Arc::new(StudentRecord::new(1, "A"));
        let second = Arc::new(StudentRecord::new(2, "B"));

        selection.select(Arc::clone(&first));
        selection.select(Arc::clone(&second));

        assert!(selection.is_visible());
        assert!(selection.selected().is_some_and(|r| Arc::ptr_eq(r, &second)));
    }

    #[test]
    fn test_dismiss_releases_reference() {
        let mut selection = DetailSelection::default();
        let record = Arc::new(StudentRecord::new(1, "A"));

        selection.select(Arc::clone(&record));
        assert_eq!(Arc::strong_count(&record), 2);

        selection.dismiss();
        assert_eq!(selection, DetailSelection::Hidden);
        assert_eq!(Arc::strong_count(&record), 1);
    }

    #[test]
    fn test_dismiss_when_hidden_is_noop() {
        let mut selection = DetailSelection::Hidden;
        selection.dismiss();
        selection.dismiss();
        assert!(!selection.is_visible());
        assert!(selection.selected().is_none());
    }
}
