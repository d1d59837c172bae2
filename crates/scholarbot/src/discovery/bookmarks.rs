use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use super::domain::ScholarshipId;

/// Outcome of a bookmark toggle, used to word the user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookmarkChange {
    Added,
    Removed,
}

/// Saved scholarships for the current session.
#[derive(Debug, Clone, Default)]
pub struct BookmarkSet {
    ids: BTreeSet<ScholarshipId>,
}

impl BookmarkSet {
    pub fn toggle(&mut self, id: &ScholarshipId) -> BookmarkChange {
        let change = if self.ids.remove(id) {
            BookmarkChange::Removed
        } else {
            self.ids.insert(id.clone());
            BookmarkChange::Added
        };
        debug!(scholarship = %id, ?change, "bookmark toggled");
        change
    }

    pub fn is_bookmarked(&self, id: &ScholarshipId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScholarshipId> {
        self.ids.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_membership() {
        let mut bookmarks = BookmarkSet::default();
        let id = ScholarshipId("2".to_string());

        assert_eq!(bookmarks.toggle(&id), BookmarkChange::Added);
        assert!(bookmarks.is_bookmarked(&id));
        assert_eq!(bookmarks.toggle(&id), BookmarkChange::Removed);
        assert!(!bookmarks.is_bookmarked(&id));
        assert!(bookmarks.is_empty());
    }

    #[test]
    fn toggles_are_independent_per_id() {
        let mut bookmarks = BookmarkSet::default();
        let first = ScholarshipId("1".to_string());
        let second = ScholarshipId("5".to_string());

        bookmarks.toggle(&first);
        bookmarks.toggle(&second);
        bookmarks.toggle(&first);

        assert!(!bookmarks.is_bookmarked(&first));
        assert!(bookmarks.is_bookmarked(&second));
        assert_eq!(bookmarks.iter().collect::<Vec<_>>(), vec![&second]);
    }
}
