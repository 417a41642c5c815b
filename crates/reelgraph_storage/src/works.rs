//! The works store: works indexed by normalized title and release year.

use reelgraph_foundation::{Work, WorkKey};

use crate::store::IndexedStore;

/// Store of works.
pub type WorkStore = IndexedStore<Work>;

impl IndexedStore<Work> {
    /// Finds the work with this title (case-insensitive) released in `year`.
    #[must_use]
    pub fn get_by_title_year(&self, title: &str, year: i32) -> Option<Work> {
        self.find(&WorkKey::new(title, year))
    }

    /// Returns true if a work with this title (case-insensitive) was released in `year`.
    ///
    /// A blank title never matches.
    #[must_use]
    pub fn exists_by_title_year(&self, title: &str, year: i32) -> bool {
        !title.trim().is_empty() && self.contains_key(&WorkKey::new(title, year))
    }
}
