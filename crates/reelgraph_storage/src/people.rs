//! The people store: people indexed by normalized email and handle.

use reelgraph_foundation::{Person, PersonKey};

use crate::store::IndexedStore;

/// Store of people.
pub type PersonStore = IndexedStore<Person>;

impl IndexedStore<Person> {
    /// Finds the person with this email (case-insensitive).
    #[must_use]
    pub fn get_by_email(&self, email: &str) -> Option<Person> {
        self.find(&PersonKey::email(email))
    }

    /// Finds the person with this handle (case-insensitive).
    #[must_use]
    pub fn get_by_handle(&self, handle: &str) -> Option<Person> {
        self.find(&PersonKey::handle(handle))
    }

    /// Returns true if some person uses this email (case-insensitive).
    ///
    /// A blank email never matches.
    #[must_use]
    pub fn exists_by_email(&self, email: &str) -> bool {
        !email.trim().is_empty() && self.contains_key(&PersonKey::email(email))
    }

    /// Returns true if some person uses this handle (case-insensitive).
    ///
    /// A blank handle never matches.
    #[must_use]
    pub fn exists_by_handle(&self, handle: &str) -> bool {
        !handle.trim().is_empty() && self.contains_key(&PersonKey::handle(handle))
    }
}
