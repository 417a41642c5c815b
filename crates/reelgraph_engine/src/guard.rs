//! Pre-write validation against the stores.
//!
//! The guard holds no state of its own. It sequences existence and
//! uniqueness probes so callers get deterministic, value-bearing errors
//! before a store is asked to commit.

use reelgraph_foundation::{
    Conflict, EntityKind, Error, Person, PersonDraft, PersonId, PersonKey, Result, Work,
    WorkDraft, WorkId,
};
use reelgraph_storage::{PersonStore, WorkStore};
use tracing::{debug, warn};

/// Duplicate and existence checks over the works and people stores.
#[derive(Clone, Copy, Debug)]
pub struct Guard<'a> {
    works: &'a WorkStore,
    people: &'a PersonStore,
}

impl<'a> Guard<'a> {
    /// Creates a guard over the given stores.
    #[must_use]
    pub fn new(works: &'a WorkStore, people: &'a PersonStore) -> Self {
        Self { works, people }
    }

    /// Resolves a work or fails.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no work has this id.
    pub fn require_work(&self, id: WorkId) -> Result<Work> {
        self.works.get(id).ok_or_else(|| {
            warn!(%id, "work not found");
            Error::not_found(EntityKind::Work, id)
        })
    }

    /// Resolves a person or fails.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no person has this id.
    pub fn require_person(&self, id: PersonId) -> Result<Person> {
        self.people.get(id).ok_or_else(|| {
            warn!(%id, "person not found");
            Error::not_found(EntityKind::Person, id)
        })
    }

    /// Checks that a new work's title is free in its release year.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` naming the title and year.
    pub fn validate_work_create(&self, draft: &WorkDraft) -> Result<()> {
        self.check_title_year(draft)
    }

    /// Resolves the work an update targets and checks its new title+year
    /// only if it differs from the stored one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the draft has no id, `NotFound` if the
    /// work does not exist, and `Duplicate` if the new title+year is taken.
    pub fn validate_work_update(&self, draft: &WorkDraft) -> Result<Work> {
        let id = draft
            .id
            .ok_or_else(|| Error::invalid_argument("work update requires an identifier"))?;
        let existing = self.require_work(id)?;

        if existing.key() != draft.key() {
            self.check_title_year(draft)?;
        }
        Ok(existing)
    }

    /// Checks that a new person's email, then handle, are free.
    ///
    /// The email is checked first; the handle is only probed if the email
    /// passed.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` naming the first taken value.
    pub fn validate_person_create(&self, draft: &PersonDraft) -> Result<()> {
        self.check_email(&draft.email)?;
        self.check_handle(&draft.handle)
    }

    /// Resolves the person an update targets and probes only the keys
    /// that actually change.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the draft has no id, `NotFound` if the
    /// person does not exist, and `Duplicate` if a changed key is taken.
    pub fn validate_person_update(&self, draft: &PersonDraft) -> Result<Person> {
        let id = draft
            .id
            .ok_or_else(|| Error::invalid_argument("person update requires an identifier"))?;
        let existing = self.require_person(id)?;

        if PersonKey::email(&existing.email) != PersonKey::email(&draft.email) {
            self.check_email(&draft.email)?;
        }
        if PersonKey::handle(&existing.handle) != PersonKey::handle(&draft.handle) {
            self.check_handle(&draft.handle)?;
        }
        Ok(existing)
    }

    fn check_title_year(&self, draft: &WorkDraft) -> Result<()> {
        let key = draft.key();
        debug!(title = %draft.title, year = key.year, "checking work uniqueness");
        if self.works.contains_key(&key) {
            warn!(title = %draft.title, year = key.year, "duplicate work");
            return Err(Error::duplicate(Conflict::Title {
                title: draft.title.clone(),
                year: key.year,
            }));
        }
        Ok(())
    }

    fn check_email(&self, email: &str) -> Result<()> {
        if self.people.exists_by_email(email) {
            warn!(email, "duplicate email");
            return Err(Error::duplicate(Conflict::Email(email.to_string())));
        }
        Ok(())
    }

    fn check_handle(&self, handle: &str) -> Result<()> {
        if self.people.exists_by_handle(handle) {
            warn!(handle, "duplicate handle");
            return Err(Error::duplicate(Conflict::Handle(handle.to_string())));
        }
        Ok(())
    }
}
