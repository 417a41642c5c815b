//! The catalog: the operations an adapter layer calls.
//!
//! Each write runs field validation, then the guard, then the store commit.
//! Reads go straight to the stores or the ranking.

use chrono::{Local, NaiveDate};
use reelgraph_foundation::{
    CatalogConfig, Error, Person, PersonDraft, PersonId, Result, Violation, Work, WorkDraft,
    WorkId, validate_person, validate_work,
};
use reelgraph_storage::{PersonStore, WorkStore};
use tracing::{info, warn};

use crate::graph::RelationshipGraph;
use crate::guard::Guard;
use crate::ranking::Ranking;

/// Works, people, and the relations between them.
///
/// A catalog is `Send + Sync`; share it behind an `Arc` between request
/// threads. Each instance is fully isolated from every other.
#[derive(Debug)]
pub struct Catalog {
    config: CatalogConfig,
    works: WorkStore,
    people: PersonStore,
    clock: fn() -> NaiveDate,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(CatalogConfig::default())
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            works: WorkStore::starting_at(config.first_work_id),
            people: PersonStore::starting_at(config.first_person_id),
            config,
            clock: local_today,
        }
    }

    /// Replaces the source of "today" used to validate birthdays.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    /// The configuration this catalog was built with.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// The underlying works store.
    #[must_use]
    pub fn works_store(&self) -> &WorkStore {
        &self.works
    }

    /// The underlying people store.
    #[must_use]
    pub fn people_store(&self) -> &PersonStore {
        &self.people
    }

    fn guard(&self) -> Guard<'_> {
        Guard::new(&self.works, &self.people)
    }

    fn graph(&self) -> RelationshipGraph<'_> {
        RelationshipGraph::new(&self.works, &self.people, self.config.dangling)
    }

    fn ranking(&self) -> Ranking {
        Ranking::new(self.config.default_popular_count)
    }

    // -------------------------------------------------------------------------
    // Works
    // -------------------------------------------------------------------------

    /// Validates and stores a new work.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` listing field violations, or `Duplicate` if
    /// the title is taken in that release year.
    pub fn create_work(&self, draft: WorkDraft) -> Result<Work> {
        reject(validate_work(&draft, &self.config.rules))?;
        self.guard().validate_work_create(&draft)?;
        let work = self.works.create(draft)?;
        info!(id = %work.id, title = %work.title, "work added");
        Ok(work)
    }

    /// Validates and applies an update to an existing work.
    ///
    /// The like set is kept unless the draft supplies one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument`, `NotFound`, or `Duplicate`.
    pub fn update_work(&self, draft: WorkDraft) -> Result<Work> {
        reject(validate_work(&draft, &self.config.rules))?;
        self.guard().validate_work_update(&draft)?;
        let work = self.works.update(draft)?;
        info!(id = %work.id, title = %work.title, "work updated");
        Ok(work)
    }

    /// The work with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist.
    pub fn work(&self, id: WorkId) -> Result<Work> {
        self.guard().require_work(id)
    }

    /// All works, in identifier order.
    #[must_use]
    pub fn works(&self) -> Vec<Work> {
        self.works.all()
    }

    // -------------------------------------------------------------------------
    // People
    // -------------------------------------------------------------------------

    /// Validates and stores a new person.
    ///
    /// A blank name is replaced by the handle when the rules ask for it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` listing field violations, or `Duplicate`
    /// naming the taken email (checked first) or handle.
    pub fn create_person(&self, mut draft: PersonDraft) -> Result<Person> {
        reject(validate_person(&draft, &self.config.rules, (self.clock)()))?;
        self.guard().validate_person_create(&draft)?;
        if self.config.rules.default_name_from_handle {
            draft.default_name_from_handle();
        }
        let person = self.people.create(draft)?;
        info!(id = %person.id, handle = %person.handle, "person added");
        Ok(person)
    }

    /// Validates and applies an update to an existing person.
    ///
    /// The friend set is kept unless the draft supplies one. A supplied set
    /// replaces this person's side only: their own id is dropped from it,
    /// and the people listed are not rewritten. Use
    /// [`add_friend`](Self::add_friend) and [`remove_friend`](Self::remove_friend)
    /// to keep both sides in step.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument`, `NotFound`, or `Duplicate`.
    pub fn update_person(&self, mut draft: PersonDraft) -> Result<Person> {
        reject(validate_person(&draft, &self.config.rules, (self.clock)()))?;
        self.guard().validate_person_update(&draft)?;
        if self.config.rules.default_name_from_handle {
            draft.default_name_from_handle();
        }
        let person = self.people.update(draft)?;
        info!(id = %person.id, handle = %person.handle, "person updated");
        Ok(person)
    }

    /// The person with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if they do not exist.
    pub fn person(&self, id: PersonId) -> Result<Person> {
        self.guard().require_person(id)
    }

    /// All people, in identifier order.
    #[must_use]
    pub fn people(&self) -> Vec<Person> {
        self.people.all()
    }

    // -------------------------------------------------------------------------
    // Relations
    // -------------------------------------------------------------------------

    /// Makes two people friends. Idempotent; befriending oneself does nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either person does not exist.
    pub fn add_friend(&self, id: PersonId, friend: PersonId) -> Result<()> {
        self.graph().add_friend(id, friend).map(drop)
    }

    /// Ends a friendship. Removing a missing edge does nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either person does not exist.
    pub fn remove_friend(&self, id: PersonId, friend: PersonId) -> Result<()> {
        self.graph().remove_friend(id, friend).map(drop)
    }

    /// The friends of a person.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the person does not exist, or a dangling
    /// reference error under the strict policy.
    pub fn friends(&self, id: PersonId) -> Result<Vec<Person>> {
        self.graph().friends(id)
    }

    /// The friends two people share.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either person does not exist, or a dangling
    /// reference error under the strict policy.
    pub fn common_friends(&self, id: PersonId, other: PersonId) -> Result<Vec<Person>> {
        self.graph().common_friends(id, other)
    }

    /// Records that a person likes a work. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the work or the person does not exist.
    pub fn add_like(&self, work: WorkId, person: PersonId) -> Result<()> {
        self.graph().add_like(work, person).map(drop)
    }

    /// Withdraws a like. Removing a missing like does nothing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the work or the person does not exist.
    pub fn remove_like(&self, work: WorkId, person: PersonId) -> Result<()> {
        self.graph().remove_like(work, person).map(drop)
    }

    /// The most-liked works; `None` or `Some(0)` uses the configured default count.
    #[must_use]
    pub fn popular(&self, count: Option<usize>) -> Vec<Work> {
        self.ranking().popular(&self.works, count)
    }
}

fn reject(violations: Vec<Violation>) -> Result<()> {
    if violations.is_empty() {
        return Ok(());
    }
    let message = violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    warn!(%message, "rejected invalid draft");
    Err(Error::invalid_argument(message))
}
