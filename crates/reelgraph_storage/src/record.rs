//! The contract between an entity kind and its store.

use std::fmt;
use std::hash::Hash;

use reelgraph_foundation::{
    Conflict, EntityKind, Person, PersonDraft, PersonId, PersonKey, Result, Work, WorkDraft,
    WorkId, WorkKey,
};

/// An entity kind that can live in an [`IndexedStore`](crate::IndexedStore).
///
/// The store owns identity and indexing; the record decides which secondary
/// keys it occupies and how a draft becomes (or updates) a record.
pub trait Record: Clone + fmt::Debug + Send + Sync + 'static {
    /// Identifier type.
    type Id: Copy + Ord + Hash + fmt::Debug + fmt::Display + From<u64> + Into<u64> + Send + Sync;
    /// Normalized secondary key type.
    type Key: Clone + Eq + Hash + fmt::Debug + Send + Sync;
    /// Create/update payload.
    type Draft;

    /// Entity kind, used in errors and logs.
    const KIND: EntityKind;

    /// The record's identifier.
    fn id(&self) -> Self::Id;

    /// Every secondary key the record occupies.
    fn keys(&self) -> Vec<Self::Key>;

    /// The identifier an update draft targets, if any.
    fn draft_id(draft: &Self::Draft) -> Option<Self::Id>;

    /// Every secondary key a draft would occupy.
    fn draft_keys(draft: &Self::Draft) -> Vec<Self::Key>;

    /// Builds a new record from a draft.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a required key field is blank.
    fn from_draft(id: Self::Id, draft: Self::Draft) -> Result<Self>;

    /// Applies an update draft, preserving fields the draft leaves out.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if a required key field is blank.
    fn merged(&self, draft: Self::Draft) -> Result<Self>;

    /// The conflict reported when this record's `key` is owned by another
    /// record. Names the raw field value, not the normalized key.
    fn conflict(&self, key: &Self::Key) -> Conflict;

    /// The conflict reported when a draft's `key` is already taken.
    fn draft_conflict(draft: &Self::Draft, key: &Self::Key) -> Conflict;
}

impl Record for Work {
    type Id = WorkId;
    type Key = WorkKey;
    type Draft = WorkDraft;

    const KIND: EntityKind = EntityKind::Work;

    fn id(&self) -> WorkId {
        self.id
    }

    fn keys(&self) -> Vec<WorkKey> {
        vec![self.key()]
    }

    fn draft_id(draft: &WorkDraft) -> Option<WorkId> {
        draft.id
    }

    fn draft_keys(draft: &WorkDraft) -> Vec<WorkKey> {
        vec![draft.key()]
    }

    fn from_draft(id: WorkId, draft: WorkDraft) -> Result<Self> {
        Work::from_draft(id, draft)
    }

    fn merged(&self, draft: WorkDraft) -> Result<Self> {
        Work::merged(self, draft)
    }

    fn conflict(&self, _key: &WorkKey) -> Conflict {
        Work::conflict(self)
    }

    fn draft_conflict(draft: &WorkDraft, _key: &WorkKey) -> Conflict {
        draft.conflict()
    }
}

impl Record for Person {
    type Id = PersonId;
    type Key = PersonKey;
    type Draft = PersonDraft;

    const KIND: EntityKind = EntityKind::Person;

    fn id(&self) -> PersonId {
        self.id
    }

    fn keys(&self) -> Vec<PersonKey> {
        Person::keys(self).to_vec()
    }

    fn draft_id(draft: &PersonDraft) -> Option<PersonId> {
        draft.id
    }

    fn draft_keys(draft: &PersonDraft) -> Vec<PersonKey> {
        vec![PersonKey::email(&draft.email), PersonKey::handle(&draft.handle)]
    }

    fn from_draft(id: PersonId, draft: PersonDraft) -> Result<Self> {
        Person::from_draft(id, draft)
    }

    fn merged(&self, draft: PersonDraft) -> Result<Self> {
        Person::merged(self, draft)
    }

    fn conflict(&self, key: &PersonKey) -> Conflict {
        key.conflict(&self.email, &self.handle)
    }

    fn draft_conflict(draft: &PersonDraft, key: &PersonKey) -> Conflict {
        key.conflict(&draft.email, &draft.handle)
    }
}
