//! Generic indexed entity storage.
//!
//! An `IndexedStore` owns the canonical records of one entity kind, keyed by
//! identifier, plus a single secondary index from normalized business keys
//! to identifiers. Both live behind one `RwLock` so no reader can observe a
//! record without its index entries or an index entry without its record.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use reelgraph_foundation::{Error, Result};
use tracing::{debug, info, warn};

use crate::allocator::IdAllocator;
use crate::record::Record;

/// Primary records and their secondary index, updated as one unit.
#[derive(Debug)]
struct Tables<R: Record> {
    records: BTreeMap<R::Id, R>,
    index: HashMap<R::Key, R::Id>,
}

impl<R: Record> Default for Tables<R> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            index: HashMap::new(),
        }
    }
}

impl<R: Record> Tables<R> {
    fn require(&self, id: R::Id) -> Result<&R> {
        self.records
            .get(&id)
            .ok_or_else(|| Error::not_found(R::KIND, id))
    }

    /// Checks that every staged record can take its keys once all staged
    /// records are applied together.
    fn check_staged(&self, staged: &BTreeMap<R::Id, R>) -> Result<()> {
        let mut claimed: HashMap<R::Key, &R> = HashMap::new();
        for record in staged.values() {
            for key in record.keys() {
                if let Some(other) = claimed.insert(key.clone(), record) {
                    if other.id() != record.id() {
                        return Err(Error::duplicate(record.conflict(&key)));
                    }
                }
            }
        }

        // A key owned by a staged record that gave it up is free; a key owned
        // by an untouched record is not.
        for (key, record) in &claimed {
            if let Some(owner) = self.index.get(key) {
                if *owner != record.id() && !staged.contains_key(owner) {
                    return Err(Error::duplicate(record.conflict(key)));
                }
            }
        }
        Ok(())
    }

    /// Stores a record and rewrites its index entries. Assumes the keys were checked.
    fn put(&mut self, record: R) {
        let id = record.id();
        let new_keys = record.keys();
        if let Some(old) = self.records.insert(id, record) {
            for key in old.keys() {
                if !new_keys.contains(&key) && self.index.get(&key) == Some(&id) {
                    debug!(kind = %R::KIND, %id, ?key, "removed index entry");
                    self.index.remove(&key);
                }
            }
        }
        for key in new_keys {
            self.index.insert(key, id);
        }
    }

    fn commit(&mut self, staged: BTreeMap<R::Id, R>) -> Result<usize> {
        self.check_staged(&staged)?;
        let count = staged.len();
        for record in staged.into_values() {
            self.put(record);
        }
        Ok(count)
    }
}

/// Canonical records of one entity kind plus their uniqueness index.
///
/// Reads take a shared lock and return owned clones; relationship sets are
/// persistent collections, so clones are cheap and never alias a stored
/// record's state.
#[derive(Debug)]
pub struct IndexedStore<R: Record> {
    allocator: IdAllocator,
    tables: RwLock<Tables<R>>,
}

impl<R: Record> Default for IndexedStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> IndexedStore<R> {
    /// Creates an empty store issuing identifiers from 1.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates an empty store issuing identifiers from `first_id`.
    #[must_use]
    pub fn starting_at(first_id: u64) -> Self {
        Self {
            allocator: IdAllocator::new(first_id),
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Stores a new record built from `draft` under a fresh identifier.
    ///
    /// Any identifier on the draft is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Duplicate` if a secondary key is already taken, or
    /// `InvalidArgument` if a required key field is blank or the identifier
    /// space is exhausted.
    pub fn create(&self, draft: R::Draft) -> Result<R> {
        let mut tables = self.tables.write();

        if let Some(key) = R::draft_keys(&draft)
            .into_iter()
            .find(|key| tables.index.contains_key(key))
        {
            warn!(kind = %R::KIND, ?key, "rejected create: key already taken");
            return Err(Error::duplicate(R::draft_conflict(&draft, &key)));
        }

        let id = R::Id::from(self.allocator.next_id()?);
        let record = R::from_draft(id, draft)?;
        tables.put(record.clone());

        info!(kind = %R::KIND, %id, "created record");
        Ok(record)
    }

    /// Replaces the record a draft targets, merging fields the draft omits.
    ///
    /// Index entries for changed keys are swapped under the same lock as
    /// the record itself.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the draft has no identifier or a blank
    /// key field, `NotFound` if no record has that identifier, and
    /// `Duplicate` if a changed key belongs to another record.
    pub fn update(&self, draft: R::Draft) -> Result<R> {
        let id = R::draft_id(&draft).ok_or_else(|| {
            Error::invalid_argument(format!("{} update requires an identifier", R::KIND))
        })?;

        let mut tables = self.tables.write();
        let updated = match tables.records.get(&id) {
            Some(existing) => existing.merged(draft)?,
            None => {
                warn!(kind = %R::KIND, %id, "rejected update: no such record");
                return Err(Error::not_found(R::KIND, id));
            }
        };

        tables.commit(BTreeMap::from([(id, updated.clone())]))?;

        info!(kind = %R::KIND, %id, "updated record");
        Ok(updated)
    }

    /// Runs `f` against a write transaction and commits what it staged.
    ///
    /// Nothing is applied unless `f` returns `Ok` and every staged record's
    /// keys are free, so multi-record changes are all-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or `Duplicate` if the staged records
    /// would break uniqueness.
    pub fn transact<T>(&self, f: impl FnOnce(&mut Transaction<'_, R>) -> Result<T>) -> Result<T> {
        let mut tables = self.tables.write();
        let (value, staged) = {
            let mut tx = Transaction {
                tables: &*tables,
                staged: BTreeMap::new(),
            };
            let value = f(&mut tx)?;
            (value, tx.staged)
        };

        let count = tables.commit(staged)?;
        if count > 0 {
            debug!(kind = %R::KIND, count, "committed transaction");
        }
        Ok(value)
    }

    /// Runs `f` against a consistent read-only view of the store.
    pub fn view<T>(&self, f: impl FnOnce(&View<'_, R>) -> T) -> T {
        let tables = self.tables.read();
        f(&View { tables: &*tables })
    }

    /// Returns a copy of the record with `id`, if any.
    #[must_use]
    pub fn get(&self, id: R::Id) -> Option<R> {
        self.tables.read().records.get(&id).cloned()
    }

    /// Returns a copy of the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has that identifier.
    pub fn require(&self, id: R::Id) -> Result<R> {
        self.tables.read().require(id).cloned()
    }

    /// Returns true if a record with `id` exists.
    #[must_use]
    pub fn exists(&self, id: R::Id) -> bool {
        self.tables.read().records.contains_key(&id)
    }

    /// Returns a copy of the record owning a normalized key, if any.
    #[must_use]
    pub fn find(&self, key: &R::Key) -> Option<R> {
        let tables = self.tables.read();
        let found = tables
            .index
            .get(key)
            .and_then(|id| tables.records.get(id))
            .cloned();
        debug!(kind = %R::KIND, ?key, found = found.is_some(), "secondary key lookup");
        found
    }

    /// Returns true if some record owns a normalized key.
    #[must_use]
    pub fn contains_key(&self, key: &R::Key) -> bool {
        self.tables.read().index.contains_key(key)
    }

    /// Copies of all records, ordered by identifier.
    #[must_use]
    pub fn all(&self) -> Vec<R> {
        self.tables.read().records.values().cloned().collect()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().records.len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.read().records.is_empty()
    }

    /// The identifier the next successful create will receive.
    #[must_use]
    pub fn next_id(&self) -> R::Id {
        R::Id::from(self.allocator.peek())
    }
}

/// A read-only, consistent view of a store.
#[derive(Debug)]
pub struct View<'a, R: Record> {
    tables: &'a Tables<R>,
}

impl<R: Record> View<'_, R> {
    /// Returns the record with `id`, if any.
    #[must_use]
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.tables.records.get(&id)
    }

    /// Returns the record with `id`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has that identifier.
    pub fn require(&self, id: R::Id) -> Result<&R> {
        self.tables.require(id)
    }

    /// Iterates over all records in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.tables.records.values()
    }
}

/// Staged writes against a store, applied together on commit.
///
/// Reads see staged records first, then the committed state.
#[derive(Debug)]
pub struct Transaction<'a, R: Record> {
    tables: &'a Tables<R>,
    staged: BTreeMap<R::Id, R>,
}

impl<R: Record> Transaction<'_, R> {
    /// Returns the record with `id`, staged version first.
    #[must_use]
    pub fn get(&self, id: R::Id) -> Option<&R> {
        self.staged
            .get(&id)
            .or_else(|| self.tables.records.get(&id))
    }

    /// Returns the record with `id`, staged version first.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has that identifier.
    pub fn require(&self, id: R::Id) -> Result<&R> {
        self.get(id).ok_or_else(|| Error::not_found(R::KIND, id))
    }

    /// Stages a replacement for an existing record.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the record does not exist; transactions never
    /// create records.
    pub fn stage(&mut self, record: R) -> Result<()> {
        let id = record.id();
        self.tables.require(id)?;
        self.staged.insert(id, record);
        Ok(())
    }

    /// Number of records staged so far.
    #[must_use]
    pub fn staged(&self) -> usize {
        self.staged.len()
    }
}
