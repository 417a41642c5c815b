//! Friendship and like edges.
//!
//! Friendship is a symmetric set: both people list each other or neither
//! does. Both sides are written in one store transaction, so a failure can
//! never leave a one-sided edge behind. Likes are one-directional; only the
//! work records the people who like it.

use im::OrdSet;
use reelgraph_foundation::{DanglingPolicy, EntityKind, Error, Person, PersonId, Result, WorkId};
use reelgraph_storage::{PersonStore, View, WorkStore};
use tracing::{debug, info, warn};

/// Edge mutations and relational queries over the two stores.
#[derive(Clone, Copy, Debug)]
pub struct RelationshipGraph<'a> {
    works: &'a WorkStore,
    people: &'a PersonStore,
    dangling: DanglingPolicy,
}

impl<'a> RelationshipGraph<'a> {
    /// Creates a graph over the given stores.
    #[must_use]
    pub fn new(works: &'a WorkStore, people: &'a PersonStore, dangling: DanglingPolicy) -> Self {
        Self {
            works,
            people,
            dangling,
        }
    }

    /// Makes `a` and `b` friends.
    ///
    /// Returns whether anything changed: befriending oneself or an existing
    /// friend is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either person does not exist.
    pub fn add_friend(&self, a: PersonId, b: PersonId) -> Result<bool> {
        let changed = self.people.transact(|tx| {
            let mut left = tx.require(a)?.clone();
            let mut right = tx.require(b)?.clone();
            if a == b {
                return Ok(false);
            }

            let left_changed = left.friends.insert(b).is_none();
            let right_changed = right.friends.insert(a).is_none();
            if left_changed {
                tx.stage(left)?;
            }
            if right_changed {
                tx.stage(right)?;
            }
            Ok(left_changed || right_changed)
        })?;

        if changed {
            info!(%a, %b, "added friendship");
        } else {
            debug!(%a, %b, "friendship unchanged");
        }
        Ok(changed)
    }

    /// Ends the friendship between `a` and `b`.
    ///
    /// Returns whether anything changed; removing a missing edge is a no-op.
    /// Only the sides that held the edge are rewritten.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either person does not exist.
    pub fn remove_friend(&self, a: PersonId, b: PersonId) -> Result<bool> {
        let changed = self.people.transact(|tx| {
            let mut left = tx.require(a)?.clone();
            let mut right = tx.require(b)?.clone();

            let left_changed = left.friends.remove(&b).is_some();
            let right_changed = right.friends.remove(&a).is_some();
            if left_changed {
                tx.stage(left)?;
            }
            if right_changed {
                tx.stage(right)?;
            }
            Ok(left_changed || right_changed)
        })?;

        if changed {
            info!(%a, %b, "removed friendship");
        }
        Ok(changed)
    }

    /// The friends of `id`, in identifier order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the person does not exist, or a dangling
    /// reference error under [`DanglingPolicy::Fail`].
    pub fn friends(&self, id: PersonId) -> Result<Vec<Person>> {
        self.people.view(|view| {
            let person = view.require(id)?;
            self.resolve(view, id, &person.friends)
        })
    }

    /// The people who are friends of both `a` and `b`, in identifier order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if either person does not exist, or a dangling
    /// reference error under [`DanglingPolicy::Fail`].
    pub fn common_friends(&self, a: PersonId, b: PersonId) -> Result<Vec<Person>> {
        self.people.view(|view| {
            let left = view.require(a)?;
            let right = view.require(b)?;
            let common = left.friends.clone().intersection(right.friends.clone());
            self.resolve(view, a, &common)
        })
    }

    /// Records that `person` likes `work`.
    ///
    /// Returns whether anything changed; liking twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the work or the person does not exist, checked
    /// in that order.
    pub fn add_like(&self, work: WorkId, person: PersonId) -> Result<bool> {
        let changed = self.works.transact(|tx| {
            let mut record = tx.require(work)?.clone();
            self.require_person(person)?;
            if record.likes.insert(person).is_some() {
                return Ok(false);
            }
            tx.stage(record)?;
            Ok(true)
        })?;

        if changed {
            info!(%work, %person, "added like");
        }
        Ok(changed)
    }

    /// Withdraws `person`'s like of `work`.
    ///
    /// Returns whether anything changed; removing a missing like is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the work or the person does not exist, checked
    /// in that order.
    pub fn remove_like(&self, work: WorkId, person: PersonId) -> Result<bool> {
        let changed = self.works.transact(|tx| {
            let mut record = tx.require(work)?.clone();
            self.require_person(person)?;
            if record.likes.remove(&person).is_none() {
                return Ok(false);
            }
            tx.stage(record)?;
            Ok(true)
        })?;

        if changed {
            info!(%work, %person, "removed like");
        }
        Ok(changed)
    }

    // Lock order is always works before people.
    fn require_person(&self, id: PersonId) -> Result<()> {
        if self.people.exists(id) {
            Ok(())
        } else {
            warn!(%id, "person not found");
            Err(Error::not_found(EntityKind::Person, id))
        }
    }

    fn resolve(
        &self,
        view: &View<'_, Person>,
        owner: PersonId,
        ids: &OrdSet<PersonId>,
    ) -> Result<Vec<Person>> {
        let mut resolved = Vec::with_capacity(ids.len());
        for &id in ids {
            match view.get(id) {
                Some(person) => resolved.push(person.clone()),
                None => match self.dangling {
                    DanglingPolicy::Skip => {
                        debug!(%owner, %id, "skipping dangling friend reference");
                    }
                    DanglingPolicy::Fail => {
                        warn!(%owner, %id, "dangling friend reference");
                        return Err(Error::dangling(EntityKind::Person, id, owner));
                    }
                },
            }
        }
        Ok(resolved)
    }
}
