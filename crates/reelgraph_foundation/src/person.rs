//! People: the stored record, its draft, and its secondary keys.

use chrono::NaiveDate;
use im::OrdSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Conflict, Error, Result};
use crate::id::PersonId;

/// A stored person.
///
/// `friends` is a symmetric relation maintained by the relationship graph;
/// the record only holds identifiers, never other records.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Person {
    /// Identifier assigned by the store.
    pub id: PersonId,
    /// Email as entered.
    pub email: String,
    /// Login handle as entered.
    pub handle: String,
    /// Display name; see [`Person::display_name`].
    pub name: Option<String>,
    /// Birth date.
    pub birthday: Option<NaiveDate>,
    /// Friends of this person.
    pub friends: OrdSet<PersonId>,
}

impl Person {
    /// Builds a fresh record from a draft under a newly assigned id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the email or handle is blank.
    pub fn from_draft(id: PersonId, draft: PersonDraft) -> Result<Self> {
        require_keys(&draft)?;
        Ok(Self {
            id,
            email: draft.email,
            handle: draft.handle,
            name: draft.name,
            birthday: draft.birthday,
            friends: draft.friends.unwrap_or_default().without(&id),
        })
    }

    /// Applies an update draft on top of this record.
    ///
    /// The friend set is replaced only when the draft carries one. A
    /// replacement never lists the person as their own friend.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the email or handle is blank.
    pub fn merged(&self, draft: PersonDraft) -> Result<Self> {
        require_keys(&draft)?;
        Ok(Self {
            id: self.id,
            email: draft.email,
            handle: draft.handle,
            name: draft.name,
            birthday: draft.birthday,
            friends: draft
                .friends
                .map_or_else(|| self.friends.clone(), |friends| friends.without(&self.id)),
        })
    }

    /// The name to show for this person: the stored name, or the handle when blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.handle,
        }
    }

    /// Both normalized uniqueness keys of this person.
    #[must_use]
    pub fn keys(&self) -> [PersonKey; 2] {
        [
            PersonKey::Email(normalize_email(&self.email)),
            PersonKey::Handle(normalize_handle(&self.handle)),
        ]
    }

    /// Returns true if `other` is in this person's friend set.
    #[must_use]
    pub fn is_friend_of(&self, other: PersonId) -> bool {
        self.friends.contains(&other)
    }
}

fn require_keys(draft: &PersonDraft) -> Result<()> {
    if draft.email.trim().is_empty() {
        return Err(Error::invalid_argument("person email must not be blank"));
    }
    if draft.handle.trim().is_empty() {
        return Err(Error::invalid_argument("person handle must not be blank"));
    }
    Ok(())
}

/// Candidate payload for creating or updating a person.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonDraft {
    /// Target record for updates; ignored on create.
    pub id: Option<PersonId>,
    /// Email.
    pub email: String,
    /// Login handle.
    pub handle: String,
    /// Display name.
    pub name: Option<String>,
    /// Birth date.
    pub birthday: Option<NaiveDate>,
    /// Replacement friend set; `None` keeps the stored set on update.
    pub friends: Option<OrdSet<PersonId>>,
}

impl PersonDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(email: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            handle: handle.into(),
            name: None,
            birthday: None,
            friends: None,
        }
    }

    /// Targets an existing record.
    #[must_use]
    pub fn with_id(mut self, id: PersonId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the birth date.
    #[must_use]
    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Supplies an explicit friend set.
    #[must_use]
    pub fn with_friends(mut self, friends: impl IntoIterator<Item = PersonId>) -> Self {
        self.friends = Some(friends.into_iter().collect());
        self
    }

    /// Fills a blank or missing name with the handle.
    pub fn default_name_from_handle(&mut self) {
        if self.name.as_deref().is_none_or(|name| name.trim().is_empty()) {
            self.name = Some(self.handle.clone());
        }
    }
}

impl From<&Person> for PersonDraft {
    /// A draft that rewrites every field of `person` to its current value.
    fn from(person: &Person) -> Self {
        Self {
            id: Some(person.id),
            email: person.email.clone(),
            handle: person.handle.clone(),
            name: person.name.clone(),
            birthday: person.birthday,
            friends: None,
        }
    }
}

/// Normalized uniqueness key of a person.
///
/// Both variants share one index; the variant keeps emails and handles
/// from colliding with each other.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PersonKey {
    /// Lowercased email.
    Email(String),
    /// Lowercased handle.
    Handle(String),
}

impl PersonKey {
    /// Email key for a raw value.
    #[must_use]
    pub fn email(raw: &str) -> Self {
        Self::Email(normalize_email(raw))
    }

    /// Handle key for a raw value.
    #[must_use]
    pub fn handle(raw: &str) -> Self {
        Self::Handle(normalize_handle(raw))
    }

    /// The conflict reported when this key is taken, naming the raw value
    /// the caller supplied rather than its normalized form.
    #[must_use]
    pub fn conflict(&self, email: &str, handle: &str) -> Conflict {
        match self {
            Self::Email(_) => Conflict::Email(email.to_string()),
            Self::Handle(_) => Conflict::Handle(handle.to_string()),
        }
    }
}

/// Trims and lowercases an email for indexing.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trims and lowercases a handle for indexing.
#[must_use]
pub fn normalize_handle(handle: &str) -> String {
    handle.trim().to_lowercase()
}
