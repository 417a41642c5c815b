//! Error types for the Reelgraph system.
//!
//! Uses `thiserror` for ergonomic error definition. Every message embeds the
//! offending value so an adapter can surface it verbatim.

use std::fmt;

use thiserror::Error;

use crate::id::EntityKind;

/// Result alias used throughout Reelgraph.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Reelgraph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates a not-found error for the given entity kind and raw id.
    #[must_use]
    pub fn not_found(entity: EntityKind, id: impl Into<u64>) -> Self {
        Self::new(ErrorKind::NotFound {
            entity,
            id: id.into(),
        })
    }

    /// Creates a uniqueness conflict error.
    #[must_use]
    pub fn duplicate(conflict: Conflict) -> Self {
        Self::new(ErrorKind::Duplicate(conflict))
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument(message.into()))
    }

    /// Creates a dangling reference error: `owner` holds `id`, which does not resolve.
    #[must_use]
    pub fn dangling(entity: EntityKind, id: impl Into<u64>, owner: impl Into<u64>) -> Self {
        Self::new(ErrorKind::DanglingReference {
            entity,
            id: id.into(),
            owner: owner.into(),
        })
    }

    /// Returns true if this error means a referenced entity does not exist.
    ///
    /// Dangling references count: they are a missing entity seen from a
    /// relationship set rather than from a caller-supplied id.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::NotFound { .. } | ErrorKind::DanglingReference { .. }
        )
    }

    /// Returns true if this error is a uniqueness conflict.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self.kind, ErrorKind::Duplicate(_))
    }

    /// Returns true if this error is an invalid argument.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidArgument(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// An operation referenced an identifier that does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// The store that was searched.
        entity: EntityKind,
        /// The raw identifier that was requested.
        id: u64,
    },

    /// A create or update would violate a uniqueness invariant.
    #[error("{0}")]
    Duplicate(Conflict),

    /// Malformed input reached the core boundary.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A relationship set holds an identifier that no longer resolves.
    #[error("{entity} with id {id} referenced by {owner} not found")]
    DanglingReference {
        /// The kind of the missing entity.
        entity: EntityKind,
        /// The identifier that failed to resolve.
        id: u64,
        /// The identifier of the record holding the reference.
        owner: u64,
    },
}

/// The secondary key that a write collided with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// Another person already uses this email.
    Email(String),
    /// Another person already uses this handle.
    Handle(String),
    /// Another work already has this title in this release year.
    Title {
        /// The offending title.
        title: String,
        /// The offending release year.
        year: i32,
    },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(email) => write!(f, "person with email {email} already exists"),
            Self::Handle(handle) => write!(f, "person with handle {handle} already exists"),
            Self::Title { title, year } => {
                write!(f, "work titled '{title}' released in {year} already exists")
            }
        }
    }
}
