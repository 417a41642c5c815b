//! Identifiers, records, errors, validation, and configuration for Reelgraph.
//!
//! This crate provides:
//! - [`WorkId`] / [`PersonId`] - Typed identifiers per entity kind
//! - [`Work`] / [`Person`] - Canonical records and their drafts
//! - [`Error`] - The error taxonomy shared by every layer
//! - [`validate_work`] / [`validate_person`] - Explicit field validation
//! - [`CatalogConfig`] - Knobs honored by the stores and the engine

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod id;
mod person;
mod rating;
mod validate;
mod work;

pub use config::{CatalogConfig, DanglingPolicy, FieldRules};
pub use error::{Conflict, Error, ErrorKind, Result};
pub use id::{EntityKind, PersonId, WorkId};
pub use person::{Person, PersonDraft, PersonKey, normalize_email, normalize_handle};
pub use rating::Rating;
pub use validate::{Violation, validate_person, validate_work};
pub use work::{Work, WorkDraft, WorkKey, normalize_title};

/// Re-exported so callers can build relationship sets without naming `im`.
pub use im::OrdSet;
