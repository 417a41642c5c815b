//! Works of cinema: the stored record, its draft, and its secondary key.

use chrono::{Datelike, NaiveDate};
use im::OrdSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Conflict, Error, Result};
use crate::id::{PersonId, WorkId};
use crate::rating::Rating;

/// A stored work.
///
/// Owned by the works store. `likes` holds the ids of endorsing people and
/// is an independent persistent set per record.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Work {
    /// Identifier assigned by the store.
    pub id: WorkId,
    /// Title as entered.
    pub title: String,
    /// Optional short description.
    pub synopsis: Option<String>,
    /// Release date.
    pub release_date: NaiveDate,
    /// Duration in minutes.
    pub duration: Option<u32>,
    /// Classification rating.
    pub rating: Option<Rating>,
    /// People who like this work.
    pub likes: OrdSet<PersonId>,
}

impl Work {
    /// Builds a fresh record from a draft under a newly assigned id.
    ///
    /// Any id on the draft is ignored. A missing like set becomes empty.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the title is blank.
    pub fn from_draft(id: WorkId, draft: WorkDraft) -> Result<Self> {
        require_title(&draft.title)?;
        Ok(Self {
            id,
            title: draft.title,
            synopsis: draft.synopsis,
            release_date: draft.release_date,
            duration: draft.duration,
            rating: draft.rating,
            likes: draft.likes.unwrap_or_default(),
        })
    }

    /// Applies an update draft on top of this record.
    ///
    /// Scalar fields are replaced. The like set is replaced only when the
    /// draft carries one; otherwise the existing set is kept.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the title is blank.
    pub fn merged(&self, draft: WorkDraft) -> Result<Self> {
        require_title(&draft.title)?;
        Ok(Self {
            id: self.id,
            title: draft.title,
            synopsis: draft.synopsis,
            release_date: draft.release_date,
            duration: draft.duration,
            rating: draft.rating,
            likes: draft.likes.unwrap_or_else(|| self.likes.clone()),
        })
    }

    /// Release year used by the uniqueness index.
    #[must_use]
    pub fn release_year(&self) -> i32 {
        self.release_date.year()
    }

    /// The normalized title+year key of this work.
    #[must_use]
    pub fn key(&self) -> WorkKey {
        WorkKey::new(&self.title, self.release_year())
    }

    /// Number of people who like this work.
    #[must_use]
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    /// The conflict reported when another work holds this title and year.
    #[must_use]
    pub fn conflict(&self) -> Conflict {
        title_conflict(&self.title, self.release_year())
    }
}

fn title_conflict(title: &str, year: i32) -> Conflict {
    Conflict::Title {
        title: title.to_string(),
        year,
    }
}

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::invalid_argument("work title must not be blank"));
    }
    Ok(())
}

/// Candidate payload for creating or updating a work.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkDraft {
    /// Target record for updates; ignored on create.
    pub id: Option<WorkId>,
    /// Title.
    pub title: String,
    /// Optional short description.
    pub synopsis: Option<String>,
    /// Release date.
    pub release_date: NaiveDate,
    /// Duration in minutes.
    pub duration: Option<u32>,
    /// Classification rating.
    pub rating: Option<Rating>,
    /// Replacement like set; `None` keeps the stored set on update.
    pub likes: Option<OrdSet<PersonId>>,
}

impl WorkDraft {
    /// Creates a draft with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, release_date: NaiveDate) -> Self {
        Self {
            id: None,
            title: title.into(),
            synopsis: None,
            release_date,
            duration: None,
            rating: None,
            likes: None,
        }
    }

    /// Targets an existing record.
    #[must_use]
    pub fn with_id(mut self, id: WorkId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the synopsis.
    #[must_use]
    pub fn with_synopsis(mut self, synopsis: impl Into<String>) -> Self {
        self.synopsis = Some(synopsis.into());
        self
    }

    /// Sets the duration in minutes.
    #[must_use]
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: Rating) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Supplies an explicit like set.
    #[must_use]
    pub fn with_likes(mut self, likes: impl IntoIterator<Item = PersonId>) -> Self {
        self.likes = Some(likes.into_iter().collect());
        self
    }

    /// The normalized title+year key this draft would occupy.
    #[must_use]
    pub fn key(&self) -> WorkKey {
        WorkKey::new(&self.title, self.release_date.year())
    }

    /// The conflict reported when another work holds this title and year.
    #[must_use]
    pub fn conflict(&self) -> Conflict {
        title_conflict(&self.title, self.release_date.year())
    }
}

impl From<&Work> for WorkDraft {
    /// A draft that rewrites every field of `work` to its current value.
    fn from(work: &Work) -> Self {
        Self {
            id: Some(work.id),
            title: work.title.clone(),
            synopsis: work.synopsis.clone(),
            release_date: work.release_date,
            duration: work.duration,
            rating: work.rating,
            likes: None,
        }
    }
}

/// Normalized title+year uniqueness key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkKey {
    /// Trimmed, lowercased title.
    pub title: String,
    /// Release year.
    pub year: i32,
}

impl WorkKey {
    /// Builds a key, normalizing the title.
    #[must_use]
    pub fn new(title: &str, year: i32) -> Self {
        Self {
            title: normalize_title(title),
            year,
        }
    }
}

/// Trims and lowercases a title for indexing.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}
