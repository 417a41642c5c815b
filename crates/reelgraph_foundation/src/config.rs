//! Configuration for stores, field validation, and relational queries.

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What relational reads do with friend ids that no longer resolve.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DanglingPolicy {
    /// Drop unresolvable ids from the result.
    #[default]
    Skip,
    /// Fail the whole query with a dangling reference error.
    Fail,
}

/// Field-level constraints checked before a draft reaches the guard.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldRules {
    /// Maximum title length in characters.
    pub title_max_chars: usize,
    /// Maximum synopsis length in characters.
    pub synopsis_max_chars: usize,
    /// Earliest accepted release date.
    pub earliest_release: NaiveDate,
    /// Minimum handle length in characters.
    pub handle_min_chars: usize,
    /// Maximum handle length in characters.
    pub handle_max_chars: usize,
    /// Fill a blank display name with the handle on write.
    pub default_name_from_handle: bool,
    /// Reject works without a rating.
    pub require_rating: bool,
}

impl FieldRules {
    /// The first public film screening, 1895-12-28.
    pub const FIRST_SCREENING: NaiveDate = match NaiveDate::from_ymd_opt(1895, 12, 28) {
        Some(date) => date,
        None => NaiveDate::MIN,
    };

    /// Builder method to require a rating on every work.
    #[must_use]
    pub fn with_require_rating(mut self, require: bool) -> Self {
        self.require_rating = require;
        self
    }

    /// Builder method to toggle display-name defaulting.
    #[must_use]
    pub fn with_default_name_from_handle(mut self, enabled: bool) -> Self {
        self.default_name_from_handle = enabled;
        self
    }

    /// Builder method to set the accepted handle length range.
    #[must_use]
    pub fn with_handle_chars(mut self, min: usize, max: usize) -> Self {
        self.handle_min_chars = min;
        self.handle_max_chars = max;
        self
    }
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            title_max_chars: 100,
            synopsis_max_chars: 200,
            earliest_release: Self::FIRST_SCREENING,
            handle_min_chars: 4,
            handle_max_chars: 20,
            default_name_from_handle: true,
            require_rating: false,
        }
    }
}

/// Configuration for a catalog and the stores it owns.
///
/// A fresh config per test gives full isolation: ids restart at the
/// configured values and no state is shared between instances.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CatalogConfig {
    /// First identifier issued by the works store.
    pub first_work_id: u64,
    /// First identifier issued by the people store.
    pub first_person_id: u64,
    /// Result size of a popularity query when none (or zero) is requested.
    pub default_popular_count: usize,
    /// Handling of unresolvable friend ids in relational reads.
    pub dangling: DanglingPolicy,
    /// Field-level validation rules.
    pub rules: FieldRules,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            first_work_id: 1,
            first_person_id: 1,
            default_popular_count: 10,
            dangling: DanglingPolicy::Skip,
            rules: FieldRules::default(),
        }
    }
}

impl CatalogConfig {
    /// Creates a configuration with strict dangling-reference handling.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            dangling: DanglingPolicy::Fail,
            ..Self::default()
        }
    }

    /// Builder method to set the first work id.
    #[must_use]
    pub fn with_first_work_id(mut self, id: u64) -> Self {
        self.first_work_id = id;
        self
    }

    /// Builder method to set the first person id.
    #[must_use]
    pub fn with_first_person_id(mut self, id: u64) -> Self {
        self.first_person_id = id;
        self
    }

    /// Builder method to set the default popularity count.
    #[must_use]
    pub fn with_default_popular_count(mut self, count: usize) -> Self {
        self.default_popular_count = count;
        self
    }

    /// Builder method to set the dangling-reference policy.
    #[must_use]
    pub fn with_dangling(mut self, policy: DanglingPolicy) -> Self {
        self.dangling = policy;
        self
    }

    /// Builder method to set the field rules.
    #[must_use]
    pub fn with_rules(mut self, rules: FieldRules) -> Self {
        self.rules = rules;
        self
    }
}
