//! Classification ratings.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Audience classification of a work.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rating {
    /// General audiences.
    G,
    /// Parental guidance suggested.
    Pg,
    /// Parents strongly cautioned, under 13.
    Pg13,
    /// Restricted, under 17 requires an accompanying adult.
    R,
    /// No one 17 and under admitted.
    Nc17,
}

impl Rating {
    /// All ratings, least to most restrictive.
    pub const ALL: [Rating; 5] = [Self::G, Self::Pg, Self::Pg13, Self::R, Self::Nc17];

    /// Canonical short code, e.g. `PG-13`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::G => "G",
            Self::Pg => "PG",
            Self::Pg13 => "PG-13",
            Self::R => "R",
            Self::Nc17 => "NC-17",
        }
    }

    /// Human-readable description of the restriction.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::G => "no age restrictions",
            Self::Pg => "children are advised to watch with parents",
            Self::Pg13 => "not recommended for children under 13",
            Self::R => "under 17 only with an accompanying adult",
            Self::Nc17 => "no one 17 and under admitted",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Rating {
    type Err = Error;

    /// Parses a rating code. Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|rating| rating.code() == normalized)
            .ok_or_else(|| Error::invalid_argument(format!("unknown rating: {s}")))
    }
}
