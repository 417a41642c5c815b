//! Integration tests for Error types
//!
//! Tests error construction, display, and classification.

use reelgraph_foundation::{Conflict, EntityKind, Error, ErrorKind, PersonId, WorkId};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn not_found_for_each_kind() {
    let err = Error::not_found(EntityKind::Work, WorkId(3));
    assert!(matches!(err.kind, ErrorKind::NotFound { entity: EntityKind::Work, id: 3 }));

    let err = Error::not_found(EntityKind::Person, PersonId(4));
    assert!(matches!(err.kind, ErrorKind::NotFound { entity: EntityKind::Person, id: 4 }));
}

#[test]
fn classification_is_exclusive() {
    let not_found = Error::not_found(EntityKind::Work, 1u64);
    let duplicate = Error::duplicate(Conflict::Handle("neo_".to_string()));
    let invalid = Error::invalid_argument("nope");

    assert!(not_found.is_not_found() && !not_found.is_duplicate() && !not_found.is_invalid_argument());
    assert!(duplicate.is_duplicate() && !duplicate.is_not_found());
    assert!(invalid.is_invalid_argument() && !invalid.is_duplicate());
}

// =============================================================================
// Error Display
// =============================================================================

#[test]
fn messages_embed_offending_values() {
    let cases = [
        (Error::duplicate(Conflict::Email("x@y.com".to_string())), "x@y.com"),
        (Error::duplicate(Conflict::Handle("neo_".to_string())), "neo_"),
        (
            Error::duplicate(Conflict::Title {
                title: "Brazil".to_string(),
                year: 1985,
            }),
            "1985",
        ),
        (Error::not_found(EntityKind::Person, PersonId(17)), "17"),
        (Error::dangling(EntityKind::Person, PersonId(8), PersonId(2)), "8"),
    ];

    for (err, needle) in cases {
        assert!(err.to_string().contains(needle), "{err} should mention {needle}");
    }
}

#[test]
fn errors_are_std_errors() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Error::invalid_argument("x"));
}
