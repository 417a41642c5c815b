//! Integration tests for the works store
//!
//! Tests creation, title+year uniqueness, and merge-by-field updates.

use chrono::NaiveDate;
use reelgraph_storage::WorkStore;
use reelgraph_foundation::{ErrorKind, PersonId, WorkDraft, WorkId};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Creation
// =============================================================================

#[test]
fn create_then_get() {
    let store = WorkStore::new();
    let work = store
        .create(WorkDraft::new("Tokyo Story", date(1953, 11, 3)).with_duration(136))
        .unwrap();

    let fetched = store.get(work.id).unwrap();
    assert_eq!(fetched, work);
    assert!(store.exists(work.id));
    assert_eq!(store.len(), 1);
}

#[test]
fn rejected_create_leaves_store_unchanged() {
    let store = WorkStore::new();
    store.create(WorkDraft::new("Tokyo Story", date(1953, 11, 3))).unwrap();
    let before = store.all();

    assert!(store
        .create(WorkDraft::new("tokyo story", date(1953, 1, 1)))
        .unwrap_err()
        .is_duplicate());
    assert_eq!(store.all(), before);
}

// =============================================================================
// Updates
// =============================================================================

#[test]
fn update_nonexistent_work() {
    let store = WorkStore::new();
    let err = store
        .update(WorkDraft::new("Ghost", date(1990, 7, 13)).with_id(WorkId(12)))
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotFound { id: 12, .. }));
}

#[test]
fn update_into_taken_title_year_is_rejected() {
    let store = WorkStore::new();
    let a = store.create(WorkDraft::new("Vertigo", date(1958, 5, 9))).unwrap();
    store.create(WorkDraft::new("Psycho", date(1960, 6, 16))).unwrap();

    let err = store
        .update(WorkDraft::new("PSYCHO", date(1960, 1, 1)).with_id(a.id))
        .unwrap_err();
    assert!(err.is_duplicate());
    assert!(store.exists_by_title_year("vertigo", 1958));
}

#[test]
fn moving_release_year_frees_old_key() {
    let store = WorkStore::new();
    let a = store.create(WorkDraft::new("Vertigo", date(1958, 5, 9))).unwrap();

    store
        .update(WorkDraft::new("Vertigo", date(1959, 5, 9)).with_id(a.id))
        .unwrap();

    assert!(!store.exists_by_title_year("Vertigo", 1958));
    assert!(store.exists_by_title_year("Vertigo", 1959));
}

#[test]
fn explicit_like_set_replaces_existing() {
    let store = WorkStore::new();
    let a = store
        .create(WorkDraft::new("Vertigo", date(1958, 5, 9)).with_likes([PersonId(1), PersonId(2)]))
        .unwrap();

    let kept = store
        .update(WorkDraft::new("Vertigo", date(1958, 5, 9)).with_synopsis("Heights").with_id(a.id))
        .unwrap();
    assert_eq!(kept.like_count(), 2);

    let cleared = store
        .update(WorkDraft::new("Vertigo", date(1958, 5, 9)).with_likes([]).with_id(a.id))
        .unwrap();
    assert_eq!(cleared.like_count(), 0);
}
