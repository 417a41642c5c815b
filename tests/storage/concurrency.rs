//! Integration tests for concurrent store access
//!
//! Many threads race to create and rename records; uniqueness and index
//! consistency must hold afterwards.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use reelgraph_foundation::{PersonDraft, PersonKey};
use reelgraph_storage::PersonStore;

const THREADS: usize = 8;

#[test]
fn racing_creates_keep_emails_unique() {
    let store = Arc::new(PersonStore::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut won = 0;
                for i in 0..50 {
                    // Every thread fights over the same 50 emails
                    let draft = PersonDraft::new(format!("user{i}@x.io"), format!("t{t}_user{i}"));
                    if store.create(draft).is_ok() {
                        won += 1;
                    }
                }
                won
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 50);
    assert_eq!(store.len(), 50);

    let emails: HashSet<_> = store.all().into_iter().map(|p| p.email).collect();
    assert_eq!(emails.len(), 50);
}

#[test]
fn ids_increase_in_commit_order() {
    let store = Arc::new(PersonStore::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                (0..100)
                    .map(|i| {
                        store
                            .create(PersonDraft::new(format!("t{t}u{i}@x.io"), format!("t{t}u{i}")))
                            .unwrap()
                            .id
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let ids = handle.join().unwrap();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }
    let ids: HashSet<_> = store.all().into_iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), THREADS * 100);
}

#[test]
fn readers_never_see_half_applied_renames() {
    let store = Arc::new(PersonStore::new());
    let person = store.create(PersonDraft::new("even@x.io", "flipper")).unwrap();

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..500 {
                let email = if i % 2 == 0 { "odd@x.io" } else { "even@x.io" };
                store
                    .update(PersonDraft::new(email, "flipper").with_id(person.id))
                    .unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for _ in 0..500 {
                    // Inside one view the record and the index always agree
                    store.view(|view| {
                        let record = view.require(person.id).unwrap();
                        assert!(record.email == "even@x.io" || record.email == "odd@x.io");
                    });
                    let even = store.find(&PersonKey::email("even@x.io"));
                    let odd = store.find(&PersonKey::email("odd@x.io"));
                    if let Some(found) = even.or(odd) {
                        assert_eq!(found.id, person.id);
                    }
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let final_record = store.get(person.id).unwrap();
    assert!(store.exists_by_email(&final_record.email));
    let other = if final_record.email == "even@x.io" { "odd@x.io" } else { "even@x.io" };
    assert!(!store.exists_by_email(other));
}
