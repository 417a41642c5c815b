//! Concurrency tests for relation edges
//!
//! Tests that edges written from many threads end up symmetric and counted
//! exactly once.

use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;
use reelgraph_engine::Catalog;
use reelgraph_foundation::{CatalogConfig, PersonDraft, PersonId, WorkDraft, WorkId};

const PEOPLE: u64 = 16;
const THREADS: u64 = 8;

fn seeded(works: u64) -> Arc<Catalog> {
    let catalog = Catalog::new(CatalogConfig::default())
        .with_clock(|| NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    for i in 1..=PEOPLE {
        catalog
            .create_person(PersonDraft::new(format!("p{i}@x.io"), format!("user{i}")))
            .unwrap();
    }
    let date = NaiveDate::from_ymd_opt(2001, 9, 1).unwrap();
    for i in 1..=works {
        catalog.create_work(WorkDraft::new(format!("Work {i}"), date)).unwrap();
    }
    Arc::new(catalog)
}

#[test]
fn concurrent_befriending_is_symmetric() {
    let catalog = seeded(0);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                for a in 1..=PEOPLE {
                    for b in 1..=PEOPLE {
                        // Each thread walks the pairs in a different direction.
                        let (x, y) = if t % 2 == 0 { (a, b) } else { (b, a) };
                        catalog.add_friend(PersonId(x), PersonId(y)).unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for person in catalog.people() {
        assert_eq!(person.friends.len() as u64, PEOPLE - 1);
        for friend in &person.friends {
            assert!(catalog.person(*friend).unwrap().is_friend_of(person.id));
        }
    }
}

#[test]
fn concurrent_add_and_remove_leave_no_half_edges() {
    let catalog = seeded(0);

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                for round in 0..50 {
                    let a = PersonId(1 + (t + round) % PEOPLE);
                    let b = PersonId(1 + (t * 3 + round * 7) % PEOPLE);
                    if round % 3 == 0 {
                        catalog.remove_friend(a, b).unwrap();
                    } else {
                        catalog.add_friend(a, b).unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for person in catalog.people() {
        for friend in &person.friends {
            assert!(catalog.person(*friend).unwrap().is_friend_of(person.id));
        }
    }
}

#[test]
fn concurrent_likes_count_each_person_once() {
    let catalog = seeded(3);

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                for work in 1..=3 {
                    for person in 1..=PEOPLE / work {
                        catalog.add_like(WorkId(work), PersonId(person)).unwrap();
                    }
                }
                catalog.popular(Some(3))
            })
        })
        .collect();
    for handle in handles {
        let ranked = handle.join().unwrap();
        assert!(ranked.windows(2).all(|w| w[0].like_count() >= w[1].like_count()));
    }

    let counts: Vec<_> = catalog
        .popular(None)
        .iter()
        .map(|w| (w.id.get(), w.like_count()))
        .collect();
    assert_eq!(counts, [(1, 16), (2, 8), (3, 5)]);
}
