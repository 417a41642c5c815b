//! Property tests for the catalog
//!
//! Friendship symmetry, like-count bookkeeping, and index consistency
//! over random operation sequences.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use proptest::prelude::*;
use reelgraph_engine::Catalog;
use reelgraph_foundation::{CatalogConfig, PersonDraft, PersonId, WorkDraft, WorkId};

const PEOPLE: u64 = 6;
const WORKS: u64 = 4;

#[derive(Clone, Debug)]
enum Op {
    Befriend(u64, u64),
    Unfriend(u64, u64),
    Like(u64, u64),
    Unlike(u64, u64),
    Rename(u64, u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1..=PEOPLE, 1..=PEOPLE).prop_map(|(a, b)| Op::Befriend(a, b)),
        (1..=PEOPLE, 1..=PEOPLE).prop_map(|(a, b)| Op::Unfriend(a, b)),
        (1..=WORKS, 1..=PEOPLE).prop_map(|(w, p)| Op::Like(w, p)),
        (1..=WORKS, 1..=PEOPLE).prop_map(|(w, p)| Op::Unlike(w, p)),
        (1..=PEOPLE, 0..4u8).prop_map(|(p, n)| Op::Rename(p, n)),
    ]
}

fn seeded() -> Catalog {
    let catalog = Catalog::new(CatalogConfig::default())
        .with_clock(|| NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    for i in 1..=PEOPLE {
        catalog
            .create_person(PersonDraft::new(format!("p{i}@x.io"), format!("user{i}")))
            .unwrap();
    }
    let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    for i in 1..=WORKS {
        catalog.create_work(WorkDraft::new(format!("Work {i}"), date)).unwrap();
    }
    catalog
}

proptest! {
    #[test]
    fn relations_stay_consistent(ops in prop::collection::vec(op(), 0..60)) {
        let catalog = seeded();
        let mut likes: BTreeSet<(u64, u64)> = BTreeSet::new();

        for op in ops {
            match op {
                Op::Befriend(a, b) => catalog.add_friend(PersonId(a), PersonId(b)).unwrap(),
                Op::Unfriend(a, b) => catalog.remove_friend(PersonId(a), PersonId(b)).unwrap(),
                Op::Like(w, p) => {
                    catalog.add_like(WorkId(w), PersonId(p)).unwrap();
                    likes.insert((w, p));
                }
                Op::Unlike(w, p) => {
                    catalog.remove_like(WorkId(w), PersonId(p)).unwrap();
                    likes.remove(&(w, p));
                }
                Op::Rename(p, n) => {
                    // Renames may collide with another person's email; either outcome is fine.
                    let draft = PersonDraft::new(format!("p{n}@x.io"), format!("user{p}"))
                        .with_id(PersonId(p));
                    let _ = catalog.update_person(draft);
                }
            }
        }

        let people = catalog.people();
        for person in &people {
            prop_assert!(!person.friends.contains(&person.id));
            for friend in &person.friends {
                prop_assert!(catalog.person(*friend).unwrap().is_friend_of(person.id));
            }
            let by_email = catalog.people_store().get_by_email(&person.email).unwrap();
            prop_assert_eq!(by_email.id, person.id);
        }

        let emails: BTreeSet<_> = people.iter().map(|p| p.email.to_lowercase()).collect();
        prop_assert_eq!(emails.len(), people.len());

        for work in catalog.works() {
            let expected = likes.iter().filter(|(w, _)| *w == work.id.get()).count();
            prop_assert_eq!(work.like_count(), expected);
        }
    }
}
