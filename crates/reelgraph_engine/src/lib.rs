//! Uniqueness guard, relationship graph, ranking, and catalog facade for Reelgraph.
//!
//! This crate provides:
//! - [`Guard`] - Pre-write duplicate and existence checks
//! - [`RelationshipGraph`] - Friendship and like edges between records
//! - [`Ranking`] - Popularity ordering of works
//! - [`Catalog`] - The operations an adapter layer calls

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod catalog;
mod graph;
mod guard;
mod ranking;

pub use catalog::Catalog;
pub use graph::RelationshipGraph;
pub use guard::Guard;
pub use ranking::Ranking;
