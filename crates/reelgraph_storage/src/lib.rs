//! Identifier allocation and indexed entity stores for Reelgraph.
//!
//! This crate provides:
//! - [`IdAllocator`] - Monotonic identifier issuance
//! - [`Record`] - What a store needs to know about an entity kind
//! - [`IndexedStore`] - Primary records plus a secondary uniqueness index
//! - [`WorkStore`] / [`PersonStore`] - The two instantiations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod allocator;
mod people;
mod record;
mod store;
mod works;

pub use allocator::IdAllocator;
pub use people::PersonStore;
pub use record::Record;
pub use store::{IndexedStore, Transaction, View};
pub use works::WorkStore;
