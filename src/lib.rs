//! Reelgraph - in-memory storage and relationship engine
//!
//! This crate re-exports all layers of the Reelgraph system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: reelgraph_engine     : Guard, relationship graph, ranking, catalog
//! Layer 1: reelgraph_storage    : Identifier allocation, indexed entity stores
//! Layer 0: reelgraph_foundation : Ids, records, errors, validation, config
//! ```

pub use reelgraph_engine as engine;
pub use reelgraph_foundation as foundation;
pub use reelgraph_storage as storage;
