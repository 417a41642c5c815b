//! Integration tests for Layer 1: Storage
//!
//! Tests for identifier allocation, indexed stores, and concurrent access.

mod concurrency;
mod works;
