//! Integration tests for Layer 0: Foundation
//!
//! Tests for identifiers, errors, records, and field validation.

mod errors;
