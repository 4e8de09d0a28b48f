//! Property-based tests for cocktail search
//!
//! Property tests verify invariants that should hold for all inputs, rather
//! than testing specific cases.
//!
//! ## Running Property Tests
//!
//! ```sh
//! cargo test property --release
//! ```
//!
//! ## Test Modules
//!
//! - `ingredient_state_props`: fragment encoding and field derivation
//!   - Encode/decode round trip
//!   - Separator count
//!   - Order-preserving derivation
//!
//! - `field_set_props`: the always-one-spare field list under random events
//!
//! - `history_sync_props`: push/replace discipline and restore
//!
//! ## Configuration
//!
//! By default, proptest runs 256 cases per property. This can be configured
//! via the `PROPTEST_CASES` environment variable.

mod field_set_props;
