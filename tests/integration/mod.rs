//! Integration test entry point
//!
//! Declared as a single `[[test]]` target so helpers are shared across files.

mod helpers;
mod test_changed;
