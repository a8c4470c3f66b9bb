//! Integration test suite.
//!
//! 1. File-backed record persistence
//! 2. Synchronization workflow as seen by an owning collection

pub mod file_persistence_tests;
pub mod helpers;
pub mod sync_workflow_tests;
