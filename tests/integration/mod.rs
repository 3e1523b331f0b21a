//! Integration tests for the tracker, the store and the snapshot format

mod snapshot_tests;
mod tracker_workflow;
