//! Helpers for testing hosts and accessors.
//!
//! Available behind the `test-utils` feature flag.

mod recording_hook;

pub use recording_hook::{RecordedConstruction, RecordingHook};
