//! In-memory doubles for the remote service.
//!
//! Used by the test suites and by the binary's `--offline-demo` mode.

pub mod stubs;
