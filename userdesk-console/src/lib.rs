//! userdesk console library
//!
//! This crate contains the surfaces used by the `userdesk` executable in
//! `src/main.rs`: the user management domain, the runtime that drives it,
//! the HTTP adapter for the remote service and the command-line front-end.
//!
//! Notes
//! - Most consumers should use the `userdesk` binary; the library is exposed
//!   mainly to enable integration testing against the in-memory service.

pub mod cli;
pub mod common;
pub mod domains;
pub mod infra;
pub mod runtime;
