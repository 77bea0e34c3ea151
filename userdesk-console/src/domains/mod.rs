//! Domain modules for the userdesk console
//!
//! Each domain owns its state and an update function; the runtime drives
//! them with messages.

pub mod user_management;
