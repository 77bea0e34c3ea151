pub mod user_admin;

pub use user_admin::{
    StubCall, StubOperation, StubUserAdminService, demo_users,
};
