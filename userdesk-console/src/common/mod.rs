pub mod generation;
pub mod messages;
pub mod task;

pub use generation::{Generation, GenerationCounter};
pub use messages::DomainUpdateResult;
pub use task::Task;
