pub mod worker;

pub use worker::{spawn_worker, ApiCommand, ApiEvent};
