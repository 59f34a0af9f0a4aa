pub mod cache;

pub use cache::{spawn_sweeper, ResponseCache};
