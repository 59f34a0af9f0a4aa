pub mod flight;
pub mod query;
pub mod wolfram;
