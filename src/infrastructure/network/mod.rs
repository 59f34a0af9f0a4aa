pub mod client;
pub mod http;
pub mod normalize;
pub mod wolfram;

// Re-export for convenience
pub use client::HttpUpstream;
pub use wolfram::WolframKind;
