//! Announce processing: line in, releases pushed to every arr client out.

mod processor;
mod types;

pub use processor::AnnounceProcessor;
pub use types::*;
