//! Canonical release records produced from matched announce lines.

mod normalize;
mod size;
mod types;

pub use normalize::normalize;
pub use size::parse_size_bytes;
pub use types::Release;
