//! Pushing releases to arr applications.
//!
//! This module provides an `ArrClient` trait with one HTTP adapter serving the
//! Sonarr, Radarr, Lidarr, Readarr and Whisparr `release/push` APIs, and the
//! interpreter that folds their response shapes into a single `PushOutcome`.

mod client;
mod interpret;
mod types;

pub use client::ArrHttpClient;
pub use interpret::interpret;
pub use types::*;
