//! ts-server: HTTP boundary for Task Suggest.
//!
//! Accepts `{ utterance, userId, sessionId, timestamp }`, validates it, and
//! answers `{ task, timestamp }`. No matching logic lives here.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
