//! Echoes Engine library.
//!
//! This crate contains all server-side code for the Echoes of the Unseen
//! interactive-fiction engine.
//!
//! ## Structure
//!
//! - `repositories/` - Typed access to stored session and location documents
//! - `use_cases/` - World graph, narration rules, action dispatch, sessions, audio
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod repositories;
pub mod use_cases;

/// Test fixtures shared by unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
