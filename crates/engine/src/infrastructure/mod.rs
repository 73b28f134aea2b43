//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod memory_store;
pub mod ports;
pub mod sqlite_store;
pub mod tts;
