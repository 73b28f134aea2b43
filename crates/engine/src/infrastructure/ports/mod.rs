//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Document persistence (could swap SQLite -> Firestore/Postgres)
//! - Narration audio (could swap HTTP TTS -> a local synthesizer)
//! - Clock/Random (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{collections, Document, DocumentStore, InsertOutcome};

#[cfg(test)]
pub use repos::MockDocumentStore;

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{NarrationAudioPort, VoiceSettings, DEFAULT_AUDIO_ENCODING};

#[cfg(test)]
pub use external::MockNarrationAudioPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::{ClockPort, RandomPort};

#[cfg(test)]
pub use testing::{MockClockPort, MockRandomPort};

// =============================================================================
// Error Types
// =============================================================================
pub use error::{AudioError, RepoError};
