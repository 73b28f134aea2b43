//! Use cases - player-facing operations.
//!
//! Each module orchestrates repositories and ports for one concern.

pub mod audio;
pub mod narration;
pub mod player_action;
pub mod session;
pub mod world;

pub use audio::{NarrateError, NarrateText};
pub use narration::{NarrationRule, NarrationRules};
pub use player_action::{ActionDispatcher, ActionOutcome, ActionParams, DispatchError, PlayerVerb};
pub use session::{SessionError, SessionManager};
pub use world::{SeedCatalog, WorldGraph};
