//! Value objects - Immutable objects defined by their attributes

mod names;
mod narration_speed;
mod object_state;

pub use names::{PlayerName, DEFAULT_PLAYER_NAME};
pub use narration_speed::NarrationSpeed;
pub use object_state::{FlagValue, ObjectFlags, ObjectStateTracker};
