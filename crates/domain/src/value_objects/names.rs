//! Validated name newtypes for domain entities
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for a player name
const MAX_PLAYER_NAME_LENGTH: usize = 100;

/// Name given to players who start a game without choosing one
pub const DEFAULT_PLAYER_NAME: &str = "The Listener";

// ============================================================================
// PlayerName
// ============================================================================

/// A validated player name (non-empty, <=100 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Create a new validated player name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 100 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Player name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_PLAYER_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Player name cannot exceed {} characters",
                MAX_PLAYER_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Resolve an optional, user-supplied name.
    ///
    /// Missing or blank input yields [`DEFAULT_PLAYER_NAME`]; anything else
    /// goes through the usual validation.
    pub fn from_optional(name: Option<&str>) -> Result<Self, DomainError> {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => Self::new(name),
            None => Ok(Self::default()),
        }
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PlayerName {
    fn default() -> Self {
        Self(DEFAULT_PLAYER_NAME.to_string())
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PlayerName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> String {
        name.0
    }
}
