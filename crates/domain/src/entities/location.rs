//! Location templates - nodes of the world graph.
//!
//! Locations, their objects and their exits are authored content. Play never
//! rewrites them; per-session progress lives in the session's
//! [`ObjectStateTracker`](crate::value_objects::ObjectStateTracker).

use serde::{Deserialize, Serialize};

use crate::ids::{ClueId, LocationId, ObjectId};

/// Unicode-aware case-insensitive comparison.
fn same_label(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Something in a location the player can examine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractableObject {
    pub id: ObjectId,
    pub name: String,
    /// Short description
    pub description: String,
    /// Revealed on closer examination
    #[serde(default)]
    pub detailed_description: Option<String>,
    /// Sound effect key played on interaction
    #[serde(default)]
    pub interaction_sfx: Option<String>,
    /// Clues this object can reveal
    #[serde(default)]
    pub related_clues: Vec<ClueId>,
}

impl InteractableObject {
    pub fn new(
        id: impl Into<ObjectId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            detailed_description: None,
            interaction_sfx: None,
            related_clues: Vec::new(),
        }
    }

    pub fn with_detailed_description(mut self, detail: impl Into<String>) -> Self {
        self.detailed_description = Some(detail.into());
        self
    }

    pub fn with_interaction_sfx(mut self, key: impl Into<String>) -> Self {
        self.interaction_sfx = Some(key.into());
        self
    }

    pub fn with_clue(mut self, clue: impl Into<ClueId>) -> Self {
        self.related_clues.push(clue.into());
        self
    }

    /// Text shown when the object is examined: the detailed description if
    /// authored, otherwise the short one.
    pub fn examination_text(&self) -> &str {
        self.detailed_description
            .as_deref()
            .unwrap_or(&self.description)
    }

    pub fn is_named(&self, name: &str) -> bool {
        same_label(&self.name, name)
    }
}

/// A directed, labelled edge to another location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exit {
    /// e.g. "north", "hallway", "through the archway"
    pub direction: String,
    pub to_location_id: LocationId,
    #[serde(default)]
    pub description: Option<String>,
}

impl Exit {
    pub fn new(direction: impl Into<String>, to: impl Into<LocationId>) -> Self {
        Self {
            direction: direction.into(),
            to_location_id: to.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Direction labels compare case-insensitively.
    pub fn leads(&self, direction: &str) -> bool {
        same_label(&self.direction, direction)
    }
}

/// A location template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    /// Base description, read out on look and on arrival
    pub description_template: String,
    #[serde(default)]
    pub ambient_sfx_key: Option<String>,
    #[serde(default)]
    pub objects: Vec<InteractableObject>,
    #[serde(default)]
    pub exits: Vec<Exit>,
    #[serde(default)]
    pub visited: bool,
}

impl Location {
    pub fn new(
        id: impl Into<LocationId>,
        name: impl Into<String>,
        description_template: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description_template: description_template.into(),
            ambient_sfx_key: None,
            objects: Vec::new(),
            exits: Vec::new(),
            visited: false,
        }
    }

    pub fn with_ambient_sfx(mut self, key: impl Into<String>) -> Self {
        self.ambient_sfx_key = Some(key.into());
        self
    }

    pub fn with_object(mut self, object: InteractableObject) -> Self {
        self.objects.push(object);
        self
    }

    pub fn with_exit(mut self, exit: Exit) -> Self {
        self.exits.push(exit);
        self
    }

    pub fn with_visited(mut self, visited: bool) -> Self {
        self.visited = visited;
        self
    }

    /// First object whose name matches, ignoring case.
    pub fn find_object(&self, name: &str) -> Option<&InteractableObject> {
        self.objects.iter().find(|o| o.is_named(name))
    }

    /// First exit whose direction matches, ignoring case.
    pub fn find_exit(&self, direction: &str) -> Option<&Exit> {
        self.exits.iter().find(|e| e.leads(direction))
    }
}
