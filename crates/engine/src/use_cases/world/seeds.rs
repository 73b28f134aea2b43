//! Built-in location templates that can be created on first visit.

use std::collections::BTreeMap;

use echoes_domain::{Exit, InteractableObject, Location, LocationId};

/// Where every new session begins.
pub const STARTING_LOCATION_ID: &str = "listener_study";

/// Hallway reached from the study; created the first time someone walks into it.
pub const PLACEHOLDER_HALLWAY_ID: &str = "placeholder_hallway";

/// Templates the world graph may create when a location is first needed.
#[derive(Debug, Clone, Default)]
pub struct SeedCatalog {
    templates: BTreeMap<LocationId, Location>,
}

impl SeedCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The study and hallway that every fresh world starts with.
    pub fn builtin() -> Self {
        Self::empty()
            .with_template(listener_study())
            .with_template(placeholder_hallway())
    }

    pub fn with_template(mut self, location: Location) -> Self {
        self.templates.insert(location.id.clone(), location);
        self
    }

    pub fn template(&self, id: &LocationId) -> Option<&Location> {
        self.templates.get(id)
    }

    pub fn contains(&self, id: &LocationId) -> bool {
        self.templates.contains_key(id)
    }
}

fn listener_study() -> Location {
    Location::new(
        STARTING_LOCATION_ID,
        "The Listener's Study",
        "You are in your study. It's quiet, save for the gentle hum of your old computer in \
         the corner. A large wooden desk stands before you, and a rain-streaked window looks \
         out onto the street.",
    )
    .with_ambient_sfx("study_ambience_hum")
    .with_object(
        InteractableObject::new(
            "desk",
            "Desk",
            "A large, sturdy wooden desk. It looks mostly clear.",
        )
        .with_detailed_description(
            "The desk is made of dark oak. The surface is cool to the touch. Most of it is \
             clear, but there's a small, almost hidden drawer on the underside.",
        ),
    )
    .with_object(
        InteractableObject::new(
            "window",
            "Window",
            "The window shows a grey, rainy day outside.",
        )
        .with_detailed_description(
            "Raindrops trace paths down the glass, distorting the view of the empty street. \
             The latch seems secure.",
        ),
    )
    .with_object(
        InteractableObject::new(
            "computer",
            "Computer",
            "Your old computer hums quietly in the corner.",
        )
        .with_detailed_description(
            "It's an older model, but reliable. The screen is dark right now, but the power \
             LED is on.",
        ),
    )
    .with_exit(
        Exit::new("hallway", PLACEHOLDER_HALLWAY_ID)
            .with_description("A door leads to the hallway."),
    )
    .with_visited(true)
}

fn placeholder_hallway() -> Location {
    Location::new(
        PLACEHOLDER_HALLWAY_ID,
        "A Dusty Hallway",
        "You are in a dusty hallway. It's quite featureless, except for a door back to the \
         study.",
    )
    .with_exit(
        Exit::new("study", STARTING_LOCATION_ID).with_description("The door back to the study."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_links_study_and_hallway() {
        let catalog = SeedCatalog::builtin();
        let study = catalog
            .template(&LocationId::from(STARTING_LOCATION_ID))
            .unwrap();
        let hallway = catalog
            .template(&LocationId::from(PLACEHOLDER_HALLWAY_ID))
            .unwrap();

        assert!(study.visited);
        assert_eq!(study.objects.len(), 3);
        assert_eq!(
            study.find_exit("hallway").map(|e| e.to_location_id.clone()),
            Some(hallway.id.clone())
        );
        assert_eq!(
            hallway.find_exit("STUDY").map(|e| e.to_location_id.clone()),
            Some(study.id.clone())
        );
        assert!(hallway.objects.is_empty());
    }

    #[test]
    fn unknown_ids_are_not_seedable() {
        let catalog = SeedCatalog::builtin();
        assert!(!catalog.contains(&LocationId::from("the_void")));
        assert!(SeedCatalog::empty().template(&LocationId::from(STARTING_LOCATION_ID)).is_none());
    }
}
