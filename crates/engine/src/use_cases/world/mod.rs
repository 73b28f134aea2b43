//! World graph: location templates addressable by id, with lazy seeding.

mod seeds;

pub use seeds::{SeedCatalog, PLACEHOLDER_HALLWAY_ID, STARTING_LOCATION_ID};

use std::sync::Arc;

use echoes_domain::{Location, LocationId};

use crate::infrastructure::ports::RepoError;
use crate::repositories::LocationRepository;

/// Read access to locations, creating well-known ones on first use.
pub struct WorldGraph {
    locations: Arc<LocationRepository>,
    seeds: SeedCatalog,
}

impl WorldGraph {
    pub fn new(locations: Arc<LocationRepository>, seeds: SeedCatalog) -> Self {
        Self { locations, seeds }
    }

    pub async fn get(&self, id: &LocationId) -> Result<Option<Location>, RepoError> {
        self.locations.get(id).await
    }

    /// Return the stored location, seeding it from the catalog if it is absent.
    ///
    /// Concurrent seeders converge on whichever definition was stored first.
    /// Returns `None` when the id is neither stored nor a known template.
    pub async fn ensure_seeded(&self, id: &LocationId) -> Result<Option<Location>, RepoError> {
        if let Some(location) = self.locations.get(id).await? {
            return Ok(Some(location));
        }

        let Some(template) = self.seeds.template(id) else {
            return Ok(None);
        };

        let (stored, inserted) = self.locations.insert_if_absent(template).await?;
        if inserted {
            tracing::info!(location_id = %id, "Seeded location from template");
        } else {
            tracing::debug!(location_id = %id, "Location was seeded concurrently, using stored copy");
        }
        Ok(Some(stored))
    }
}
