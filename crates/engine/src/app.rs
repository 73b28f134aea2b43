//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ClockPort, DocumentStore, NarrationAudioPort, RandomPort};
use crate::repositories::{LocationRepository, SessionRepository};
use crate::use_cases::{
    ActionDispatcher, NarrateText, NarrationRules, SeedCatalog, SessionManager, WorldGraph,
};

/// Main application state.
///
/// Holds all repositories and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repositories.
pub struct Repositories {
    pub sessions: Arc<SessionRepository>,
    pub locations: Arc<LocationRepository>,
}

/// Container for all use cases.
pub struct UseCases {
    pub world: Arc<WorldGraph>,
    pub actions: Arc<ActionDispatcher>,
    pub sessions: Arc<SessionManager>,
    pub narrate: Arc<NarrateText>,
}

impl App {
    /// Compose the app with the built-in world content.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        audio: Arc<dyn NarrationAudioPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self::with_content(
            store,
            audio,
            clock,
            random,
            SeedCatalog::builtin(),
            NarrationRules::builtin(),
        )
    }

    pub fn with_content(
        store: Arc<dyn DocumentStore>,
        audio: Arc<dyn NarrationAudioPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        seeds: SeedCatalog,
        rules: NarrationRules,
    ) -> Self {
        let repositories = Repositories {
            sessions: Arc::new(SessionRepository::new(store.clone())),
            locations: Arc::new(LocationRepository::new(store)),
        };

        let world = Arc::new(WorldGraph::new(repositories.locations.clone(), seeds));
        let actions = Arc::new(ActionDispatcher::new(world.clone(), Arc::new(rules)));
        let sessions = Arc::new(SessionManager::new(
            repositories.sessions.clone(),
            world.clone(),
            actions.clone(),
            clock,
            random,
        ));
        let narrate = Arc::new(NarrateText::new(audio, repositories.sessions.clone()));

        Self {
            repositories,
            use_cases: UseCases {
                world,
                actions,
                sessions,
                narrate,
            },
        }
    }
}
