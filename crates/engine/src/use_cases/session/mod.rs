//! Session lifecycle: start a game, load it, and run actions against it.
//!
//! Every processed action is one read-modify-write cycle: load the whole
//! session, dispatch in memory, persist the whole session exactly once.
//! Concurrent actions on the same session are not serialized; the last
//! write wins.

use std::sync::Arc;

use echoes_domain::{DomainError, GameSession, LocationId, Player, PlayerId, PlayerName, SessionId};

use crate::infrastructure::ports::{ClockPort, RandomPort, RepoError};
use crate::repositories::SessionRepository;
use crate::use_cases::player_action::{
    ActionDispatcher, ActionOutcome, ActionParams, DispatchError, PlayerVerb,
};
use crate::use_cases::world::{WorldGraph, STARTING_LOCATION_ID};

pub struct SessionManager {
    sessions: Arc<SessionRepository>,
    world: Arc<WorldGraph>,
    dispatcher: Arc<ActionDispatcher>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl SessionManager {
    pub fn new(
        sessions: Arc<SessionRepository>,
        world: Arc<WorldGraph>,
        dispatcher: Arc<ActionDispatcher>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            sessions,
            world,
            dispatcher,
            clock,
            random,
        }
    }

    /// Start a new game in the study, seeding it if this is the first game ever.
    pub async fn create(&self, player_name: Option<&str>) -> Result<GameSession, SessionError> {
        let name = PlayerName::from_optional(player_name)?;

        let start_id = LocationId::from(STARTING_LOCATION_ID);
        let start = self
            .world
            .ensure_seeded(&start_id)
            .await?
            .ok_or(SessionError::LocationIntegrity(start_id))?;

        let player = Player::new(PlayerId::from_uuid(self.random.gen_uuid()), name);
        let session_id = SessionId::from_uuid(self.random.gen_uuid());
        let session = GameSession::start(session_id, player, &start, self.clock.now());

        self.sessions.save(&session).await?;

        tracing::info!(
            session_id = %session.session_id,
            player = %session.player.name,
            location_id = %start.id,
            "Game session created"
        );
        Ok(session)
    }

    pub async fn load(&self, id: SessionId) -> Result<GameSession, SessionError> {
        self.sessions
            .get(id)
            .await?
            .ok_or(SessionError::NotFound(id))
    }

    /// Stamp the session with the current time and write the full document.
    pub async fn persist(&self, session: &mut GameSession) -> Result<(), SessionError> {
        session.stamp(self.clock.now());
        self.sessions.save(session).await?;
        Ok(())
    }

    /// Load, dispatch and persist one player action.
    pub async fn process_action(
        &self,
        id: SessionId,
        verb: &PlayerVerb,
        params: &ActionParams,
    ) -> Result<ActionOutcome, SessionError> {
        let session = self.load(id).await?;

        let ActionOutcome {
            mut session,
            narration,
        } = self.dispatcher.dispatch(session, verb, params).await?;

        self.persist(&mut session).await?;

        tracing::debug!(
            session_id = %id,
            verb = %verb,
            log_len = session.log.len(),
            "Action processed"
        );
        Ok(ActionOutcome { session, narration })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Game session {0} not found")]
    NotFound(SessionId),
    #[error("Location {0} cannot be resolved")]
    LocationIntegrity(LocationId),
    #[error("Persistence failure: {0}")]
    Persistence(#[from] RepoError),
    #[error(transparent)]
    Validation(#[from] DomainError),
}

impl From<DispatchError> for SessionError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::LocationIntegrity(id) => Self::LocationIntegrity(id),
            DispatchError::Repo(e) => Self::Persistence(e),
        }
    }
}
