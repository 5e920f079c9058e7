use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::services::common::Property;

use super::{MediaPlayerHandle, PlayerFacade, PlayerId, PlayerRole};

/// Registry of live player facades, keyed by logical role.
///
/// The embedding UI registers a facade once its concrete player signals
/// readiness and unregisters it when the owning element unmounts. Consumers
/// look facades up per role at command time and never cache them across a
/// registration cycle.
#[derive(Clone)]
pub struct PlayerRegistry {
    players: Arc<RwLock<HashMap<PlayerRole, Arc<PlayerFacade>>>>,
    player_list: Property<Vec<Arc<PlayerFacade>>>,
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            players: Arc::new(RwLock::new(HashMap::new())),
            player_list: Property::new(Vec::new()),
        }
    }

    /// Register a concrete player under a logical role.
    ///
    /// Replaces any facade previously registered for the role (the UI may
    /// rebuild a player widget in place, e.g. on video ID change).
    pub async fn register(
        &self,
        id: PlayerId,
        role: PlayerRole,
        handle: Arc<dyn MediaPlayerHandle>,
    ) -> Arc<PlayerFacade> {
        let facade = Arc::new(PlayerFacade::new(id, role.clone(), handle));

        let mut players = self.players.write().await;
        players.insert(role.clone(), Arc::clone(&facade));
        self.player_list.set(players.values().cloned().collect());
        debug!("player registered for role {role}");

        facade
    }

    /// Remove the facade registered under `role`, if any.
    pub async fn unregister(&self, role: &PlayerRole) {
        let mut players = self.players.write().await;
        if players.remove(role).is_some() {
            self.player_list.set(players.values().cloned().collect());
            debug!("player unregistered for role {role}");
        }
    }

    /// Look up the facade for a role.
    pub async fn get(&self, role: &PlayerRole) -> Option<Arc<PlayerFacade>> {
        self.players.read().await.get(role).cloned()
    }

    /// Facade for the main presentation player, if registered.
    pub async fn main(&self) -> Option<Arc<PlayerFacade>> {
        self.get(&PlayerRole::Main).await
    }

    /// Facade for the background bed player, if registered.
    pub async fn background(&self) -> Option<Arc<PlayerFacade>> {
        self.get(&PlayerRole::Background).await
    }

    /// Snapshot of all currently registered facades.
    pub fn players(&self) -> Vec<Arc<PlayerFacade>> {
        self.player_list.get()
    }

    /// Stream that emits the facade list whenever registrations change.
    pub fn players_monitored(&self) -> impl futures::Stream<Item = Vec<Arc<PlayerFacade>>> + Send {
        self.player_list.watch()
    }
}
