//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::identity::{ApiKeyHasher, IdentityVerifier};
use crate::service::{
    ActivityService, AggregateUpdater, GameService, LeaderboardService, ProfileService,
    ScoreService,
};
use crate::store::StoreHandle;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Score submission handler.
    pub score_service: Arc<ScoreService>,
    /// Leaderboard query engine.
    pub leaderboard_service: Arc<LeaderboardService>,
    /// Profile reads and edits.
    pub profile_service: Arc<ProfileService>,
    /// Game registry.
    pub game_service: Arc<GameService>,
    /// Community feed.
    pub activity_service: Arc<ActivityService>,
    /// Bearer token verification.
    pub identity: Arc<dyn IdentityVerifier>,
    /// Store handle, for health reporting.
    pub store: StoreHandle,
    /// Loaded configuration.
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Wires every service over one store handle.
    #[must_use]
    pub fn new(
        store: StoreHandle,
        identity: Arc<dyn IdentityVerifier>,
        config: GatewayConfig,
    ) -> Self {
        let hasher = ApiKeyHasher::new(config.api_key_salt.clone());
        let games = GameService::new(store.clone(), hasher);
        let profiles = ProfileService::new(store.clone());
        let activities = ActivityService::new(store.clone());
        let score_service = ScoreService::new(
            store.clone(),
            games.clone(),
            profiles.clone(),
            AggregateUpdater::new(store.clone()),
            activities.clone(),
        );

        Self {
            score_service: Arc::new(score_service),
            leaderboard_service: Arc::new(LeaderboardService::new(store.clone())),
            profile_service: Arc::new(profiles),
            game_service: Arc::new(games),
            activity_service: Arc::new(activities),
            identity,
            store,
            config: Arc::new(config),
        }
    }
}
