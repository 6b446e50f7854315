//! Service layer: business logic orchestration.
//!
//! [`ScoreService`] applies submissions, [`LeaderboardService`] answers
//! ranking queries, and the remaining services manage profiles, games and
//! the community feed. Every service receives its
//! [`crate::store::StoreHandle`] at construction.

pub mod activity_service;
pub mod aggregate;
pub mod game_service;
pub mod leaderboard_service;
pub mod profile_service;
pub mod score_service;

pub use activity_service::ActivityService;
pub use aggregate::AggregateUpdater;
pub use game_service::{GameService, RegisteredGame};
pub use leaderboard_service::LeaderboardService;
pub use profile_service::ProfileService;
pub use score_service::{ScoreService, SubmissionOutcome};
