//! Domain layer: identifiers, persisted records, and ranking rules.
//!
//! This module contains the server-side domain model: game and user
//! identity, the best-score record with its monotonic update rule, per-user
//! aggregates, registered games, community activities, and the pure
//! functions that turn stored records into ranked leaderboards.

pub mod activity;
pub mod game;
pub mod ids;
pub mod ranking;
pub mod score_record;
pub mod user_aggregate;

pub use activity::{ActivityKind, CommunityActivity};
pub use game::Game;
pub use ids::{GameId, UserId};
pub use ranking::{RankedScore, RankedUser};
pub use score_record::{ScoreRecord, ScoreUpdate};
pub use user_aggregate::{UserAggregate, UserMeta};
