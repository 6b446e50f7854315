//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names are camelCase on the wire; identifiers are plain strings.

pub mod common_dto;
pub mod game_dto;
pub mod leaderboard_dto;
pub mod score_dto;
pub mod user_dto;

pub use common_dto::*;
pub use game_dto::*;
pub use leaderboard_dto::*;
pub use score_dto::*;
pub use user_dto::*;
