//! # playrush-gateway
//!
//! Score submission and leaderboard service for the Playrush game portal.
//!
//! Games submit scores on behalf of authenticated players. The gateway
//! keeps one best score per player per game, raises the player's lifetime
//! total only when that best improves, and answers per-game and global
//! leaderboard queries.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── Identity (identity/)   bearer tokens, game API keys
//!     │
//!     ├── ScoreService, LeaderboardService, ... (service/)
//!     ├── Ranking and score rules (domain/)
//!     │
//!     └── Store (store/)  in-memory or PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod identity;
pub mod service;
pub mod store;
