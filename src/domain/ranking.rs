//! Leaderboard ordering and positional rank assignment.
//!
//! Leaderboards are derived views: they are recomputed from the stored
//! records on every read and never persisted. Ranks are positional, so
//! tied scores receive consecutive distinct ranks; the order among ties is
//! fixed by a secondary key so that repeated reads are identical.
//!
//! | Board  | Primary key         | Tie-break                          |
//! |--------|---------------------|------------------------------------|
//! | Game   | `score` desc        | `updated_at` asc, then `user_id`   |
//! | Global | `total_points` desc | `created_at` asc, then `user_id`   |

use std::cmp::Ordering;

use serde::Serialize;

use super::{ScoreRecord, UserAggregate, UserId};

/// Default and maximum number of leaderboard rows returned.
pub const MAX_LEADERBOARD_LIMIT: usize = 100;

/// A ranked row of a per-game leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedScore {
    /// 1-based position.
    pub rank: usize,
    /// Underlying record.
    pub record: ScoreRecord,
}

/// A ranked row of the global leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedUser {
    /// 1-based position.
    pub rank: usize,
    /// Underlying aggregate.
    pub aggregate: UserAggregate,
}

fn by_score(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| a.updated_at.cmp(&b.updated_at))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

fn by_points(a: &UserAggregate, b: &UserAggregate) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

/// Sorts game records best-first and assigns ranks to the first `limit`.
#[must_use]
pub fn rank_scores(mut records: Vec<ScoreRecord>, limit: usize) -> Vec<RankedScore> {
    records.sort_by(by_score);
    records
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, record)| RankedScore {
            rank: i + 1,
            record,
        })
        .collect()
}

/// Sorts user aggregates best-first and assigns ranks to the first `limit`.
#[must_use]
pub fn rank_users(mut aggregates: Vec<UserAggregate>, limit: usize) -> Vec<RankedUser> {
    aggregates.sort_by(by_points);
    aggregates
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, aggregate)| RankedUser {
            rank: i + 1,
            aggregate,
        })
        .collect()
}

/// Returns the 1-based rank of `user_id` among all `records`, if present.
///
/// Full scan: the whole board is ordered, then searched linearly.
#[must_use]
pub fn rank_of(mut records: Vec<ScoreRecord>, user_id: &UserId) -> Option<usize> {
    records.sort_by(by_score);
    records
        .iter()
        .position(|r| &r.user_id == user_id)
        .map(|i| i + 1)
}
