//! Per-user running totals and profile metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;

/// Display name used when nothing better is known about a player.
pub const ANONYMOUS_PLAYER: &str = "Anonymous Player";

/// Persisted running totals for one user across all games.
///
/// `total_points` is the sum of every accepted submission's score (delta
/// accumulation, not a sum of per-game bests) and `games_played` counts
/// accepted submissions. Both only ever grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAggregate {
    /// Owner of the totals.
    pub user_id: UserId,
    /// Name shown on leaderboards.
    pub display_name: String,
    /// Sum of accepted submission scores.
    pub total_points: u64,
    /// Number of accepted submissions.
    pub games_played: u64,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the last accepted submission or profile update.
    pub last_active: DateTime<Utc>,
}

impl UserAggregate {
    /// Creates an aggregate with zero totals.
    #[must_use]
    pub fn new(user_id: UserId, display_name: String, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            display_name,
            total_points: 0,
            games_played: 0,
            created_at: now,
            last_active: now,
        }
    }

    /// Adds one accepted submission to the totals.
    pub fn record_accepted(&mut self, score: u64, now: DateTime<Utc>) {
        self.total_points = self.total_points.saturating_add(score);
        self.games_played = self.games_played.saturating_add(1);
        self.last_active = now;
    }
}

/// Optional player metadata sent by game clients alongside a score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMeta {
    /// Name chosen by the player.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Linked Google account.
    #[serde(default)]
    pub google: Option<GoogleAccount>,
    /// Linked wallet.
    #[serde(default)]
    pub wallet: Option<WalletAccount>,
}

/// Google account details forwarded by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleAccount {
    /// Account holder's name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Wallet details forwarded by the identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    /// Wallet address.
    #[serde(default)]
    pub address: Option<String>,
}

impl UserMeta {
    /// Derives the initial display name for a new profile.
    ///
    /// Preference order: Google name, shortened wallet address, explicit
    /// display name, [`ANONYMOUS_PLAYER`].
    #[must_use]
    pub fn derive_display_name(&self) -> String {
        let google = self
            .google
            .as_ref()
            .and_then(|g| non_blank(g.name.as_deref()));
        if let Some(name) = google {
            return name.to_string();
        }
        let wallet = self
            .wallet
            .as_ref()
            .and_then(|w| non_blank(w.address.as_deref()));
        if let Some(address) = wallet {
            return shorten_address(address);
        }
        non_blank(self.display_name.as_deref())
            .map_or_else(|| ANONYMOUS_PLAYER.to_string(), str::to_string)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Shortens `0x1234567890abcdef` to `0x1234...cdef`.
fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars.iter().take(6).collect();
    let tail: String = chars.iter().skip(chars.len() - 4).collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn record_accepted_accumulates_deltas() {
        let Ok(user) = UserId::parse("u1") else {
            panic!("valid id");
        };
        let mut agg = UserAggregate::new(user, "Ann".into(), Utc::now());
        for score in [10, 20, 5] {
            agg.record_accepted(score, Utc::now());
        }
        assert_eq!(agg.total_points, 35);
        assert_eq!(agg.games_played, 3);
    }

    #[test]
    fn google_name_wins() {
        let meta = UserMeta {
            display_name: Some("chosen".into()),
            google: Some(GoogleAccount {
                name: Some("Ada Lovelace".into()),
            }),
            wallet: Some(WalletAccount {
                address: Some("0x1234567890abcdef".into()),
            }),
        };
        assert_eq!(meta.derive_display_name(), "Ada Lovelace");
    }

    #[test]
    fn wallet_address_is_shortened() {
        let meta = UserMeta {
            wallet: Some(WalletAccount {
                address: Some("0x1234567890abcdef".into()),
            }),
            ..UserMeta::default()
        };
        assert_eq!(meta.derive_display_name(), "0x1234...cdef");
    }

    #[test]
    fn falls_back_to_anonymous() {
        assert_eq!(UserMeta::default().derive_display_name(), ANONYMOUS_PLAYER);
        let blank = UserMeta {
            display_name: Some("   ".into()),
            ..UserMeta::default()
        };
        assert_eq!(blank.derive_display_name(), ANONYMOUS_PLAYER);
    }
}
