//! Saving and restoring collections through a [`KeyValueStore`].
//!
//! Saves serialize the whole collection and replace the stored value; a failure is
//! logged and the write skipped. Loads never fail: a missing key, an unreadable
//! store or undecodable bytes all yield the sample data, and the discarded error is
//! logged so the substitution shows up in diagnostics.

use crate::models::{Match, Team};
use crate::sample;
use crate::store::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Store key for the team collection.
pub const TEAMS_KEY: &str = "saved_teams";
/// Store key for the match collection.
pub const MATCHES_KEY: &str = "saved_matches";

/// Source of "now" for sample match dates.
pub type Clock = fn() -> DateTime<Utc>;

pub struct Persistence<S> {
    store: S,
    clock: Clock,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Utc::now,
        }
    }

    /// Replace the clock used when falling back to sample matches.
    pub fn with_clock(self, clock: Clock) -> Self {
        Self { clock, ..self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns whether the write happened.
    pub fn save_teams(&self, teams: &[Team]) -> bool {
        self.save_value(TEAMS_KEY, teams)
    }

    pub fn load_teams(&self) -> Vec<Team> {
        self.load_value_or_else(TEAMS_KEY, sample::generate_teams)
    }

    /// Returns whether the write happened.
    pub fn save_matches(&self, matches: &[Match]) -> bool {
        self.save_value(MATCHES_KEY, matches)
    }

    pub fn load_matches(&self) -> Vec<Match> {
        let now = (self.clock)();
        self.load_value_or_else(MATCHES_KEY, || sample::generate_matches(now))
    }

    /// Serialize `value` and store it under `key`, replacing what was there.
    pub fn save_value<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let bytes = match serde_json::to_vec(value) {
            Ok(b) => b,
            Err(e) => {
                log::error!("Could not encode {}, skipping save: {}", key, e);
                return false;
            }
        };
        match self.store.set(key, &bytes) {
            Ok(()) => {
                log::debug!("Saved {} ({} bytes)", key, bytes.len());
                true
            }
            Err(e) => {
                log::error!("Could not write {}, skipping save: {}", key, e);
                false
            }
        }
    }

    /// Decode the value under `key`, or `fallback()` when it is absent or unusable.
    pub fn load_value_or_else<T, F>(&self, key: &str, fallback: F) -> T
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let bytes = match self.store.get(key) {
            Ok(Some(b)) => b,
            Ok(None) => {
                log::info!("Nothing stored under {}, using defaults", key);
                return fallback();
            }
            Err(e) => {
                log::warn!("Could not read {}, using defaults: {}", key, e);
                return fallback();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(v) => {
                log::debug!("Loaded {} ({} bytes)", key, bytes.len());
                v
            }
            Err(e) => {
                log::warn!(
                    "Discarding stored {} ({} bytes) that failed to decode: {}",
                    key,
                    bytes.len(),
                    e
                );
                fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchStatus, Player, PlayerRole, TeamColor};
    use crate::store::{MemoryStore, StoreError};
    use chrono::TimeZone;

    fn pinned() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 19, 18, 45, 0).unwrap()
    }

    fn persistence() -> Persistence<MemoryStore> {
        Persistence::new(MemoryStore::new()).with_clock(pinned)
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            Err(StoreError::Poisoned)
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Poisoned)
        }
    }

    #[test]
    fn empty_store_yields_sample_data() {
        let p = persistence();
        assert_eq!(p.load_teams(), sample::generate_teams());
        assert_eq!(p.load_matches(), sample::generate_matches(pinned()));
    }

    #[test]
    fn saved_teams_are_loaded_back() {
        let p = persistence();
        let team = Team::new("Bravo", TeamColor::rgb(1, 2, 3), "shield")
            .with_player(Player::new("Riley Park", "Ace", PlayerRole::Support))
            .unwrap();
        assert!(p.save_teams(&[team.clone()]));
        assert_eq!(p.load_teams(), vec![team]);
    }

    #[test]
    fn empty_collection_is_not_replaced_by_samples() {
        let p = persistence();
        assert!(p.save_matches(&[]));
        assert!(p.load_matches().is_empty());
    }

    #[test]
    fn truncated_teams_fall_back_to_samples() {
        let p = persistence();
        let bytes = serde_json::to_vec(&sample::generate_teams()).unwrap();
        p.store().set(TEAMS_KEY, &bytes[..bytes.len() / 2]).unwrap();
        assert_eq!(p.load_teams(), sample::generate_teams());
    }

    #[test]
    fn schema_mismatch_falls_back_to_samples() {
        let p = persistence();
        p.store().set(MATCHES_KEY, br#"[{"id":"nope","status":"finished"}]"#).unwrap();
        let loaded = p.load_matches();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[1].status, MatchStatus::Scheduled);
    }

    #[test]
    fn broken_store_never_raises() {
        let p = Persistence::new(BrokenStore).with_clock(pinned);
        assert!(!p.save_teams(&sample::generate_teams()));
        assert_eq!(p.load_teams(), sample::generate_teams());
        assert_eq!(p.load_matches().len(), 3);
    }
}
