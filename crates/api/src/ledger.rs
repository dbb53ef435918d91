// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The stats ledger chokepoint.
//!
//! Every change to a user's counters or rating flows through
//! [`StatsLedger`]. Records are created on first touch, monthly counters are
//! reset lazily, and decrements clamp at zero.
//!
//! Effects are applied after the goal document has been written. A failure
//! here does not roll the goal back: every effect is still attempted, each
//! failure is logged, and the first one is returned.

use goaltrack::LedgerEffect;
use goaltrack_domain::{CounterOutcome, StatsChange, UserId, UserStats};
use goaltrack_persistence::{PersistenceError, ProfileData, ProfileStore, UserStatsStore};
use time::OffsetDateTime;
use tracing::{debug, error, info, warn};

use crate::error::{ApiError, translate_persistence_error};
use crate::request_response::UserStatsResponse;

/// Applies ledger changes against a stats and profile store.
pub struct StatsLedger<'a, S: UserStatsStore + ProfileStore> {
    store: &'a mut S,
    now: OffsetDateTime,
}

impl<'a, S: UserStatsStore + ProfileStore> StatsLedger<'a, S> {
    /// Creates a ledger operating at `now`.
    pub const fn new(store: &'a mut S, now: OffsetDateTime) -> Self {
        Self { store, now }
    }

    /// Loads the user's stats, creating a zeroed record if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn ensure_exists(&mut self, user_id: &UserId) -> Result<UserStats, PersistenceError> {
        if let Some(stats) = self.store.find_user_stats(user_id)? {
            return Ok(stats);
        }
        let stats: UserStats = UserStats::new(user_id.clone(), self.now);
        self.store.insert_user_stats(&stats)?;
        debug!(user_id = %user_id, "Created stats record");
        Ok(stats)
    }

    fn apply_change(
        &mut self,
        user_id: &UserId,
        change: StatsChange,
    ) -> Result<(), PersistenceError> {
        let mut stats: UserStats = self.ensure_exists(user_id)?;
        if change.touches_monthly_counter() && stats.reset_if_stale(self.now) {
            info!(user_id = %user_id, "Reset monthly counters");
        }
        if stats.apply_change(change) == CounterOutcome::ClampedAtZero {
            warn!(
                user_id = %user_id,
                change = change.as_str(),
                "Counter decrement clamped at zero"
            );
        }
        self.store.update_user_stats(&stats)
    }

    fn apply_rating(&mut self, user_id: &UserId, delta: i64) -> Result<(), PersistenceError> {
        if delta == 0 {
            return Ok(());
        }
        let rating: i64 = self.store.adjust_rating(user_id, delta)?;
        debug!(user_id = %user_id, delta, rating, "Adjusted rating");
        Ok(())
    }

    /// Applies every effect in order.
    ///
    /// # Errors
    ///
    /// Returns the first failure as `ApiError::Internal` after all effects
    /// have been attempted.
    pub fn apply_effects(&mut self, effects: &[LedgerEffect]) -> Result<(), ApiError> {
        let mut first_failure: Option<PersistenceError> = None;

        for effect in effects {
            let result: Result<(), PersistenceError> = match effect {
                LedgerEffect::Stats { user_id, change } => self.apply_change(user_id, *change),
                LedgerEffect::Rating { user_id, delta } => self.apply_rating(user_id, *delta),
            };
            if let Err(e) = result {
                error!(user_id = %effect.user_id(), error = %e, "Failed to apply ledger effect");
                first_failure.get_or_insert(e);
            }
        }

        match first_failure {
            None => Ok(()),
            Some(e) => Err(ApiError::Internal {
                message: format!("Failed to update statistics: {e}"),
            }),
        }
    }

    /// Returns the user's counters and rating, resetting stale monthly
    /// counters first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn get_stats(&mut self, user_id: &UserId) -> Result<UserStatsResponse, ApiError> {
        let mut stats: UserStats = self
            .ensure_exists(user_id)
            .map_err(translate_persistence_error)?;
        if stats.reset_if_stale(self.now) {
            info!(user_id = %user_id, "Reset monthly counters");
            self.store
                .update_user_stats(&stats)
                .map_err(translate_persistence_error)?;
        }
        let profile: ProfileData = self
            .store
            .ensure_profile(user_id)
            .map_err(translate_persistence_error)?;
        Ok(UserStatsResponse::from_parts(&stats, &profile))
    }

    /// Adds `amount` to the user's blog-post counter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `amount` is zero, or an error if the store fails.
    pub fn record_blog_posts(
        &mut self,
        user_id: &UserId,
        amount: u32,
    ) -> Result<UserStatsResponse, ApiError> {
        if amount == 0 {
            return Err(ApiError::InvalidInput {
                field: String::from("amount"),
                message: String::from("amount must be at least 1"),
            });
        }
        self.apply_effects(&[LedgerEffect::stats(
            user_id,
            StatsChange::IncrementBlogPosts(amount),
        )])?;
        self.get_stats(user_id)
    }
}
