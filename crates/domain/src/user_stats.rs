// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-user aggregate counters.
//!
//! Counters never go below zero. A decrement that would cross zero is
//! clamped and reported back to the caller so it can be logged.

use crate::types::{UserId, iso_date};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, UtcOffset};

/// One counter change applied to a user's stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsChange {
    IncrementGoalsCreatedThisMonth,
    IncrementActiveGoals,
    DecrementActiveGoals,
    IncrementCompletedGoals,
    IncrementClosedTasks,
    DecrementClosedTasks,
    IncrementBlogPosts(u32),
}

impl StatsChange {
    /// Converts this change to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IncrementGoalsCreatedThisMonth => "increment_goals_created_this_month",
            Self::IncrementActiveGoals => "increment_active_goals",
            Self::DecrementActiveGoals => "decrement_active_goals",
            Self::IncrementCompletedGoals => "increment_completed_goals",
            Self::IncrementClosedTasks => "increment_closed_tasks",
            Self::DecrementClosedTasks => "decrement_closed_tasks",
            Self::IncrementBlogPosts(_) => "increment_blog_posts",
        }
    }

    /// Returns whether the change touches a monthly counter.
    #[must_use]
    pub const fn touches_monthly_counter(&self) -> bool {
        matches!(self, Self::IncrementGoalsCreatedThisMonth)
    }
}

/// Outcome of applying a [`StatsChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterOutcome {
    /// The counter moved as requested.
    Applied,
    /// A decrement hit zero and was clamped.
    ClampedAtZero,
}

/// Aggregate counters for one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub user_id: UserId,
    pub goals_created_this_month: u32,
    pub active_goals_now: u32,
    pub completed_goals: u32,
    pub closed_tasks: u32,
    pub blog_posts: u32,
    /// First day of the month the monthly counters were last reset in.
    #[serde(with = "iso_date")]
    pub last_month_reset: Date,
}

impl UserStats {
    /// Creates a zeroed record stamped with the month containing `now`.
    #[must_use]
    pub fn new(user_id: UserId, now: OffsetDateTime) -> Self {
        Self {
            user_id,
            goals_created_this_month: 0,
            active_goals_now: 0,
            completed_goals: 0,
            closed_tasks: 0,
            blog_posts: 0,
            last_month_reset: first_of_month(now),
        }
    }

    /// Zeroes monthly counters if `now` falls in a later month than the last reset.
    ///
    /// Returns whether a reset happened.
    pub fn reset_if_stale(&mut self, now: OffsetDateTime) -> bool {
        let today: Date = now.to_offset(UtcOffset::UTC).date();
        let current: (i32, u8) = (today.year(), u8::from(today.month()));
        let last: (i32, u8) = (
            self.last_month_reset.year(),
            u8::from(self.last_month_reset.month()),
        );
        if current <= last {
            return false;
        }
        self.goals_created_this_month = 0;
        self.last_month_reset = first_of_month(now);
        true
    }

    /// Applies one counter change.
    ///
    /// Callers must run [`Self::reset_if_stale`] first for monthly changes.
    pub fn apply_change(&mut self, change: StatsChange) -> CounterOutcome {
        match change {
            StatsChange::IncrementGoalsCreatedThisMonth => {
                increment(&mut self.goals_created_this_month, 1)
            }
            StatsChange::IncrementActiveGoals => increment(&mut self.active_goals_now, 1),
            StatsChange::DecrementActiveGoals => decrement(&mut self.active_goals_now),
            StatsChange::IncrementCompletedGoals => increment(&mut self.completed_goals, 1),
            StatsChange::IncrementClosedTasks => increment(&mut self.closed_tasks, 1),
            StatsChange::DecrementClosedTasks => decrement(&mut self.closed_tasks),
            StatsChange::IncrementBlogPosts(amount) => increment(&mut self.blog_posts, amount),
        }
    }
}

/// Applies a signed rating delta, clamping at zero.
#[must_use]
pub fn apply_rating_delta(rating: i64, delta: i64) -> (i64, CounterOutcome) {
    let next: i64 = rating.saturating_add(delta);
    if next < 0 {
        (0, CounterOutcome::ClampedAtZero)
    } else {
        (next, CounterOutcome::Applied)
    }
}

fn increment(counter: &mut u32, amount: u32) -> CounterOutcome {
    *counter = counter.saturating_add(amount);
    CounterOutcome::Applied
}

fn decrement(counter: &mut u32) -> CounterOutcome {
    if *counter == 0 {
        return CounterOutcome::ClampedAtZero;
    }
    *counter -= 1;
    CounterOutcome::Applied
}

fn first_of_month(now: OffsetDateTime) -> Date {
    let today: Date = now.to_offset(UtcOffset::UTC).date();
    today.replace_day(1).unwrap_or(today)
}
