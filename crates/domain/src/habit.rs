// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Habit day records and streak statistics.

use crate::error::DomainError;
use crate::goal::Goal;
use crate::types::{ActivityType, GoalType, iso_date};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, UtcOffset};

/// Completion record for one calendar day. Unique per date within a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDay {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub is_completed: bool,
}

/// Result of marking a habit day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitMark {
    /// The UTC-normalized day that was written.
    pub date: Date,
    /// Signed rating change caused by the mark.
    pub rating_delta: i64,
}

/// Streak and success-rate statistics of a habit goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitStats {
    pub total_days: usize,
    pub completed_days: usize,
    /// Percentage of recorded days completed, rounded to two decimals.
    pub success_rate: f64,
    /// Completed records counted backwards from the most recent one.
    pub current_streak: usize,
    /// Longest run of completed records in date order.
    pub longest_streak: usize,
}

/// Normalizes a timestamp to its UTC calendar day.
#[must_use]
pub fn normalize_habit_date(at: OffsetDateTime) -> Date {
    at.to_offset(UtcOffset::UTC).date()
}

impl Goal {
    /// Records `is_completed` for the UTC day containing `at`.
    ///
    /// An existing record for that day is overwritten. Marking complete
    /// always earns `floor(value / 10)` rating; un-marking subtracts it only
    /// when the day was previously complete.
    ///
    /// # Arguments
    ///
    /// * `at` - Any instant on the day being marked
    /// * `is_completed` - The new completion flag
    /// * `now` - The activity timestamp
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotHabitGoal` for a regular goal.
    pub fn mark_habit_day(
        &mut self,
        at: OffsetDateTime,
        is_completed: bool,
        now: OffsetDateTime,
    ) -> Result<HabitMark, DomainError> {
        if self.goal_type != GoalType::Habit {
            return Err(DomainError::NotHabitGoal(self.id.clone()));
        }
        let date: Date = normalize_habit_date(at);

        let was_completed: bool = match self.habit_days.iter_mut().find(|d| d.date == date) {
            Some(existing) => {
                let previous: bool = existing.is_completed;
                existing.is_completed = is_completed;
                previous
            }
            None => {
                self.habit_days.push(HabitDay { date, is_completed });
                false
            }
        };

        let activity_type: ActivityType = if is_completed {
            ActivityType::MarkHabitDay
        } else {
            ActivityType::UnmarkHabitDay
        };
        self.record_activity(activity_type, now);

        let reward: i64 = self.value.increment_reward();
        let rating_delta: i64 = if is_completed {
            reward
        } else if was_completed {
            -reward
        } else {
            0
        };

        Ok(HabitMark { date, rating_delta })
    }
}

/// Computes streak statistics for a habit goal.
///
/// Only recorded days are considered; gaps between dates are not inferred.
///
/// # Errors
///
/// Returns `DomainError::NotHabitGoal` for a regular goal.
pub fn compute_habit_stats(goal: &Goal) -> Result<HabitStats, DomainError> {
    if goal.goal_type() != GoalType::Habit {
        return Err(DomainError::NotHabitGoal(goal.id().clone()));
    }

    let mut days: Vec<HabitDay> = goal.habit_days().to_vec();
    days.sort_by_key(|d| d.date);

    let total_days: usize = days.len();
    let completed_days: usize = days.iter().filter(|d| d.is_completed).count();

    let current_streak: usize = days
        .iter()
        .rev()
        .take_while(|d| d.is_completed)
        .count();

    let mut longest_streak: usize = 0;
    let mut run: usize = 0;
    for day in &days {
        if day.is_completed {
            run += 1;
            longest_streak = longest_streak.max(run);
        } else {
            run = 0;
        }
    }

    Ok(HabitStats {
        total_days,
        completed_days,
        success_rate: success_rate(completed_days, total_days),
        current_streak,
        longest_streak,
    })
}

#[allow(clippy::cast_precision_loss)]
fn success_rate(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent: f64 = completed as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}
