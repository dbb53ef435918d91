// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_goal, create_test_habit_goal, test_now};
use crate::{
    ActivityType, DomainError, Goal, HabitMark, HabitStats, compute_habit_stats,
    normalize_habit_date,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};

fn mark(goal: &mut Goal, at: OffsetDateTime, is_completed: bool) -> HabitMark {
    goal.mark_habit_day(at, is_completed, test_now()).unwrap()
}

#[test]
fn test_normalize_uses_utc_calendar_day() {
    assert_eq!(
        normalize_habit_date(datetime!(2024-01-01 23:30 -05:00)),
        date!(2024-01-02)
    );
    assert_eq!(
        normalize_habit_date(datetime!(2024-01-01 00:15 UTC)),
        date!(2024-01-01)
    );
}

#[test]
fn test_mark_then_unmark_same_day_nets_zero_rating() {
    let mut goal: Goal = create_test_habit_goal();

    let first: HabitMark = mark(&mut goal, datetime!(2024-01-01 08:00 UTC), true);
    let second: HabitMark = mark(&mut goal, datetime!(2024-01-01 20:00 UTC), false);

    assert_eq!(first.rating_delta, 10);
    assert_eq!(second.rating_delta, -10);
    assert_eq!(first.rating_delta + second.rating_delta, 0);
    assert_eq!(goal.habit_days().len(), 1);
    assert!(!goal.habit_days()[0].is_completed);

    let kinds: Vec<ActivityType> = goal.activity().iter().map(|a| a.activity_type).collect();
    assert_eq!(
        kinds,
        vec![ActivityType::MarkHabitDay, ActivityType::UnmarkHabitDay]
    );
}

#[test]
fn test_unmark_of_unrecorded_day_has_no_rating_effect() {
    let mut goal: Goal = create_test_habit_goal();
    let result: HabitMark = mark(&mut goal, datetime!(2024-01-05 08:00 UTC), false);

    assert_eq!(result.rating_delta, 0);
    assert_eq!(goal.habit_days().len(), 1);
}

#[test]
fn test_unmark_of_incomplete_day_has_no_rating_effect() {
    let mut goal: Goal = create_test_habit_goal();
    mark(&mut goal, datetime!(2024-01-05 08:00 UTC), false);
    let result: HabitMark = mark(&mut goal, datetime!(2024-01-05 09:00 UTC), false);

    assert_eq!(result.rating_delta, 0);
}

#[test]
fn test_mark_on_regular_goal_fails() {
    let mut goal: Goal = create_test_goal(Vec::new());
    let result = goal.mark_habit_day(test_now(), true, test_now());
    assert!(matches!(result, Err(DomainError::NotHabitGoal(_))));
}

#[test]
fn test_stats_on_regular_goal_fails() {
    let goal: Goal = create_test_goal(Vec::new());
    assert!(matches!(
        compute_habit_stats(&goal),
        Err(DomainError::NotHabitGoal(_))
    ));
}

#[test]
fn test_stats_empty_goal() {
    let goal: Goal = create_test_habit_goal();
    let stats: HabitStats = compute_habit_stats(&goal).unwrap();

    assert_eq!(stats.total_days, 0);
    assert_eq!(stats.completed_days, 0);
    assert!(stats.success_rate.abs() < f64::EPSILON);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.longest_streak, 0);
}

#[test]
fn test_stats_streaks_with_gap_in_middle() {
    let mut goal: Goal = create_test_habit_goal();
    // Recorded out of order to exercise sorting.
    mark(&mut goal, datetime!(2024-01-04 08:00 UTC), true);
    mark(&mut goal, datetime!(2024-01-01 08:00 UTC), true);
    mark(&mut goal, datetime!(2024-01-03 08:00 UTC), true);
    mark(&mut goal, datetime!(2024-01-02 08:00 UTC), false);

    let stats: HabitStats = compute_habit_stats(&goal).unwrap();

    assert_eq!(stats.total_days, 4);
    assert_eq!(stats.completed_days, 3);
    assert_eq!(stats.longest_streak, 2);
    assert_eq!(stats.current_streak, 2);
    assert!((stats.success_rate - 75.0).abs() < f64::EPSILON);
}

#[test]
fn test_stats_half_completed_success_rate() {
    let mut goal: Goal = create_test_habit_goal();
    mark(&mut goal, datetime!(2024-01-01 08:00 UTC), true);
    mark(&mut goal, datetime!(2024-01-02 08:00 UTC), false);
    mark(&mut goal, datetime!(2024-01-03 08:00 UTC), true);
    mark(&mut goal, datetime!(2024-01-04 08:00 UTC), false);

    let stats: HabitStats = compute_habit_stats(&goal).unwrap();

    assert!((stats.success_rate - 50.0).abs() < f64::EPSILON);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.longest_streak, 1);
}

#[test]
fn test_stats_success_rate_rounds_to_two_decimals() {
    let mut goal: Goal = create_test_habit_goal();
    mark(&mut goal, datetime!(2024-01-01 08:00 UTC), true);
    mark(&mut goal, datetime!(2024-01-02 08:00 UTC), false);
    mark(&mut goal, datetime!(2024-01-03 08:00 UTC), false);

    let stats: HabitStats = compute_habit_stats(&goal).unwrap();
    assert!((stats.success_rate - 33.33).abs() < 1e-9);
}

#[test]
fn test_stats_gaps_between_dates_are_not_inferred() {
    let mut goal: Goal = create_test_habit_goal();
    mark(&mut goal, datetime!(2024-01-01 08:00 UTC), true);
    mark(&mut goal, datetime!(2024-01-10 08:00 UTC), true);

    let stats: HabitStats = compute_habit_stats(&goal).unwrap();
    assert_eq!(stats.current_streak, 2);
    assert_eq!(stats.longest_streak, 2);
}
