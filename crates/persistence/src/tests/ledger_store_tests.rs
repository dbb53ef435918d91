// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use goaltrack_domain::{StatsChange, UserId, UserStats};
use time::macros::date;

use super::{create_test_persistence, test_now};
use crate::{PersistenceError, ProfileData, ProfileStore, UserStatsStore};

#[test]
fn test_user_stats_round_trip() {
    let mut persistence = create_test_persistence();
    let user: UserId = UserId::new("alice");
    assert!(persistence.find_user_stats(&user).unwrap().is_none());

    let mut stats: UserStats = UserStats::new(user.clone(), test_now());
    stats.apply_change(StatsChange::IncrementActiveGoals);
    stats.apply_change(StatsChange::IncrementBlogPosts(3));
    persistence.insert_user_stats(&stats).unwrap();

    let found: UserStats = persistence.find_user_stats(&user).unwrap().unwrap();
    assert_eq!(found, stats);
    assert_eq!(found.last_month_reset, date!(2024-03-01));
}

#[test]
fn test_user_stats_update_overwrites_counters() {
    let mut persistence = create_test_persistence();
    let user: UserId = UserId::new("alice");
    let mut stats: UserStats = UserStats::new(user.clone(), test_now());
    persistence.insert_user_stats(&stats).unwrap();

    stats.apply_change(StatsChange::IncrementClosedTasks);
    stats.apply_change(StatsChange::IncrementClosedTasks);
    persistence.update_user_stats(&stats).unwrap();

    let found: UserStats = persistence.find_user_stats(&user).unwrap().unwrap();
    assert_eq!(found.closed_tasks, 2);
}

#[test]
fn test_user_stats_update_without_record_fails() {
    let mut persistence = create_test_persistence();
    let stats: UserStats = UserStats::new(UserId::new("ghost"), test_now());

    let result = persistence.update_user_stats(&stats);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_profile_is_created_lazily() {
    let mut persistence = create_test_persistence();
    let user: UserId = UserId::new("alice");
    assert!(persistence.find_profile(&user).unwrap().is_none());

    let profile: ProfileData = persistence.ensure_profile(&user).unwrap();
    assert_eq!(profile.rating, 0);
    assert_eq!(profile.display_name, "alice");

    let again: ProfileData = persistence.ensure_profile(&user).unwrap();
    assert_eq!(again, profile);
}

#[test]
fn test_rating_adjustments_clamp_at_zero() {
    let mut persistence = create_test_persistence();
    let user: UserId = UserId::new("alice");

    assert_eq!(persistence.adjust_rating(&user, 10).unwrap(), 10);
    assert_eq!(persistence.adjust_rating(&user, -4).unwrap(), 6);
    assert_eq!(persistence.adjust_rating(&user, -50).unwrap(), 0);

    let profile: ProfileData = persistence.find_profile(&user).unwrap().unwrap();
    assert_eq!(profile.rating, 0);
}
