// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, CreateCommand, LedgerEffect, TransitionResult, apply, apply_create};
use goaltrack_audit::{Actor, Cause};
use goaltrack_domain::{
    Goal, GoalDetails, GoalDraft, GoalId, GoalType, GoalValue, GroupSettings, HabitSchedule,
    UserId, UserStats, apply_rating_delta,
};
use std::collections::HashMap;
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub const fn test_now() -> OffsetDateTime {
    datetime!(2024-03-15 12:00 UTC)
}

pub fn create_test_actor(user_id: &str) -> Actor {
    Actor::user(UserId::new(user_id))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}

pub fn create_test_draft(goal_type: GoalType, value: u16) -> GoalDraft {
    GoalDraft {
        details: GoalDetails::new("Ship the release", "work", date!(2024-03-01)),
        goal_type,
        value: GoalValue::new(value).unwrap(),
        habit_schedule: HabitSchedule::default(),
        steps: Vec::new(),
    }
}

pub fn create_solo_goal(goal_type: GoalType, value: u16) -> TransitionResult {
    apply_create(
        CreateCommand::CreateGoal {
            goal_id: GoalId::new("goal-1"),
            draft: create_test_draft(goal_type, value),
        },
        create_test_actor("owner"),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
}

pub fn create_group_goal(invitees: &[&str], settings: GroupSettings) -> TransitionResult {
    apply_create(
        CreateCommand::CreateGroupGoal {
            goal_id: GoalId::new("group-1"),
            draft: create_test_draft(GoalType::Regular, 100),
            invitees: invitees.iter().map(|id| UserId::new(id)).collect(),
            settings,
        },
        create_test_actor("owner"),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
}

/// Applies `command` as `actor` and returns the transition.
pub fn run(goal: &Goal, command: Command, actor: &str) -> TransitionResult {
    apply(
        goal,
        command,
        create_test_actor(actor),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
}

/// In-memory ledger used to check the cumulative effect of transitions.
#[derive(Default)]
pub struct LedgerTally {
    pub stats: HashMap<UserId, UserStats>,
    pub ratings: HashMap<UserId, i64>,
}

impl LedgerTally {
    pub fn record(&mut self, result: &TransitionResult) {
        for effect in &result.ledger_effects {
            match effect {
                LedgerEffect::Stats { user_id, change } => {
                    let stats: &mut UserStats = self
                        .stats
                        .entry(user_id.clone())
                        .or_insert_with(|| UserStats::new(user_id.clone(), test_now()));
                    stats.apply_change(*change);
                }
                LedgerEffect::Rating { user_id, delta } => {
                    let rating: &mut i64 = self.ratings.entry(user_id.clone()).or_insert(0);
                    *rating = apply_rating_delta(*rating, *delta).0;
                }
            }
        }
    }

    pub fn active(&self, user_id: &str) -> u32 {
        self.stats
            .get(&UserId::new(user_id))
            .map_or(0, |s| s.active_goals_now)
    }

    pub fn closed_tasks(&self, user_id: &str) -> u32 {
        self.stats
            .get(&UserId::new(user_id))
            .map_or(0, |s| s.closed_tasks)
    }

    pub fn completed(&self, user_id: &str) -> u32 {
        self.stats
            .get(&UserId::new(user_id))
            .map_or(0, |s| s.completed_goals)
    }

    pub fn rating(&self, user_id: &str) -> i64 {
        self.ratings
            .get(&UserId::new(user_id))
            .copied()
            .unwrap_or(0)
    }
}
