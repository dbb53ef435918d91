// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod audit_tests;
mod goal_store_tests;
mod initialization_tests;
mod ledger_store_tests;
mod notification_tests;

use goaltrack::{Command, CreateCommand, TransitionResult, apply, apply_create};
use goaltrack_audit::{Actor, Cause};
use goaltrack_domain::{
    Goal, GoalDetails, GoalDraft, GoalId, GoalType, GoalValue, GroupSettings, HabitSchedule,
    UserId,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};

use crate::Persistence;

pub const fn test_now() -> OffsetDateTime {
    datetime!(2024-03-15 12:00 UTC)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_actor(user_id: &str) -> Actor {
    Actor::user(UserId::new(user_id))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_draft(name: &str) -> GoalDraft {
    GoalDraft {
        details: GoalDetails::new(name, "health", date!(2024-03-01)),
        goal_type: GoalType::Regular,
        value: GoalValue::default(),
        habit_schedule: HabitSchedule::default(),
        steps: Vec::new(),
    }
}

pub fn create_test_goal(goal_id: &str, owner: &str) -> TransitionResult {
    apply_create(
        CreateCommand::CreateGoal {
            goal_id: GoalId::new(goal_id),
            draft: create_test_draft(goal_id),
        },
        create_test_actor(owner),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
}

pub fn create_test_group_goal(goal_id: &str, owner: &str, invitees: &[&str]) -> TransitionResult {
    apply_create(
        CreateCommand::CreateGroupGoal {
            goal_id: GoalId::new(goal_id),
            draft: create_test_draft(goal_id),
            invitees: invitees.iter().map(|id| UserId::new(id)).collect(),
            settings: GroupSettings::default(),
        },
        create_test_actor(owner),
        create_test_cause(),
        test_now(),
    )
    .unwrap()
}

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
