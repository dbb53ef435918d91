// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Goal, GoalDetails, GoalDraft, GoalId, GoalKind, GoalType, GoalValue, GroupRoster,
    GroupSettings, HabitSchedule, Step, StepId, UserId,
};
use time::OffsetDateTime;
use time::macros::{date, datetime};

pub const fn test_now() -> OffsetDateTime {
    datetime!(2024-03-15 12:00 UTC)
}

pub fn create_test_step(id: &str, is_completed: bool) -> Step {
    Step {
        id: StepId::new(id),
        text: format!("Step {id}"),
        is_completed,
    }
}

pub fn create_test_draft(goal_type: GoalType, steps: Vec<Step>) -> GoalDraft {
    GoalDraft {
        details: GoalDetails::new("Run a marathon", "health", date!(2024-03-01)),
        goal_type,
        value: GoalValue::default(),
        habit_schedule: HabitSchedule::default(),
        steps,
    }
}

pub fn create_test_goal(steps: Vec<Step>) -> Goal {
    Goal::create(
        GoalId::new("goal-1"),
        UserId::new("owner"),
        create_test_draft(GoalType::Regular, steps),
        GoalKind::Solo,
        test_now(),
    )
    .unwrap()
}

pub fn create_test_habit_goal() -> Goal {
    Goal::create(
        GoalId::new("habit-1"),
        UserId::new("owner"),
        create_test_draft(GoalType::Habit, Vec::new()),
        GoalKind::Solo,
        test_now(),
    )
    .unwrap()
}

pub fn create_test_roster(invitees: &[&str], settings: GroupSettings) -> GroupRoster {
    let invitees: Vec<UserId> = invitees.iter().map(|id| UserId::new(id)).collect();
    GroupRoster::new(UserId::new("owner"), &invitees, settings, test_now()).unwrap()
}

pub fn create_test_group_goal(invitees: &[&str]) -> Goal {
    Goal::create(
        GoalId::new("group-1"),
        UserId::new("owner"),
        create_test_draft(GoalType::Regular, Vec::new()),
        GoalKind::Group(create_test_roster(invitees, GroupSettings::default())),
        test_now(),
    )
    .unwrap()
}
