// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use goaltrack_audit::Cause;
use goaltrack_domain::{GoalId, GoalType, UserId};
use goaltrack_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    AuthenticatedActor, CreateGoalRequest, CreateGroupGoalRequest, GoalResponse, RequestContext,
    StepInput, UserStatsResponse, get_profile_stats,
};

pub fn test_now() -> OffsetDateTime {
    datetime!(2024-03-15 10:00 UTC)
}

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_test_context(user: &str) -> RequestContext {
    create_test_context_at(user, test_now())
}

pub fn create_test_context_at(user: &str, now: OffsetDateTime) -> RequestContext {
    RequestContext::new(
        AuthenticatedActor::new(UserId::new(user)),
        create_test_cause(),
        now,
    )
}

pub fn create_goal_request(name: &str) -> CreateGoalRequest {
    CreateGoalRequest {
        goal_name: name.to_string(),
        category: String::from("Health"),
        description: None,
        start_date: None,
        end_date: None,
        image: None,
        reward: None,
        consequence: None,
        privacy: None,
        goal_type: None,
        value: None,
        habit_days_of_week: Vec::new(),
        habit_duration: None,
        steps: Vec::new(),
    }
}

pub fn create_goal_request_with_steps(name: &str, steps: &[(&str, bool)]) -> CreateGoalRequest {
    let mut request: CreateGoalRequest = create_goal_request(name);
    request.steps = steps
        .iter()
        .map(|(text, is_completed)| StepInput {
            id: None,
            text: (*text).to_string(),
            is_completed: *is_completed,
        })
        .collect();
    request
}

pub fn create_habit_request(name: &str) -> CreateGoalRequest {
    let mut request: CreateGoalRequest = create_goal_request(name);
    request.goal_type = Some(GoalType::Habit);
    request
}

pub fn create_group_request(name: &str, invitees: &[&str]) -> CreateGroupGoalRequest {
    CreateGroupGoalRequest {
        goal: create_goal_request_with_steps(name, &[("Plan route", false)]),
        invitees: invitees.iter().map(|id| (*id).to_string()).collect(),
        group_settings: None,
    }
}

pub fn goal_id_of(response: &GoalResponse) -> GoalId {
    GoalId::new(&response.goal.goal_id)
}

pub fn stats_of(persistence: &mut Persistence, user: &str) -> UserStatsResponse {
    get_profile_stats(persistence, &create_test_context(user), &UserId::new(user)).unwrap()
}
