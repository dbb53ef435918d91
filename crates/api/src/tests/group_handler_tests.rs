// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Group goals: roster management, invitations, notifications, and
//! contribution scoring through the API.

use goaltrack::NotificationKind;
use goaltrack_domain::{GoalId, GroupGoalStats, GroupSettings, Participant, StepId, UserId};
use goaltrack_persistence::Persistence;

use super::helpers::{
    create_goal_request, create_group_request, create_test_context, create_test_persistence,
    goal_id_of, stats_of,
};
use crate::{
    AddParticipantRequest, ApiError, Capability, CreateGroupGoalRequest, GoalListResponse,
    GoalResponse, ListGoalsQuery, ListNotificationsQuery, MarkNotificationsReadRequest,
    MarkNotificationsReadResponse, NotificationListResponse, RespondToInvitationRequest,
    ToggleStepRequest, add_participant, complete_goal, create_goal, create_group_goal,
    get_goal, get_group_goal_stats, list_group_goals, list_invitations, list_notifications,
    mark_notifications_read, remove_participant, respond_to_invitation, toggle_step,
};

fn create_group(persistence: &mut Persistence, invitees: &[&str]) -> GoalResponse {
    create_group_goal(
        persistence,
        &create_test_context("alice"),
        &create_group_request("Climb together", invitees),
    )
    .unwrap()
}

fn respond(
    persistence: &mut Persistence,
    user: &str,
    goal_id: &GoalId,
    status: &str,
) -> Result<GoalResponse, ApiError> {
    respond_to_invitation(
        persistence,
        &create_test_context(user),
        goal_id,
        &RespondToInvitationRequest {
            status: status.to_string(),
        },
    )
}

fn invite(
    persistence: &mut Persistence,
    requester: &str,
    goal_id: &GoalId,
    user: &str,
    role: Option<&str>,
) -> Result<GoalResponse, ApiError> {
    add_participant(
        persistence,
        &create_test_context(requester),
        goal_id,
        &AddParticipantRequest {
            user_id: user.to_string(),
            role: role.map(ToString::to_string),
        },
    )
}

fn notifications(persistence: &mut Persistence, user: &str) -> NotificationListResponse {
    list_notifications(
        persistence,
        &create_test_context(user),
        ListNotificationsQuery { unread_only: true },
    )
    .unwrap()
}

// ============================================================================
// Creation and invitations
// ============================================================================

#[test]
fn test_create_group_goal_invites_and_notifies() {
    let mut persistence = create_test_persistence();
    let created: GoalResponse = create_group(&mut persistence, &["bob", "carol", "bob", "alice"]);

    let participants: &Vec<Participant> = created.goal.participants.as_ref().unwrap();
    assert!(created.goal.is_group);
    assert_eq!(participants.len(), 3);
    assert_eq!(created.capabilities.can_invite, Capability::Allowed);

    let inbox: NotificationListResponse = notifications(&mut persistence, "bob");
    assert_eq!(inbox.notifications.len(), 1);
    assert_eq!(inbox.notifications[0].kind, NotificationKind::GroupInvite);
    assert_eq!(
        inbox.notifications[0].goal_id.as_ref().unwrap().as_str(),
        created.goal.goal_id
    );
    assert!(notifications(&mut persistence, "alice").notifications.is_empty());

    let pending: GoalListResponse = list_invitations(
        &mut persistence,
        &create_test_context("bob"),
        &ListGoalsQuery::default(),
    )
    .unwrap();
    assert_eq!(pending.total, 1);

    assert_eq!(stats_of(&mut persistence, "alice").active_goals_now, 1);
    assert_eq!(stats_of(&mut persistence, "bob").active_goals_now, 0);
}

#[test]
fn test_pending_invitee_sees_goal_but_cannot_work_on_it() {
    let mut persistence = create_test_persistence();
    let created: GoalResponse = create_group(&mut persistence, &["bob"]);
    let goal_id: GoalId = goal_id_of(&created);

    let seen: GoalResponse =
        get_goal(&mut persistence, &create_test_context("bob"), &goal_id).unwrap();
    assert_eq!(seen.capabilities.can_respond_to_invitation, Capability::Allowed);
    assert_eq!(seen.capabilities.can_manage_steps, Capability::Denied);

    let step_id: StepId = created.goal.steps[0].id.clone();
    let result = toggle_step(
        &mut persistence,
        &create_test_context("bob"),
        &goal_id,
        &step_id,
        &ToggleStepRequest { is_completed: true },
    );
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_accept_and_decline_scenario() {
    let mut persistence = create_test_persistence();
    let created: GoalResponse = create_group(&mut persistence, &["bob", "carol"]);
    let goal_id: GoalId = goal_id_of(&created);

    respond(&mut persistence, "bob", &goal_id, "accepted").unwrap();
    respond(&mut persistence, "carol", &goal_id, "declined").unwrap();

    assert_eq!(stats_of(&mut persistence, "bob").active_goals_now, 1);
    assert_eq!(stats_of(&mut persistence, "carol").active_goals_now, 0);

    let owner_inbox: NotificationListResponse = notifications(&mut persistence, "alice");
    assert_eq!(owner_inbox.notifications.len(), 1);
    assert_eq!(
        owner_inbox.notifications[0].kind,
        NotificationKind::InvitationAccepted
    );

    let stats: GroupGoalStats =
        get_group_goal_stats(&mut persistence, &create_test_context("bob"), &goal_id).unwrap();
    assert_eq!(stats.total_participants, 3);
    assert_eq!(stats.active_participants, 2);
    assert_eq!(stats.pending_invitations, 0);

    let bob_groups: GoalListResponse = list_group_goals(
        &mut persistence,
        &create_test_context("bob"),
        &ListGoalsQuery::default(),
    )
    .unwrap();
    assert_eq!(bob_groups.total, 1);

    let again = respond(&mut persistence, "bob", &goal_id, "declined");
    assert!(matches!(again, Err(ApiError::InvalidOperation { .. })));
}

#[test]
fn test_invalid_invitation_responses() {
    let mut persistence = create_test_persistence();
    let goal_id: GoalId = goal_id_of(&create_group(&mut persistence, &["bob"]));

    for status in ["maybe", "pending"] {
        let result = respond(&mut persistence, "bob", &goal_id, status);
        assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    }
    let stranger = respond(&mut persistence, "dave", &goal_id, "accepted");
    assert!(matches!(stranger, Err(ApiError::ResourceNotFound { .. })));
}

// ============================================================================
// Adding and removing participants
// ============================================================================

#[test]
fn test_add_participant_permissions_and_conflicts() {
    let mut persistence = create_test_persistence();
    let goal_id: GoalId = goal_id_of(&create_group(&mut persistence, &["bob"]));
    respond(&mut persistence, "bob", &goal_id, "accepted").unwrap();

    let by_member = invite(&mut persistence, "bob", &goal_id, "dave", None);
    assert!(matches!(by_member, Err(ApiError::Forbidden { .. })));

    let as_owner = invite(&mut persistence, "alice", &goal_id, "dave", Some("owner"));
    assert!(matches!(as_owner, Err(ApiError::InvalidInput { .. })));

    let unknown_role = invite(&mut persistence, "alice", &goal_id, "dave", Some("captain"));
    assert!(matches!(unknown_role, Err(ApiError::InvalidInput { .. })));

    let existing = invite(&mut persistence, "alice", &goal_id, "bob", None);
    assert!(matches!(existing, Err(ApiError::Conflict { .. })));

    let added: GoalResponse =
        invite(&mut persistence, "alice", &goal_id, "dave", Some("admin")).unwrap();
    assert_eq!(added.goal.participants.unwrap().len(), 3);
    assert_eq!(notifications(&mut persistence, "dave").notifications.len(), 1);
}

#[test]
fn test_add_participant_respects_cap() {
    let mut persistence = create_test_persistence();
    let mut request: CreateGroupGoalRequest = create_group_request("Small", &["bob"]);
    request.group_settings = Some(GroupSettings {
        max_participants: 2,
        ..GroupSettings::default()
    });
    let created: GoalResponse =
        create_group_goal(&mut persistence, &create_test_context("alice"), &request).unwrap();

    let result = invite(&mut persistence, "alice", &goal_id_of(&created), "carol", None);
    assert!(matches!(result, Err(ApiError::InvalidOperation { .. })));
}

#[test]
fn test_add_participant_to_solo_goal_is_invalid() {
    let mut persistence = create_test_persistence();
    let created: GoalResponse = create_goal(
        &mut persistence,
        &create_test_context("alice"),
        &create_goal_request("Solo"),
    )
    .unwrap();

    let result = invite(&mut persistence, "alice", &goal_id_of(&created), "bob", None);
    assert!(matches!(result, Err(ApiError::InvalidOperation { .. })));
}

#[test]
fn test_owner_cannot_be_removed_and_members_may_leave() {
    let mut persistence = create_test_persistence();
    let goal_id: GoalId = goal_id_of(&create_group(&mut persistence, &["bob", "carol"]));
    respond(&mut persistence, "bob", &goal_id, "accepted").unwrap();
    respond(&mut persistence, "carol", &goal_id, "accepted").unwrap();

    for requester in ["alice", "bob"] {
        let result = remove_participant(
            &mut persistence,
            &create_test_context(requester),
            &goal_id,
            &UserId::new("alice"),
        );
        assert!(matches!(result, Err(ApiError::InvalidOperation { .. })));
    }

    let kick = remove_participant(
        &mut persistence,
        &create_test_context("bob"),
        &goal_id,
        &UserId::new("carol"),
    );
    assert!(matches!(kick, Err(ApiError::Forbidden { .. })));

    remove_participant(
        &mut persistence,
        &create_test_context("bob"),
        &goal_id,
        &UserId::new("bob"),
    )
    .unwrap();
    assert_eq!(stats_of(&mut persistence, "bob").active_goals_now, 0);
    assert_eq!(stats_of(&mut persistence, "carol").active_goals_now, 1);
}

#[test]
fn test_pending_admin_cannot_remove_accepted_member() {
    let mut persistence = create_test_persistence();
    let goal_id: GoalId = goal_id_of(&create_group(&mut persistence, &["bob"]));
    invite(&mut persistence, "alice", &goal_id, "mallory", Some("admin")).unwrap();
    respond(&mut persistence, "bob", &goal_id, "accepted").unwrap();

    let kick = remove_participant(
        &mut persistence,
        &create_test_context("mallory"),
        &goal_id,
        &UserId::new("bob"),
    );
    assert!(matches!(kick, Err(ApiError::Forbidden { .. })));
    assert_eq!(stats_of(&mut persistence, "bob").active_goals_now, 1);

    let by_pending = invite(&mut persistence, "mallory", &goal_id, "dave", None);
    assert!(matches!(by_pending, Err(ApiError::Forbidden { .. })));
}

// ============================================================================
// Work on group goals
// ============================================================================

#[test]
fn test_group_step_toggle_credits_acting_participant() {
    let mut persistence = create_test_persistence();
    let created: GoalResponse = create_group(&mut persistence, &["bob"]);
    let goal_id: GoalId = goal_id_of(&created);
    let step_id: StepId = created.goal.steps[0].id.clone();
    respond(&mut persistence, "bob", &goal_id, "accepted").unwrap();

    let toggled: GoalResponse = toggle_step(
        &mut persistence,
        &create_test_context("bob"),
        &goal_id,
        &step_id,
        &ToggleStepRequest { is_completed: true },
    )
    .unwrap();
    assert_eq!(toggled.goal.progress, 100);

    let bob: &Participant = toggled
        .goal
        .participants
        .as_ref()
        .unwrap()
        .iter()
        .find(|p| p.user_id.as_str() == "bob")
        .unwrap();
    assert_eq!(bob.contribution_score, 10);
    assert_eq!(stats_of(&mut persistence, "bob").rating, 10);
    assert_eq!(stats_of(&mut persistence, "bob").closed_tasks, 1);
    assert_eq!(stats_of(&mut persistence, "alice").rating, 0);

    let stats: GroupGoalStats =
        get_group_goal_stats(&mut persistence, &create_test_context("alice"), &goal_id).unwrap();
    assert_eq!(stats.top_contributors[0].user_id.as_str(), "bob");
}

#[test]
fn test_member_cannot_complete_and_stranger_cannot_see_stats() {
    let mut persistence = create_test_persistence();
    let goal_id: GoalId = goal_id_of(&create_group(&mut persistence, &["bob"]));
    respond(&mut persistence, "bob", &goal_id, "accepted").unwrap();

    let result = complete_goal(&mut persistence, &create_test_context("bob"), &goal_id);
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));

    let stats = get_group_goal_stats(&mut persistence, &create_test_context("eve"), &goal_id);
    assert!(matches!(stats, Err(ApiError::Forbidden { .. })));

    let hidden = get_goal(&mut persistence, &create_test_context("eve"), &goal_id);
    assert!(matches!(hidden, Err(ApiError::ResourceNotFound { .. })));
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn test_mark_notifications_read_only_affects_caller() {
    let mut persistence = create_test_persistence();
    create_group(&mut persistence, &["bob", "carol"]);

    let bob_ids: Vec<i64> = notifications(&mut persistence, "bob")
        .notifications
        .iter()
        .map(|n| n.notification_id)
        .collect();
    let carol_ids: Vec<i64> = notifications(&mut persistence, "carol")
        .notifications
        .iter()
        .map(|n| n.notification_id)
        .collect();

    let all_ids: Vec<i64> = bob_ids.iter().chain(&carol_ids).copied().collect();
    let marked: MarkNotificationsReadResponse = mark_notifications_read(
        &mut persistence,
        &create_test_context("bob"),
        &MarkNotificationsReadRequest { ids: all_ids },
    )
    .unwrap();

    assert_eq!(marked.updated, 1);
    assert!(notifications(&mut persistence, "bob").notifications.is_empty());
    assert_eq!(notifications(&mut persistence, "carol").notifications.len(), 1);
}
