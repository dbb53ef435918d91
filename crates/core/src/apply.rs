// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::{Command, CreateCommand};
use crate::effects::{LedgerEffect, NotificationIntent};
use crate::error::CoreError;
use crate::state::{GoalOutcome, TransitionResult};
use goaltrack_audit::{Action, Actor, AuditEvent, Cause, GoalSnapshot};
use goaltrack_domain::{
    Goal, GoalId, GoalKind, GroupRoster, HabitMark, InvitationStatus, Participant, StatsChange,
    StepId, UserId,
};
use time::OffsetDateTime;

/// Effects collected while a command runs.
#[derive(Default)]
struct Effects {
    ledger: Vec<LedgerEffect>,
    notifications: Vec<NotificationIntent>,
    details: Option<String>,
}

impl Effects {
    fn stats(&mut self, user_id: &UserId, change: StatsChange) {
        self.ledger.push(LedgerEffect::stats(user_id, change));
    }

    fn rating(&mut self, user_id: &UserId, delta: i64) {
        if delta != 0 {
            self.ledger.push(LedgerEffect::rating(user_id, delta));
        }
    }
}

/// Applies a creation command, producing the new goal and its effects.
///
/// The actor becomes the goal owner. Ledger effects target the owner only.
///
/// # Arguments
///
/// * `command` - The creation command
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The transition timestamp
///
/// # Errors
///
/// Returns an error if the draft, invitee list, or group settings violate
/// domain rules.
pub fn apply_create(
    command: CreateCommand,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let action_name: &'static str = command.name();
    let owner_id: UserId = actor.user_id.clone();
    let mut effects: Effects = Effects::default();

    let goal: Goal = match command {
        CreateCommand::CreateGoal { goal_id, draft } => {
            Goal::create(goal_id, owner_id.clone(), draft, GoalKind::Solo, now)?
        }
        CreateCommand::CreateGroupGoal {
            goal_id,
            draft,
            invitees,
            settings,
        } => {
            let roster: GroupRoster = GroupRoster::new(owner_id.clone(), &invitees, settings, now)?;
            let goal: Goal =
                Goal::create(goal_id, owner_id.clone(), draft, GoalKind::Group(roster), now)?;
            for participant in goal.roster().map_or(&[][..], GroupRoster::participants) {
                if participant.user_id != owner_id {
                    effects.notifications.push(NotificationIntent::group_invite(
                        &participant.user_id,
                        &goal,
                        &owner_id,
                    ));
                }
            }
            effects.details = Some(format!("invited {}", effects.notifications.len()));
            goal
        }
    };

    effects.stats(&owner_id, StatsChange::IncrementGoalsCreatedThisMonth);
    effects.stats(&owner_id, StatsChange::IncrementActiveGoals);

    let audit_event: AuditEvent = AuditEvent::new(
        goal.id().clone(),
        actor,
        cause,
        Action::new(action_name.to_string(), effects.details),
        None,
        Some(GoalSnapshot::of(&goal)),
        now,
    );

    Ok(TransitionResult {
        outcome: GoalOutcome::Created(goal),
        ledger_effects: effects.ledger,
        notifications: effects.notifications,
        audit_event,
    })
}

/// Applies a command to an existing goal, producing the new goal and its effects.
///
/// The input goal is not modified. On error nothing changes and no effect
/// is produced.
///
/// # Arguments
///
/// * `goal` - The current goal (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `now` - The transition timestamp
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new goal, effects, and audit event
/// * `Err(CoreError)` if the command is not permitted or violates a rule
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not perform the command on this goal
/// - The command does not apply to this kind of goal
/// - The command violates a lifecycle, step, habit, or roster rule
pub fn apply(
    goal: &Goal,
    command: Command,
    actor: Actor,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let action_name: &'static str = command.name();
    let actor_id: UserId = actor.user_id.clone();
    let mut next: Goal = goal.clone();
    let mut effects: Effects = Effects::default();
    let mut deleted: bool = false;

    match command {
        Command::UpdateGoal { update } => {
            next.require_manager(&actor_id)?;
            next.apply_update(update)?;
        }
        Command::CompleteGoal => complete(&mut next, &actor_id, now, &mut effects)?,
        Command::ArchiveGoal => {
            next.require_manager(&actor_id)?;
            next.archive()?;
            if !next.is_completed() {
                effects.stats(next.owner_id(), StatsChange::DecrementActiveGoals);
            }
        }
        Command::UnarchiveGoal => {
            next.require_manager(&actor_id)?;
            next.unarchive()?;
            if !next.is_completed() {
                effects.stats(next.owner_id(), StatsChange::IncrementActiveGoals);
            }
        }
        Command::DeleteGoal => {
            next.require_owner(&actor_id)?;
            if next.is_active_for_ledger() {
                effects.stats(next.owner_id(), StatsChange::DecrementActiveGoals);
            }
            deleted = true;
        }
        Command::AddStep { step_id, text } => {
            next.require_contributor(&actor_id)?;
            next.add_step(step_id.clone(), &text)?;
            effects.details = Some(format!("step {step_id}"));
        }
        Command::EditStep { step_id, text } => {
            next.require_contributor(&actor_id)?;
            next.edit_step(&step_id, &text)?;
            effects.details = Some(format!("step {step_id}"));
        }
        Command::DeleteStep { step_id } => {
            next.require_contributor(&actor_id)?;
            next.remove_step(&step_id)?;
            effects.details = Some(format!("step {step_id}"));
        }
        Command::ToggleStep {
            step_id,
            is_completed,
        } => toggle_step(
            &mut next,
            &actor_id,
            &step_id,
            is_completed,
            now,
            &mut effects,
        )?,
        Command::MarkHabitDay { date, is_completed } => {
            next.require_contributor(&actor_id)?;
            let mark: HabitMark = next.mark_habit_day(date, is_completed, now)?;
            effects.rating(&actor_id, mark.rating_delta);
            effects.details = Some(format!("{} completed={is_completed}", mark.date));
        }
        Command::AddParticipant { user_id, role } => {
            let goal_id: GoalId = next.id().clone();
            next.roster_mut()?
                .invite(&goal_id, &actor_id, &user_id, role)?;
            effects
                .notifications
                .push(NotificationIntent::group_invite(&user_id, &next, &actor_id));
            effects.details = Some(format!("{user_id} as {}", role.as_str()));
        }
        Command::RespondToInvitation { status } => {
            next.roster_mut()?.respond(&actor_id, status, now)?;
            if status == InvitationStatus::Accepted {
                effects.stats(&actor_id, StatsChange::IncrementActiveGoals);
                effects
                    .notifications
                    .push(NotificationIntent::invitation_accepted(&next, &actor_id));
            }
            effects.details = Some(status.as_str().to_string());
        }
        Command::RemoveParticipant { user_id } => {
            let goal_id: GoalId = next.id().clone();
            let removed: Participant = next.roster_mut()?.remove(&goal_id, &actor_id, &user_id)?;
            if removed.is_accepted() {
                effects.stats(&removed.user_id, StatsChange::DecrementActiveGoals);
            }
            effects.details = Some(removed.user_id.to_string());
        }
    }

    let after: Option<GoalSnapshot> = if deleted {
        None
    } else {
        Some(GoalSnapshot::of(&next))
    };
    let audit_event: AuditEvent = AuditEvent::new(
        next.id().clone(),
        actor,
        cause,
        Action::new(action_name.to_string(), effects.details),
        Some(GoalSnapshot::of(goal)),
        after,
        now,
    );

    let outcome: GoalOutcome = if deleted {
        GoalOutcome::Deleted(next)
    } else {
        GoalOutcome::Updated(next)
    };

    Ok(TransitionResult {
        outcome,
        ledger_effects: effects.ledger,
        notifications: effects.notifications,
        audit_event,
    })
}

/// Completes the goal. Ledger effects target the owner; `activeGoalsNow`
/// only moves if the goal was still counted as active.
fn complete(
    goal: &mut Goal,
    actor_id: &UserId,
    now: OffsetDateTime,
    effects: &mut Effects,
) -> Result<(), CoreError> {
    goal.require_manager(actor_id)?;
    let was_active: bool = goal.is_active_for_ledger();
    goal.complete(now)?;

    let owner_id: UserId = goal.owner_id().clone();
    if was_active {
        effects.stats(&owner_id, StatsChange::DecrementActiveGoals);
    }
    effects.stats(&owner_id, StatsChange::IncrementCompletedGoals);
    effects.rating(&owner_id, goal.value().completion_reward());
    Ok(())
}

/// Sets a step's flag. Ledger and contribution only move when the flag changes.
fn toggle_step(
    goal: &mut Goal,
    actor_id: &UserId,
    step_id: &StepId,
    is_completed: bool,
    now: OffsetDateTime,
    effects: &mut Effects,
) -> Result<(), CoreError> {
    goal.require_contributor(actor_id)?;
    let changed: bool = goal.set_step_completed(step_id, is_completed, now)?;
    effects.details = Some(format!("step {step_id} completed={is_completed}"));
    if !changed {
        return Ok(());
    }

    let reward: i64 = goal.value().increment_reward();
    let delta: i64 = if is_completed { reward } else { -reward };
    if goal.is_group() {
        goal.roster_mut()?.adjust_contribution(actor_id, delta);
    }

    let change: StatsChange = if is_completed {
        StatsChange::IncrementClosedTasks
    } else {
        StatsChange::DecrementClosedTasks
    };
    effects.stats(actor_id, change);
    effects.rating(actor_id, delta);
    Ok(())
}
