// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Group goal roster: participants, invitation states, and role permissions.

use crate::error::DomainError;
use crate::types::{GoalId, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Number of contributors reported by [`GroupRoster::stats`].
pub const TOP_CONTRIBUTOR_LIMIT: usize = 5;

/// A participant's role within a group goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    /// The creator. Exactly one per group goal, never removable.
    Owner,
    /// May invite and remove participants and manage the goal.
    Admin,
    /// May work on steps; may invite only when the group allows it.
    Member,
}

impl ParticipantRole {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }

    /// Returns whether this role may invite new participants.
    #[must_use]
    pub const fn can_invite(&self, settings: &GroupSettings) -> bool {
        match self {
            Self::Owner | Self::Admin => true,
            Self::Member => settings.allow_members_to_invite,
        }
    }

    /// Returns whether this role may remove other participants.
    #[must_use]
    pub const fn can_remove_others(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }

    /// Returns whether this role may complete, archive, or edit the goal.
    #[must_use]
    pub const fn can_manage_goal(&self) -> bool {
        matches!(self, Self::Owner | Self::Admin)
    }
}

impl FromStr for ParticipantRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

/// Where a participant's invitation stands.
///
/// The only transitions are `Pending → Accepted` and `Pending → Declined`.
/// A declined participant may be re-invited, which resets the entry to
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Declined,
}

impl InvitationStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

impl FromStr for InvitationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            _ => Err(DomainError::InvalidInvitationResponse),
        }
    }
}

/// Per-group configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupSettings {
    /// Lets plain members invite others.
    pub allow_members_to_invite: bool,
    /// Informational; invitations always need the invitee's response.
    pub require_approval: bool,
    /// Roster cap, counting every entry regardless of status.
    pub max_participants: u16,
}

impl Default for GroupSettings {
    fn default() -> Self {
        Self {
            allow_members_to_invite: false,
            require_approval: true,
            max_participants: 10,
        }
    }
}

impl GroupSettings {
    /// Checks that the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGroupSettings` if `max_participants` is zero.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_participants == 0 {
            return Err(DomainError::InvalidGroupSettings(String::from(
                "max_participants must be at least 1",
            )));
        }
        Ok(())
    }
}

/// One entry on a group goal's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub user_id: UserId,
    pub role: ParticipantRole,
    pub invitation_status: InvitationStatus,
    /// Set when the participant joins (owner at creation, others on acceptance).
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub joined_at: Option<OffsetDateTime>,
    /// Share of step-completion work. Never negative.
    pub contribution_score: u64,
}

impl Participant {
    /// Creates the owner entry: accepted and joined at `now`.
    #[must_use]
    pub const fn owner(user_id: UserId, now: OffsetDateTime) -> Self {
        Self {
            user_id,
            role: ParticipantRole::Owner,
            invitation_status: InvitationStatus::Accepted,
            joined_at: Some(now),
            contribution_score: 0,
        }
    }

    /// Creates a pending invitation entry.
    #[must_use]
    pub const fn invited(user_id: UserId, role: ParticipantRole) -> Self {
        Self {
            user_id,
            role,
            invitation_status: InvitationStatus::Pending,
            joined_at: None,
            contribution_score: 0,
        }
    }

    /// Returns whether the participant has accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.invitation_status == InvitationStatus::Accepted
    }

    /// Moves the contribution score by `delta`, flooring at zero.
    pub fn adjust_contribution(&mut self, delta: i64) {
        let magnitude: u64 = delta.unsigned_abs();
        if delta >= 0 {
            self.contribution_score = self.contribution_score.saturating_add(magnitude);
        } else {
            self.contribution_score = self.contribution_score.saturating_sub(magnitude);
        }
    }
}

/// What an invite did to the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteOutcome {
    /// A new entry was appended.
    Added,
    /// A previously declined entry was reset to pending.
    Reinvited,
}

/// A contributor as reported by group statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopContributor {
    pub user_id: UserId,
    pub contribution_score: u64,
}

/// Aggregate view of a group goal's roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupGoalStats {
    pub total_participants: usize,
    /// Participants who have accepted, owner included.
    pub active_participants: usize,
    pub pending_invitations: usize,
    /// Accepted participants by score, highest first, at most five.
    pub top_contributors: Vec<TopContributor>,
}

/// The participant list and settings of a group goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRoster {
    participants: Vec<Participant>,
    settings: GroupSettings,
}

impl GroupRoster {
    /// Creates a roster with the owner accepted and every invitee pending.
    ///
    /// Duplicate invitees are collapsed and the owner's own id is ignored.
    ///
    /// # Arguments
    ///
    /// * `owner_id` - The creating user
    /// * `invitees` - Users to invite as members
    /// * `settings` - The group settings
    /// * `now` - The creation timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the invitees exceed
    /// the roster cap.
    pub fn new(
        owner_id: UserId,
        invitees: &[UserId],
        settings: GroupSettings,
        now: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        settings.validate()?;

        let mut participants: Vec<Participant> = vec![Participant::owner(owner_id, now)];
        for invitee in invitees {
            if participants.iter().any(|p| &p.user_id == invitee) {
                continue;
            }
            participants.push(Participant::invited(
                invitee.clone(),
                ParticipantRole::Member,
            ));
        }

        if participants.len() > usize::from(settings.max_participants) {
            return Err(DomainError::ParticipantLimitReached {
                max_participants: settings.max_participants,
            });
        }

        Ok(Self {
            participants,
            settings,
        })
    }

    /// Returns the roster in insertion order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Returns the group settings.
    #[must_use]
    pub const fn settings(&self) -> &GroupSettings {
        &self.settings
    }

    /// Replaces the group settings.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGroupSettings` if the new settings are invalid.
    pub fn replace_settings(&mut self, settings: GroupSettings) -> Result<(), DomainError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Looks up a roster entry.
    #[must_use]
    pub fn participant(&self, user_id: &UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.user_id == user_id)
    }

    /// Returns the entry for `user_id`, failing if the user is not on the roster.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotParticipant` if the user is not on the roster.
    pub fn require_participant(
        &self,
        goal_id: &GoalId,
        user_id: &UserId,
    ) -> Result<&Participant, DomainError> {
        self.participant(user_id)
            .ok_or_else(|| DomainError::NotParticipant {
                goal_id: goal_id.clone(),
                user_id: user_id.clone(),
            })
    }

    /// Returns the entry for `user_id`, failing unless the user has accepted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotParticipant` if the user is not on the roster,
    /// or `DomainError::ParticipationNotAccepted` if they have not accepted.
    pub fn require_accepted(
        &self,
        goal_id: &GoalId,
        user_id: &UserId,
    ) -> Result<&Participant, DomainError> {
        let participant: &Participant = self.require_participant(goal_id, user_id)?;
        if !participant.is_accepted() {
            return Err(DomainError::ParticipationNotAccepted {
                goal_id: goal_id.clone(),
                user_id: user_id.clone(),
            });
        }
        Ok(participant)
    }

    /// Invites `new_user` with `role` on behalf of `requester`.
    ///
    /// Checks run in this order: requester has accepted, requester may
    /// invite, role is not `owner`, a declined entry is re-invited in place,
    /// roster cap, existing entry.
    ///
    /// # Errors
    ///
    /// Returns `NotParticipant`, `ParticipationNotAccepted` or
    /// `PermissionDenied` for requester problems,
    /// `OwnerRoleImmutable` for an owner role, `ParticipantLimitReached` when
    /// the roster is full, and `AlreadyParticipant` for an existing entry.
    pub fn invite(
        &mut self,
        goal_id: &GoalId,
        requester: &UserId,
        new_user: &UserId,
        role: ParticipantRole,
    ) -> Result<InviteOutcome, DomainError> {
        let requester_role: ParticipantRole = self.require_accepted(goal_id, requester)?.role;
        if !requester_role.can_invite(&self.settings) {
            return Err(DomainError::PermissionDenied {
                user_id: requester.clone(),
                operation: "invite participants",
            });
        }
        if role == ParticipantRole::Owner {
            return Err(DomainError::OwnerRoleImmutable);
        }

        if let Some(existing) = self
            .participants
            .iter_mut()
            .find(|p| &p.user_id == new_user)
            && existing.invitation_status == InvitationStatus::Declined
        {
            *existing = Participant::invited(new_user.clone(), role);
            return Ok(InviteOutcome::Reinvited);
        }

        if self.participants.len() >= usize::from(self.settings.max_participants) {
            return Err(DomainError::ParticipantLimitReached {
                max_participants: self.settings.max_participants,
            });
        }
        if self.participant(new_user).is_some() {
            return Err(DomainError::AlreadyParticipant(new_user.clone()));
        }

        self.participants
            .push(Participant::invited(new_user.clone(), role));
        Ok(InviteOutcome::Added)
    }

    /// Records `user_id`'s response to their invitation.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInvitationResponse` if `status` is `Pending`,
    /// `InvitationNotFound` if the user has no roster entry, and
    /// `InvitationAlreadyResponded` if the entry is not pending.
    pub fn respond(
        &mut self,
        user_id: &UserId,
        status: InvitationStatus,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if status == InvitationStatus::Pending {
            return Err(DomainError::InvalidInvitationResponse);
        }
        let participant: &mut Participant = self
            .participants
            .iter_mut()
            .find(|p| &p.user_id == user_id)
            .ok_or_else(|| DomainError::InvitationNotFound(user_id.clone()))?;
        if participant.invitation_status != InvitationStatus::Pending {
            return Err(DomainError::InvitationAlreadyResponded(user_id.clone()));
        }

        participant.invitation_status = status;
        if status == InvitationStatus::Accepted {
            participant.joined_at = Some(now);
        }
        Ok(())
    }

    /// Removes `target` from the roster on behalf of `requester`.
    ///
    /// The owner check runs before any requester check, so removing the
    /// owner fails the same way for every caller. A pending participant may
    /// leave, but only accepted owners and admins may remove others.
    ///
    /// # Errors
    ///
    /// Returns `CannotRemoveOwner` for the owner, `NotParticipant` if the
    /// requester is not on the roster, `ParticipationNotAccepted` when a
    /// pending requester removes someone else, `PermissionDenied` when a
    /// member removes someone else, and `ParticipantNotFound` for an unknown
    /// target.
    pub fn remove(
        &mut self,
        goal_id: &GoalId,
        requester: &UserId,
        target: &UserId,
    ) -> Result<Participant, DomainError> {
        if self
            .participant(target)
            .is_some_and(|p| p.role == ParticipantRole::Owner)
        {
            return Err(DomainError::CannotRemoveOwner);
        }

        if requester == target {
            self.require_participant(goal_id, requester)?;
        } else {
            let requester_role: ParticipantRole =
                self.require_accepted(goal_id, requester)?.role;
            if !requester_role.can_remove_others() {
                return Err(DomainError::PermissionDenied {
                    user_id: requester.clone(),
                    operation: "remove other participants",
                });
            }
        }

        let index: usize = self
            .participants
            .iter()
            .position(|p| &p.user_id == target)
            .ok_or_else(|| DomainError::ParticipantNotFound(target.clone()))?;
        Ok(self.participants.remove(index))
    }

    /// Moves `user_id`'s contribution score by `delta`, flooring at zero.
    ///
    /// Returns `false` if the user is not on the roster.
    pub fn adjust_contribution(&mut self, user_id: &UserId, delta: i64) -> bool {
        self.participants
            .iter_mut()
            .find(|p| &p.user_id == user_id)
            .map(|p| p.adjust_contribution(delta))
            .is_some()
    }

    /// Computes the aggregate roster view.
    #[must_use]
    pub fn stats(&self) -> GroupGoalStats {
        let mut accepted: Vec<&Participant> =
            self.participants.iter().filter(|p| p.is_accepted()).collect();
        let active_participants: usize = accepted.len();
        let pending_invitations: usize = self
            .participants
            .iter()
            .filter(|p| p.invitation_status == InvitationStatus::Pending)
            .count();

        // Stable: ties keep roster order.
        accepted.sort_by(|a, b| b.contribution_score.cmp(&a.contribution_score));
        let top_contributors: Vec<TopContributor> = accepted
            .into_iter()
            .take(TOP_CONTRIBUTOR_LIMIT)
            .map(|p| TopContributor {
                user_id: p.user_id.clone(),
                contribution_score: p.contribution_score,
            })
            .collect();

        GroupGoalStats {
            total_participants: self.participants.len(),
            active_participants,
            pending_invitations,
            top_contributors,
        }
    }
}
