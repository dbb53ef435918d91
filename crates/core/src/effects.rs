// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Side effects produced by a transition and applied after the goal is saved.

use goaltrack_domain::{Goal, GoalId, StatsChange, UserId};
use serde::{Deserialize, Serialize};

/// One change to one user's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum LedgerEffect {
    /// A counter change on the user's stats record.
    Stats {
        user_id: UserId,
        change: StatsChange,
    },
    /// A signed change to the user's profile rating.
    Rating { user_id: UserId, delta: i64 },
}

impl LedgerEffect {
    /// Creates a stats counter effect.
    #[must_use]
    pub fn stats(user_id: &UserId, change: StatsChange) -> Self {
        Self::Stats {
            user_id: user_id.clone(),
            change,
        }
    }

    /// Creates a rating effect.
    #[must_use]
    pub fn rating(user_id: &UserId, delta: i64) -> Self {
        Self::Rating {
            user_id: user_id.clone(),
            delta,
        }
    }

    /// Returns the user this effect targets.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        match self {
            Self::Stats { user_id, .. } | Self::Rating { user_id, .. } => user_id,
        }
    }
}

/// Kinds of notifications raised by group transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    GroupInvite,
    InvitationAccepted,
}

impl NotificationKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GroupInvite => "group_invite",
            Self::InvitationAccepted => "invitation_accepted",
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "group_invite" => Ok(Self::GroupInvite),
            "invitation_accepted" => Ok(Self::InvitationAccepted),
            _ => Err(format!("unknown notification kind '{s}'")),
        }
    }
}

/// A notification to deliver once the transition has been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub recipient: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub goal_id: GoalId,
    /// The user whose action raised the notification.
    pub sender_id: UserId,
}

impl NotificationIntent {
    /// Invitation to join `goal`, sent by `inviter`.
    #[must_use]
    pub fn group_invite(recipient: &UserId, goal: &Goal, inviter: &UserId) -> Self {
        Self {
            recipient: recipient.clone(),
            kind: NotificationKind::GroupInvite,
            title: String::from("Group goal invitation"),
            message: format!(
                "You have been invited to the group goal \"{}\"",
                goal.details().name
            ),
            goal_id: goal.id().clone(),
            sender_id: inviter.clone(),
        }
    }

    /// Tells the owner of `goal` that `participant` accepted.
    #[must_use]
    pub fn invitation_accepted(goal: &Goal, participant: &UserId) -> Self {
        Self {
            recipient: goal.owner_id().clone(),
            kind: NotificationKind::InvitationAccepted,
            title: String::from("Invitation accepted"),
            message: format!(
                "{participant} joined the group goal \"{}\"",
                goal.details().name
            ),
            goal_id: goal.id().clone(),
            sender_id: participant.clone(),
        }
    }
}
