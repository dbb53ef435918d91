// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use goaltrack::NotificationKind;
use goaltrack_domain::{GoalId, GoalStatusFilter, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Which goals a listing query draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalScope {
    /// Solo goals owned by the user.
    OwnedSolo(UserId),
    /// Every goal owned by the user, solo or group.
    Owned(UserId),
    /// Group goals where the user has accepted.
    GroupMember(UserId),
    /// Group goals where the user's invitation is still pending.
    PendingInvitations(UserId),
}

/// A goal listing filter: a scope plus an optional status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalFilter {
    pub scope: GoalScope,
    pub status: Option<GoalStatusFilter>,
}

impl GoalFilter {
    #[must_use]
    pub const fn new(scope: GoalScope, status: Option<GoalStatusFilter>) -> Self {
        Self { scope, status }
    }
}

/// A one-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Number of rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }
}

/// A user's public profile. Created lazily on first touch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileData {
    pub user_id: UserId,
    pub display_name: String,
    pub avatar: Option<String>,
    pub rating: i64,
}

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationData {
    pub notification_id: i64,
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub goal_id: Option<GoalId>,
    pub sender_id: Option<UserId>,
    pub is_read: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Raw image bytes with their content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub image_id: String,
    pub content_type: String,
    pub data: Vec<u8>,
}
