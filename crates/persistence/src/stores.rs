// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Collaborator contracts the request layer is written against.
//!
//! `Persistence` implements all of them over one `SQLite` connection.

use goaltrack::NotificationIntent;
use goaltrack_audit::AuditEvent;
use goaltrack_domain::{Goal, GoalId, UserId, UserStats};
use time::OffsetDateTime;

use crate::data_models::{GoalFilter, ImageData, NotificationData, PageRequest, ProfileData};
use crate::error::PersistenceError;

/// Whole-aggregate goal storage.
pub trait GoalStore {
    /// Loads a goal, or `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_goal(&mut self, goal_id: &GoalId) -> Result<Option<Goal>, PersistenceError>;

    /// Loads one page of goals matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_goals(
        &mut self,
        filter: &GoalFilter,
        page: PageRequest,
    ) -> Result<Vec<Goal>, PersistenceError>;

    /// Counts the goals matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn count_goals(&mut self, filter: &GoalFilter) -> Result<u64, PersistenceError>;

    /// Stores a new goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken or the write fails.
    fn insert_goal(&mut self, goal: &Goal, now: OffsetDateTime) -> Result<(), PersistenceError>;

    /// Replaces an existing goal. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the goal does not exist or the write fails.
    fn update_goal(&mut self, goal: &Goal, now: OffsetDateTime) -> Result<(), PersistenceError>;

    /// Deletes a goal.
    ///
    /// # Errors
    ///
    /// Returns an error if the goal does not exist or the write fails.
    fn delete_goal(&mut self, goal_id: &GoalId) -> Result<(), PersistenceError>;
}

/// Per-user ledger counters.
pub trait UserStatsStore {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_user_stats(&mut self, user_id: &UserId) -> Result<Option<UserStats>, PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if a record already exists or the write fails.
    fn insert_user_stats(&mut self, stats: &UserStats) -> Result<(), PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if no record exists or the write fails.
    fn update_user_stats(&mut self, stats: &UserStats) -> Result<(), PersistenceError>;
}

/// Profile lookup and rating updates.
pub trait ProfileStore {
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_profile(&mut self, user_id: &UserId) -> Result<Option<ProfileData>, PersistenceError>;

    /// Returns the profile, creating a zero-rated one if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    fn ensure_profile(&mut self, user_id: &UserId) -> Result<ProfileData, PersistenceError>;

    /// Moves the rating by `delta`, clamping at zero, and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    fn adjust_rating(&mut self, user_id: &UserId, delta: i64) -> Result<i64, PersistenceError>;
}

/// Notification delivery and polling.
pub trait NotificationSink {
    /// Delivers a notification and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification cannot be stored.
    fn notify(
        &mut self,
        intent: &NotificationIntent,
        now: OffsetDateTime,
    ) -> Result<i64, PersistenceError>;

    /// Lists a user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_notifications(
        &mut self,
        user_id: &UserId,
        unread_only: bool,
    ) -> Result<Vec<NotificationData>, PersistenceError>;

    /// Marks notifications read and returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn mark_notifications_read(
        &mut self,
        user_id: &UserId,
        notification_ids: &[i64],
    ) -> Result<usize, PersistenceError>;
}

/// Opaque image storage.
pub trait ImageStore {
    /// Stores the bytes and returns an opaque reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be stored.
    fn store_image(
        &mut self,
        content_type: &str,
        data: &[u8],
        now: OffsetDateTime,
    ) -> Result<String, PersistenceError>;

    /// # Errors
    ///
    /// Returns an error if the reference is unknown.
    fn get_image(&mut self, reference: &str) -> Result<ImageData, PersistenceError>;
}

/// Append-only audit trail.
pub trait AuditLog {
    /// # Errors
    ///
    /// Returns an error if the event cannot be stored.
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError>;

    /// Lists a goal's events, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn goal_audit_trail(&mut self, goal_id: &GoalId) -> Result<Vec<AuditEvent>, PersistenceError>;
}
