// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for goal tracking.
//!
//! Goals are stored as whole-aggregate JSON documents with a handful of
//! projection columns (owner, group flag, completion, archival, insertion
//! sequence) and a roster projection used by participant listings. User
//! stats, profiles, notifications, images, and audit events live in plain
//! tables next to them.
//!
//! ## Backend
//!
//! `SQLite` via Diesel. Migrations are embedded and run when a connection
//! is opened.
//!
//! ## Testing Philosophy
//!
//! - Tests run against `Persistence::new_in_memory()`
//! - Each in-memory database is isolated by a sequential name

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use goaltrack::NotificationIntent;
use goaltrack_audit::AuditEvent;
use goaltrack_domain::{Goal, GoalId, UserId, UserStats};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use uuid::Uuid;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod conversions;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod stores;

#[cfg(test)]
mod tests;

pub use data_models::{
    GoalFilter, GoalScope, ImageData, NotificationData, PageRequest, ProfileData,
};
pub use error::PersistenceError;
pub use stores::{AuditLog, GoalStore, ImageStore, NotificationSink, ProfileStore, UserStatsStore};

/// `SQLite`-backed implementation of every store contract.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database, so tests never
    /// observe each other's rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_goaltrack_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be deserialized.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }
}

// ============================================================================
// Goals
// ============================================================================

impl GoalStore for Persistence {
    fn find_goal(&mut self, goal_id: &GoalId) -> Result<Option<Goal>, PersistenceError> {
        queries::goals::find_goal(&mut self.conn, goal_id)
    }

    fn find_goals(
        &mut self,
        filter: &GoalFilter,
        page: PageRequest,
    ) -> Result<Vec<Goal>, PersistenceError> {
        queries::goals::find_goals(&mut self.conn, filter, page)
    }

    fn count_goals(&mut self, filter: &GoalFilter) -> Result<u64, PersistenceError> {
        queries::goals::count_goals(&mut self.conn, filter)
    }

    fn insert_goal(&mut self, goal: &Goal, now: OffsetDateTime) -> Result<(), PersistenceError> {
        mutations::goals::insert_goal(&mut self.conn, goal, now).map(|_seq| ())
    }

    fn update_goal(&mut self, goal: &Goal, now: OffsetDateTime) -> Result<(), PersistenceError> {
        mutations::goals::update_goal(&mut self.conn, goal, now)
    }

    fn delete_goal(&mut self, goal_id: &GoalId) -> Result<(), PersistenceError> {
        mutations::goals::delete_goal(&mut self.conn, goal_id)
    }
}

// ============================================================================
// Ledger
// ============================================================================

impl UserStatsStore for Persistence {
    fn find_user_stats(&mut self, user_id: &UserId) -> Result<Option<UserStats>, PersistenceError> {
        queries::ledger::find_user_stats(&mut self.conn, user_id)
    }

    fn insert_user_stats(&mut self, stats: &UserStats) -> Result<(), PersistenceError> {
        mutations::ledger::insert_user_stats(&mut self.conn, stats)
    }

    fn update_user_stats(&mut self, stats: &UserStats) -> Result<(), PersistenceError> {
        mutations::ledger::update_user_stats(&mut self.conn, stats)
    }
}

impl ProfileStore for Persistence {
    fn find_profile(&mut self, user_id: &UserId) -> Result<Option<ProfileData>, PersistenceError> {
        queries::ledger::find_profile(&mut self.conn, user_id)
    }

    fn ensure_profile(&mut self, user_id: &UserId) -> Result<ProfileData, PersistenceError> {
        mutations::ledger::ensure_profile(&mut self.conn, user_id)
    }

    fn adjust_rating(&mut self, user_id: &UserId, delta: i64) -> Result<i64, PersistenceError> {
        mutations::ledger::adjust_rating(&mut self.conn, user_id, delta)
    }
}

// ============================================================================
// Notifications, images, audit
// ============================================================================

impl NotificationSink for Persistence {
    fn notify(
        &mut self,
        intent: &NotificationIntent,
        now: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::notifications::insert_notification(&mut self.conn, intent, now)
    }

    fn list_notifications(
        &mut self,
        user_id: &UserId,
        unread_only: bool,
    ) -> Result<Vec<NotificationData>, PersistenceError> {
        queries::notifications::list_notifications(&mut self.conn, user_id, unread_only)
    }

    fn mark_notifications_read(
        &mut self,
        user_id: &UserId,
        notification_ids: &[i64],
    ) -> Result<usize, PersistenceError> {
        mutations::notifications::mark_notifications_read(&mut self.conn, user_id, notification_ids)
    }
}

impl ImageStore for Persistence {
    fn store_image(
        &mut self,
        content_type: &str,
        data: &[u8],
        now: OffsetDateTime,
    ) -> Result<String, PersistenceError> {
        let reference: String = Uuid::new_v4().to_string();
        mutations::images::insert_image(&mut self.conn, &reference, content_type, data, now)?;
        Ok(reference)
    }

    fn get_image(&mut self, reference: &str) -> Result<ImageData, PersistenceError> {
        queries::images::get_image(&mut self.conn, reference)
    }
}

impl AuditLog for Persistence {
    fn append_audit_event(&mut self, event: &AuditEvent) -> Result<i64, PersistenceError> {
        mutations::audit::persist_audit_event(&mut self.conn, event)
    }

    fn goal_audit_trail(&mut self, goal_id: &GoalId) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_goal_audit_trail(&mut self.conn, goal_id)
    }
}
