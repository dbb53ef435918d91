// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use goaltrack::NotificationKind;
use goaltrack_domain::{GoalId, UserId};

use crate::conversions::{is_set, parse_timestamp};
use crate::data_models::NotificationData;
use crate::diesel_schema::notifications;
use crate::error::PersistenceError;

/// Diesel Queryable struct for notification rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = notifications)]
struct NotificationRow {
    notification_id: i64,
    user_id: String,
    kind: String,
    title: String,
    message: String,
    goal_id: Option<String>,
    sender_id: Option<String>,
    is_read: i32,
    created_at: String,
}

impl TryFrom<NotificationRow> for NotificationData {
    type Error = PersistenceError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind: NotificationKind = row
            .kind
            .parse()
            .map_err(PersistenceError::ReconstructionError)?;
        Ok(Self {
            notification_id: row.notification_id,
            user_id: UserId::new(&row.user_id),
            kind,
            title: row.title,
            message: row.message,
            goal_id: row.goal_id.as_deref().map(GoalId::new),
            sender_id: row.sender_id.as_deref().map(UserId::new),
            is_read: is_set(row.is_read),
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Lists a user's notifications, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_notifications(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    unread_only: bool,
) -> Result<Vec<NotificationData>, PersistenceError> {
    let mut query = notifications::table
        .filter(notifications::user_id.eq(user_id.as_str()))
        .into_boxed();
    if unread_only {
        query = query.filter(notifications::is_read.eq(0));
    }

    let rows: Vec<NotificationRow> = query
        .order(notifications::notification_id.desc())
        .select(NotificationRow::as_select())
        .load(conn)?;

    rows.into_iter().map(NotificationData::try_from).collect()
}
