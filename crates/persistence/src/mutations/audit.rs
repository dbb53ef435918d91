// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event persistence.

use diesel::SqliteConnection;
use diesel::prelude::*;
use goaltrack_audit::AuditEvent;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::conversions::format_timestamp;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Persists an audit event.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&event.actor)?;
    let cause_json: String = serde_json::to_string(&event.cause)?;
    let action_json: String = serde_json::to_string(&event.action)?;
    let before_json: Option<String> = event
        .before
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let after_json: Option<String> = event
        .after
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    diesel::insert_into(audit_events::table)
        .values((
            audit_events::goal_id.eq(event.goal_id.as_str()),
            audit_events::actor_user_id.eq(event.actor.user_id.as_str()),
            audit_events::actor_json.eq(&actor_json),
            audit_events::cause_json.eq(&cause_json),
            audit_events::action_json.eq(&action_json),
            audit_events::before_snapshot_json.eq(before_json.as_deref()),
            audit_events::after_snapshot_json.eq(after_json.as_deref()),
            audit_events::created_at.eq(format_timestamp(event.occurred_at)?),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        event_id,
        goal_id = %event.goal_id,
        action = %event.action.name,
        "Persisted audit event"
    );
    Ok(event_id)
}
