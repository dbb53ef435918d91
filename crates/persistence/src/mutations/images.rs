// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use tracing::info;

use crate::conversions::format_timestamp;
use crate::diesel_schema::images;
use crate::error::PersistenceError;

/// Stores raw image bytes under a caller-chosen reference.
///
/// # Errors
///
/// Returns an error if the reference is taken or the insert fails.
pub fn insert_image(
    conn: &mut SqliteConnection,
    image_id: &str,
    content_type: &str,
    data: &[u8],
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    diesel::insert_into(images::table)
        .values((
            images::image_id.eq(image_id),
            images::content_type.eq(content_type),
            images::data.eq(data),
            images::created_at.eq(format_timestamp(now)?),
        ))
        .execute(conn)?;

    info!(image_id, content_type, bytes = data.len(), "Stored image");
    Ok(())
}
