// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::ImageData;
use crate::diesel_schema::images;
use crate::error::PersistenceError;

/// Loads a stored image by its reference.
///
/// # Errors
///
/// Returns `PersistenceError::ImageNotFound` for an unknown reference.
pub fn get_image(
    conn: &mut SqliteConnection,
    image_id: &str,
) -> Result<ImageData, PersistenceError> {
    let row: Option<(String, String, Vec<u8>)> = images::table
        .filter(images::image_id.eq(image_id))
        .select((images::image_id, images::content_type, images::data))
        .first(conn)
        .optional()?;

    let (image_id, content_type, data) =
        row.ok_or_else(|| PersistenceError::ImageNotFound(image_id.to_string()))?;
    Ok(ImageData {
        image_id,
        content_type,
        data,
    })
}
