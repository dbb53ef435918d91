// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! - `goals` — Goal document insert/replace/delete
//! - `ledger` — User stats and profile ratings
//! - `notifications` — Notification delivery and read marks
//! - `images` — Image storage
//! - `audit` — Audit event persistence

pub mod audit;
pub mod goals;
pub mod images;
pub mod ledger;
pub mod notifications;
