// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `goals` — Goal documents and listing filters
//! - `ledger` — User stats and profiles
//! - `notifications` — Notification polling
//! - `images` — Stored image bytes
//! - `audit` — Audit event timelines

pub mod audit;
pub mod goals;
pub mod images;
pub mod ledger;
pub mod notifications;
