// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use goaltrack::{NotificationKind, TransitionResult};
use goaltrack_domain::UserId;

use super::{create_test_group_goal, create_test_persistence, test_now};
use crate::{ImageData, ImageStore, NotificationData, NotificationSink, PersistenceError};

#[test]
fn test_invites_are_listed_newest_first() {
    let mut persistence = create_test_persistence();
    let first: TransitionResult = create_test_group_goal("g1", "alice", &["bob"]);
    let second: TransitionResult = create_test_group_goal("g2", "carol", &["bob"]);
    for intent in first.notifications.iter().chain(&second.notifications) {
        persistence.notify(intent, test_now()).unwrap();
    }

    let listed: Vec<NotificationData> = persistence
        .list_notifications(&UserId::new("bob"), false)
        .unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].goal_id.as_ref().unwrap().as_str(), "g2");
    assert_eq!(listed[0].kind, NotificationKind::GroupInvite);
    assert_eq!(listed[0].sender_id.as_ref().unwrap().as_str(), "carol");
    assert!(!listed[0].is_read);
    assert_eq!(listed[0].created_at, test_now());
}

#[test]
fn test_mark_read_only_touches_own_notifications() {
    let mut persistence = create_test_persistence();
    let created: TransitionResult = create_test_group_goal("g1", "alice", &["bob", "carol"]);
    let mut ids: Vec<i64> = Vec::new();
    for intent in &created.notifications {
        ids.push(persistence.notify(intent, test_now()).unwrap());
    }

    let bob: UserId = UserId::new("bob");
    let changed: usize = persistence.mark_notifications_read(&bob, &ids).unwrap();
    assert_eq!(changed, 1);

    assert!(persistence.list_notifications(&bob, true).unwrap().is_empty());
    assert_eq!(persistence.list_notifications(&bob, false).unwrap().len(), 1);
    assert_eq!(
        persistence
            .list_notifications(&UserId::new("carol"), true)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_image_reference_round_trip() {
    let mut persistence = create_test_persistence();
    let bytes: Vec<u8> = vec![0x89, 0x50, 0x4e, 0x47];

    let reference: String = persistence
        .store_image("image/png", &bytes, test_now())
        .unwrap();
    let image: ImageData = persistence.get_image(&reference).unwrap();

    assert_eq!(image.data, bytes);
    assert_eq!(image.content_type, "image/png");
    assert!(matches!(
        persistence.get_image("missing"),
        Err(PersistenceError::ImageNotFound(_))
    ));
}
