use baton_core::{PeerId, RoomName};
use baton_server::{RoomCommand, RoomManager, RoomPolicy};
use std::sync::Arc;
use std::time::Duration;

use crate::integration::{init_tracing, main_room, point};
use crate::utils::MockEventOutput;

async fn wait_until_retired(manager: &RoomManager, room: &RoomName) -> bool {
    let start = std::time::Instant::now();
    while manager.contains_room(room) {
        if start.elapsed() > Duration::from_secs(5) {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    true
}

#[tokio::test]
async fn test_empty_room_retires_and_next_joiner_gets_turn() {
    init_tracing();

    let output = MockEventOutput::new_stored_only();
    let manager = RoomManager::new(Arc::new(output.clone()), RoomPolicy::default());
    let room = main_room();
    let peer_a = PeerId::new();
    let peer_b = PeerId::new();

    manager.submit(&room, RoomCommand::Join { peer_id: peer_a.clone() });
    let snapshot = manager.snapshot(&room).await.expect("room should be running");
    assert_eq!(snapshot.active_drawer, Some(peer_a.clone()));

    manager.submit(&room, RoomCommand::Leave { peer_id: peer_a });
    assert!(wait_until_retired(&manager, &room).await, "room never retired");
    assert_eq!(manager.room_count(), 0);

    manager.submit(&room, RoomCommand::Join { peer_id: peer_b.clone() });
    let snapshot = manager.snapshot(&room).await.expect("room should be recreated");
    assert_eq!(snapshot.members, vec![peer_b.clone()]);
    assert_eq!(snapshot.active_drawer, Some(peer_b.clone()));
    assert_eq!(output.last_turn_for(&peer_b).await, Some(Some(peer_b)));
}

#[tokio::test]
async fn test_commands_for_unknown_room_are_dropped() {
    init_tracing();

    let output = MockEventOutput::new_stored_only();
    let manager = RoomManager::new(Arc::new(output.clone()), RoomPolicy::default());
    let room = RoomName::parse("nowhere").unwrap();
    let peer_id = PeerId::new();

    manager.submit(
        &room,
        RoomCommand::StartStroke {
            peer_id: peer_id.clone(),
            point: point(1.0, 1.0),
        },
    );
    manager.submit(&room, RoomCommand::PassTurn { peer_id: peer_id.clone() });
    manager.submit(&room, RoomCommand::Leave { peer_id });

    assert!(!manager.contains_room(&room));
    assert!(manager.snapshot(&room).await.is_none());
    assert_eq!(output.len().await, 0);
}

#[tokio::test]
async fn test_rooms_keep_separate_tokens() {
    init_tracing();

    let output = MockEventOutput::new_stored_only();
    let manager = RoomManager::new(Arc::new(output.clone()), RoomPolicy::default());
    let red = RoomName::parse("red").unwrap();
    let blue = RoomName::parse("blue").unwrap();
    let peer_a = PeerId::new();
    let peer_b = PeerId::new();

    manager.submit(&red, RoomCommand::Join { peer_id: peer_a.clone() });
    manager.submit(&blue, RoomCommand::Join { peer_id: peer_b.clone() });

    let red_snapshot = manager.snapshot(&red).await.expect("red running");
    let blue_snapshot = manager.snapshot(&blue).await.expect("blue running");

    assert_eq!(manager.room_count(), 2);
    assert_eq!(red_snapshot.active_drawer, Some(peer_a.clone()));
    assert_eq!(blue_snapshot.active_drawer, Some(peer_b.clone()));

    // A stroke in red never leaks into blue.
    manager.submit(
        &red,
        RoomCommand::StartStroke {
            peer_id: peer_a,
            point: point(5.0, 5.0),
        },
    );
    manager.snapshot(&red).await;
    assert!(output.canvas_events_for(&peer_b).await.is_empty());
}
