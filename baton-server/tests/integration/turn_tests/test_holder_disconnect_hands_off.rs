use baton_core::PeerId;
use baton_server::{HolderLeavePolicy, RoomCommand, RoomPolicy};

use crate::integration::{create_test_room, init_tracing, join, settle};

#[tokio::test]
async fn test_holder_disconnect_hands_off_in_join_order() {
    init_tracing();

    let (room_tx, _event_rx, output) = create_test_room(RoomPolicy::default());
    let peers: Vec<PeerId> = (0..3).map(|_| PeerId::new()).collect();
    for peer_id in &peers {
        join(&room_tx, peer_id);
    }

    room_tx
        .send(RoomCommand::Leave {
            peer_id: peers[0].clone(),
        })
        .expect("Room died");
    let snapshot = settle(&room_tx).await;

    assert_eq!(snapshot.active_drawer, Some(peers[1].clone()));
    for remaining in &peers[1..] {
        assert_eq!(
            output.last_turn_for(remaining).await,
            Some(Some(peers[1].clone()))
        );
    }
}

#[tokio::test]
async fn test_holder_disconnect_with_release_policy() {
    init_tracing();

    let policy = RoomPolicy {
        holder_leave: HolderLeavePolicy::Release,
        ..RoomPolicy::default()
    };
    let (room_tx, _event_rx, output) = create_test_room(policy);
    let peer_a = PeerId::new();
    let peer_b = PeerId::new();
    join(&room_tx, &peer_a);
    join(&room_tx, &peer_b);

    room_tx
        .send(RoomCommand::Leave { peer_id: peer_a })
        .expect("Room died");
    let snapshot = settle(&room_tx).await;

    assert_eq!(snapshot.active_drawer, None);
    assert_eq!(output.last_turn_for(&peer_b).await, Some(None));

    // Nobody can draw until the next join claims the token.
    let peer_c = PeerId::new();
    join(&room_tx, &peer_c);
    let snapshot = settle(&room_tx).await;
    assert_eq!(snapshot.active_drawer, Some(peer_c));
}
