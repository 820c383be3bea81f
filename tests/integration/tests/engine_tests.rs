//! End-to-end engine tests over a real connection manager
//!
//! These drive the router exactly as the WebSocket handler does, with
//! channel-backed clients standing in for sockets, and assert on the events
//! each client actually receives.
//!
//! Run with: cargo test -p integration-tests --test engine_tests

use integration_tests::EngineHarness;

use banter_core::{
    HistoryStore, NoticeAction, OutboundEvent, RoomCatalog, RoomId,
};
use banter_engine::{ClientEvent, IgnoreReason, RouteOutcome};

fn join(room: &str) -> ClientEvent {
    ClientEvent::Join { room: room.into() }
}

fn group(message: &str) -> ClientEvent {
    ClientEvent::GroupMessage {
        message: message.to_string(),
    }
}

#[tokio::test]
async fn test_join_notifies_existing_occupants() {
    let h = EngineHarness::new();
    let mut alice = h.connect("alice").await;
    let mut bob = h.connect("bob").await;

    assert_eq!(h.send(&alice, join("sports")).await, RouteOutcome::Applied);

    // Alice sees her own arrival notice and the occupant list.
    assert_eq!(
        alice.recv().await,
        OutboundEvent::SystemNotice {
            room: RoomId::new("sports"),
            user: "alice".to_string(),
            action: NoticeAction::Joined,
        }
    );
    assert_eq!(
        alice.recv().await,
        OutboundEvent::UpdateUsers {
            room: RoomId::new("sports"),
            occupants: vec!["alice".to_string()],
        }
    );

    assert_eq!(h.send(&bob, join("sports")).await, RouteOutcome::Applied);

    // Alice now sees bob's arrival and the grown occupant list.
    assert_eq!(
        alice.recv().await,
        OutboundEvent::SystemNotice {
            room: RoomId::new("sports"),
            user: "bob".to_string(),
            action: NoticeAction::Joined,
        }
    );
    assert_eq!(
        alice.recv().await,
        OutboundEvent::UpdateUsers {
            room: RoomId::new("sports"),
            occupants: vec!["alice".to_string(), "bob".to_string()],
        }
    );
}

#[tokio::test]
async fn test_group_message_reaches_all_occupants_including_sender() {
    let h = EngineHarness::new();
    let mut alice = h.connect("alice").await;
    let mut bob = h.connect("bob").await;
    h.send(&alice, join("sports")).await;
    h.send(&bob, join("sports")).await;
    alice.drain();
    bob.drain();

    assert_eq!(h.send(&alice, group("hi")).await, RouteOutcome::Applied);

    let to_alice = alice.recv().await;
    let to_bob = bob.recv().await;
    assert_eq!(to_alice, to_bob);

    let OutboundEvent::RoomMessage(msg) = to_alice else {
        panic!("expected room message");
    };
    assert_eq!(msg.from_user, "alice");
    assert_eq!(msg.message, "hi");

    // The broadcast record is the persisted record.
    let stored = h.history.query_group(&RoomId::new("sports"), 50).await.unwrap();
    assert_eq!(stored, vec![msg]);
}

#[tokio::test]
async fn test_room_switch_moves_fanout() {
    let h = EngineHarness::new();
    let mut alice = h.connect("alice").await;
    let mut bob = h.connect("bob").await;
    h.send(&alice, join("sports")).await;
    h.send(&bob, join("sports")).await;

    h.send(&bob, join("music")).await;
    alice.drain();
    bob.drain();

    // Sports traffic no longer reaches bob.
    h.send(&alice, group("sports talk")).await;
    assert!(matches!(alice.recv().await, OutboundEvent::RoomMessage(_)));
    bob.assert_silent();

    assert_eq!(h.registry.occupants(&RoomId::new("sports")), vec!["alice"]);
    assert_eq!(h.registry.occupants(&RoomId::new("music")), vec!["bob"]);
}

#[tokio::test]
async fn test_group_message_outside_room_is_silent() {
    let h = EngineHarness::new();
    let mut alice = h.connect("alice").await;

    let outcome = h.send(&alice, group("shouting into the void")).await;
    assert_eq!(outcome, RouteOutcome::Ignored(IgnoreReason::NotInRoom));
    alice.assert_silent();
    assert!(h
        .history
        .query_group(&RoomId::new("sports"), 50)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_private_message_delivery_and_echo() {
    let h = EngineHarness::new();
    let mut alice = h.connect("alice").await;
    let mut bob = h.connect("bob").await;

    let outcome = h
        .send(
            &alice,
            ClientEvent::PrivateMessage {
                to_user: "bob".to_string(),
                message: "psst".to_string(),
            },
        )
        .await;
    assert_eq!(outcome, RouteOutcome::Applied);

    let to_bob = bob.recv().await;
    let echo = alice.recv().await;
    assert_eq!(to_bob, echo);

    let OutboundEvent::PrivateMessage(msg) = to_bob else {
        panic!("expected private message");
    };
    assert_eq!(msg.from_user, "alice");
    assert_eq!(msg.to_user, "bob");
    assert_eq!(msg.message, "psst");
}

#[tokio::test]
async fn test_private_message_to_offline_user_persists() {
    let h = EngineHarness::new();
    let mut alice = h.connect("alice").await;

    let outcome = h
        .send(
            &alice,
            ClientEvent::PrivateMessage {
                to_user: "bob".to_string(),
                message: "read this later".to_string(),
            },
        )
        .await;
    assert_eq!(outcome, RouteOutcome::Applied);

    // Sender still gets the echo.
    assert!(matches!(
        alice.recv().await,
        OutboundEvent::PrivateMessage(_)
    ));

    let thread = h.history.query_private("alice", "bob", 50).await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].message, "read this later");
}

#[tokio::test]
async fn test_typing_room_mode_skips_sender() {
    let h = EngineHarness::new();
    let mut alice = h.connect("alice").await;
    let mut bob = h.connect("bob").await;
    h.send(&alice, join("sports")).await;
    h.send(&bob, join("sports")).await;
    alice.drain();
    bob.drain();

    h.send(&alice, ClientEvent::Typing { to_user: None }).await;
    assert_eq!(
        bob.recv().await,
        OutboundEvent::Typing {
            from_user: "alice".to_string()
        }
    );
    alice.assert_silent();

    h.send(&alice, ClientEvent::StopTyping { to_user: None }).await;
    assert_eq!(
        bob.recv().await,
        OutboundEvent::StopTyping {
            from_user: "alice".to_string()
        }
    );
    alice.assert_silent();
}

#[tokio::test]
async fn test_direct_typing_targets_one_user() {
    let h = EngineHarness::new();
    let alice = h.connect("alice").await;
    let mut bob = h.connect("bob").await;
    let mut carol = h.connect("carol").await;

    h.send(
        &alice,
        ClientEvent::Typing {
            to_user: Some("bob".to_string()),
        },
    )
    .await;

    assert_eq!(
        bob.recv().await,
        OutboundEvent::Typing {
            from_user: "alice".to_string()
        }
    );
    carol.assert_silent();

    let outcome = h
        .send(
            &alice,
            ClientEvent::Typing {
                to_user: Some("nobody".to_string()),
            },
        )
        .await;
    assert_eq!(outcome, RouteOutcome::Ignored(IgnoreReason::RecipientNotFound));
}

#[tokio::test]
async fn test_disconnect_cleans_up_everywhere() {
    let h = EngineHarness::new();
    let mut alice = h.connect("alice").await;
    let mut bob = h.connect("bob").await;
    h.send(&alice, join("sports")).await;
    h.send(&bob, join("sports")).await;
    alice.drain();

    assert_eq!(
        h.send(&bob, ClientEvent::Disconnect).await,
        RouteOutcome::Applied
    );
    h.manager.remove_connection(bob.connection_id);

    assert_eq!(
        alice.recv().await,
        OutboundEvent::SystemNotice {
            room: RoomId::new("sports"),
            user: "bob".to_string(),
            action: NoticeAction::Disconnected,
        }
    );
    assert_eq!(
        alice.recv().await,
        OutboundEvent::UpdateUsers {
            room: RoomId::new("sports"),
            occupants: vec!["alice".to_string()],
        }
    );

    // A second disconnect is a no-op for everyone.
    assert_eq!(
        h.send(&bob, ClientEvent::Disconnect).await,
        RouteOutcome::Ignored(IgnoreReason::UnknownSession)
    );
    alice.assert_silent();

    assert_eq!(h.registry.len(), 1);
    assert_eq!(h.manager.connection_count(), 1);
}

#[tokio::test]
async fn test_catalog_restricts_rooms() {
    let h = EngineHarness::with_catalog(RoomCatalog::new(["sports", "music"]));
    let mut alice = h.connect("alice").await;

    let outcome = h.send(&alice, join("politics")).await;
    assert_eq!(outcome, RouteOutcome::Ignored(IgnoreReason::RoomNotInCatalog));
    alice.assert_silent();

    assert_eq!(h.send(&alice, join("sports")).await, RouteOutcome::Applied);
}
