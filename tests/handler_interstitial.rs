mod common;

use std::time::{Duration, Instant};

#[tokio::test]
async fn test_interstitial_round_trip() {
    let ctx = common::create_test_context();
    common::insert_mapping(&ctx.mappings, "wait", "https://example.com/landing", true, false)
        .await;
    let server = common::ws_test_server(ctx.state.clone());

    let mut websocket = server.get_websocket("/ws").await.into_websocket().await;

    let started = Instant::now();
    websocket.send_text("wait").await;

    let target = websocket.receive_text().await;
    assert_eq!(target, "https://example.com/landing");
    assert!(started.elapsed() >= common::NOTIFY_DELAY);
    assert_eq!(ctx.state.notifier.delivered(), 1);

    match websocket.receive_message().await {
        axum_test::WsMessage::Close(Some(frame)) => assert_eq!(u16::from(frame.code), 1000),
        other => panic!("expected close frame, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_key_closes_with_policy_violation() {
    let ctx = common::create_test_context();
    let server = common::ws_test_server(ctx.state.clone());

    let mut websocket = server.get_websocket("/ws").await.into_websocket().await;
    websocket.send_text("nope").await;

    match websocket.receive_message().await {
        axum_test::WsMessage::Close(Some(frame)) => {
            assert_eq!(u16::from(frame.code), 1008);
            assert_eq!(&*frame.reason, "[nope] is not known");
        }
        other => panic!("expected close frame, got {:?}", other),
    }
}

#[tokio::test]
async fn test_disconnect_before_delivery_aborts_notification() {
    let ctx = common::create_test_context();
    common::insert_mapping(&ctx.mappings, "wait", "https://example.com/", true, false).await;
    let server = common::ws_test_server(ctx.state.clone());

    let mut websocket = server.get_websocket("/ws").await.into_websocket().await;
    websocket.send_text("wait").await;
    websocket.close().await;

    // Let the notifier fire against the closed session.
    tokio::time::sleep(common::NOTIFY_DELAY + Duration::from_millis(200)).await;

    assert_eq!(ctx.state.notifier.delivered(), 0);
    assert_eq!(ctx.state.notifier.aborted(), 1);
    assert_eq!(ctx.state.task_pool.active(), 0);
    assert_eq!(ctx.state.task_pool.queued(), 0);
}
