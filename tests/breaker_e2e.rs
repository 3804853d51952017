//! End-to-end tests for circuit-breaker gated forwarding.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

mod common;

const BLOCK_NUMBER_CALL: &str = r#"{"jsonrpc":"2.0","method":"eth_blockNumber","id":1}"#;
const UPSTREAM_RESULT: &str = r#"{"jsonrpc":"2.0","id":1,"result":"0x10d4f"}"#;

async fn post_rpc(addr: SocketAddr, body: &'static str) -> reqwest::Response {
    common::http_client()
        .post(format!("http://{addr}/rpc"))
        .header("content-type", "application/json")
        .body(body)
        .send()
        .await
        .expect("gateway unreachable")
}

#[tokio::test]
async fn breaker_short_circuits_after_threshold_failures() {
    let (upstream, hits) = common::start_failing_upstream().await;
    let mut config = common::gateway_config(upstream);
    config.circuit_breaker.failure_threshold = 2;
    config.circuit_breaker.reset_timeout_ms = 60_000;
    let (gateway, shutdown) = common::spawn_gateway(config).await;

    for _ in 0..2 {
        let response = post_rpc(gateway, BLOCK_NUMBER_CALL).await;
        assert_eq!(response.status(), 502);
        let payload: Value = response.json().await.unwrap();
        assert_eq!(payload["error"]["code"], -32000);
        assert_eq!(payload["error"]["message"], "Upstream unavailable");
        assert!(payload["id"].is_null());
    }
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    // Breaker is now open: same error, but no connection reaches upstream.
    let response = post_rpc(gateway, BLOCK_NUMBER_CALL).await;
    assert_eq!(response.status(), 502);
    assert_eq!(hits.load(Ordering::SeqCst), 2, "no network call while open");

    // Accepted calls are still counted even when forwarding fails.
    let metrics: Value = common::http_client()
        .get(format!("http://{gateway}/metrics"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(metrics["calls"]["eth_blockNumber"], 3);

    shutdown.trigger();
}

#[tokio::test]
async fn breaker_recovers_through_a_half_open_trial() {
    let healthy = Arc::new(AtomicBool::new(false));
    let flag = healthy.clone();
    let (upstream, hits) = common::start_programmable_upstream(move || {
        let flag = flag.clone();
        async move {
            if flag.load(Ordering::SeqCst) {
                Some((200, UPSTREAM_RESULT.to_string()))
            } else {
                None
            }
        }
    })
    .await;

    let mut config = common::gateway_config(upstream);
    config.circuit_breaker.failure_threshold = 1;
    config.circuit_breaker.reset_timeout_ms = 200;
    let (gateway, shutdown) = common::spawn_gateway(config).await;

    // First failure trips the breaker.
    assert_eq!(post_rpc(gateway, BLOCK_NUMBER_CALL).await.status(), 502);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // Before the reset timeout: short-circuited, upstream untouched.
    assert_eq!(post_rpc(gateway, BLOCK_NUMBER_CALL).await.status(), 502);
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // After the reset timeout the single trial goes through and closes the
    // breaker again.
    healthy.store(true, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(250)).await;

    let response = post_rpc(gateway, BLOCK_NUMBER_CALL).await;
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), UPSTREAM_RESULT);

    let response = post_rpc(gateway, BLOCK_NUMBER_CALL).await;
    assert_eq!(response.status(), 200, "breaker closed after the trial");

    shutdown.trigger();
}

#[tokio::test]
async fn disabled_breaker_always_reaches_the_upstream() {
    let (upstream, hits) = common::start_failing_upstream().await;
    let mut config = common::gateway_config(upstream);
    config.circuit_breaker.enabled = false;
    let (gateway, shutdown) = common::spawn_gateway(config).await;

    for _ in 0..3 {
        let response = post_rpc(gateway, BLOCK_NUMBER_CALL).await;
        assert_eq!(response.status(), 502);
    }
    assert_eq!(
        hits.load(Ordering::SeqCst),
        3,
        "every attempt reaches the network when the breaker is disabled"
    );

    shutdown.trigger();
}
