//! The beacon's response contract, exercised over real TLS connections.

use std::time::Duration;

use http_beacon::config::KeepAliveMode;
use http_beacon::Termination;
use reqwest::{Method, StatusCode};

mod common;

use common::{client, test_config, RunningBeacon};

#[tokio::test]
async fn every_request_gets_the_fixed_response() {
    let beacon = RunningBeacon::start(&test_config());
    let client = client();

    let cases = [
        (Method::GET, "/"),
        (Method::POST, "/orders/42"),
        (Method::PUT, "/deep/nested/path?query=1"),
        (Method::DELETE, "/anything"),
        (Method::HEAD, "/"),
    ];
    for (method, path) in cases {
        let res = client
            .request(method.clone(), beacon.url(path))
            .header("x-custom", "value")
            .body("payload")
            .send()
            .await
            .expect("beacon unreachable");

        assert_eq!(res.status(), StatusCode::OK, "{method} {path}");
        assert_eq!(res.headers()["content-type"], "text/plain");
        assert_eq!(res.headers()["server-name"], "troydai/http-beacon");
        assert!(res.bytes().await.unwrap().is_empty(), "{method} {path} had a body");
    }

    beacon.handle.shutdown();
    assert_eq!(beacon.finish(Duration::from_secs(5)).await, Termination::ServerStopped);
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let beacon = RunningBeacon::start(&test_config());
    let client = client();

    let mut seen = Vec::new();
    for _ in 0..3 {
        let res = client.get(beacon.url("/same")).send().await.unwrap();
        let mut headers = res.headers().clone();
        headers.remove("date");
        let status = res.status();
        let body = res.bytes().await.unwrap();
        seen.push((status, headers, body));
    }
    assert!(seen.windows(2).all(|pair| pair[0] == pair[1]));

    beacon.handle.shutdown();
    beacon.finish(Duration::from_secs(5)).await;
}

#[tokio::test]
async fn custom_server_name_is_sent() {
    let mut config = test_config();
    config.response.server_name = "edge-beacon-7".into();
    let beacon = RunningBeacon::start(&config);

    let res = client().get(beacon.url("/")).send().await.unwrap();
    assert_eq!(res.headers()["server-name"], "edge-beacon-7");

    beacon.handle.shutdown();
    beacon.finish(Duration::from_secs(5)).await;
}

#[tokio::test]
async fn serves_in_every_keep_alive_mode() {
    for mode in [
        KeepAliveMode::OsDefault,
        KeepAliveMode::DisabledAtListener,
        KeepAliveMode::DisabledPerConnection,
    ] {
        let mut config = test_config();
        config.listener.keep_alive = mode;
        let beacon = RunningBeacon::start(&config);

        let res = client().get(beacon.url("/")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "keep-alive mode {mode}");

        beacon.handle.shutdown();
        beacon.finish(Duration::from_secs(5)).await;
    }
}
