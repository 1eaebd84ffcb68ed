/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod support;

use conversations_bridge::{Args, BridgeConfig, OutboundEndpointKind, LOG_TAG};
use integration_test_utils::{CountingSink, RecordingTransport};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use support::{assert_push, attach, make_bridge_with_sink};

const SETTLE: Duration = Duration::from_millis(50);

#[tokio::test(flavor = "multi_thread")]
async fn disabled_relay_emits_nothing() {
    integration_test_utils::init_logging();
    let sink = Arc::new(CountingSink::new());
    let (bridge, _service) =
        make_bridge_with_sink("relay-off", BridgeConfig::default(), sink.clone());
    let transport = Arc::new(RecordingTransport::new("primary"));
    attach(&bridge, &transport).await;

    bridge.debug("nobody hears this");
    tokio::time::sleep(SETTLE).await;

    assert_eq!(sink.count(), 0);
    assert!(transport.pushes().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn enabled_relay_emits_once_locally_and_once_to_the_caller() {
    integration_test_utils::init_logging();
    let sink = Arc::new(CountingSink::new());
    let config = BridgeConfig {
        debug: true,
        ..BridgeConfig::default()
    };
    let (bridge, _service) = make_bridge_with_sink("relay-on", config, sink.clone());
    let transport = Arc::new(RecordingTransport::new("primary"));
    attach(&bridge, &transport).await;
    assert!(transport.wait_for_pushes(1, integration_test_utils::REPLY_TIMEOUT).await);
    let before = sink.count();
    transport.clear_sent();

    bridge.debug("hello from the host");

    let pushed = assert_push(&transport, OutboundEndpointKind::Logging, "logFromHost").await;
    tokio::time::sleep(SETTLE).await;

    assert_eq!(pushed, json!({ "msg": "hello from the host" }));
    assert_eq!(transport.pushes().len(), 1);
    assert_eq!(sink.count(), before + 1);
    let lines = sink.lines();
    let last = lines.last().expect("one emitted line");
    assert_eq!(last.tag, LOG_TAG);
    assert_eq!(last.message, "hello from the host");
    assert_eq!(
        transport.sender_threads(),
        vec![bridge.delivery_thread().to_string()]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn plugin_api_toggles_the_relay() {
    integration_test_utils::init_logging();
    let sink = Arc::new(CountingSink::new());
    let (bridge, _service) =
        make_bridge_with_sink("relay-toggle", BridgeConfig::default(), sink.clone());
    let transport = Arc::new(RecordingTransport::new("primary"));
    attach(&bridge, &transport).await;

    transport
        .call_ok("PluginApi.debug", Args::new().with("enableNative", true))
        .await;
    assert!(bridge.debug_enabled());
    assert_eq!(sink.messages(), vec!["native debug logging enabled".to_string()]);

    transport
        .call_ok("PluginApi.debug", Args::new().with("enableNative", false))
        .await;
    bridge.debug("muted");
    tokio::time::sleep(SETTLE).await;

    assert!(!bridge.debug_enabled());
    assert_eq!(sink.count(), 1);
    assert_eq!(
        transport
            .pushes_of(OutboundEndpointKind::Logging, "logFromHost")
            .len(),
        1
    );

    let status = transport
        .call_err("PluginApi.debug", Args::new().with("enableNative", "yes"))
        .await;
    assert_eq!(status.code(), conversations_bridge::BridgeCode::InvalidArgument);
}
