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

use conversations_bridge::{
    Args, AttachReport, BridgeConfig, ChannelTransport, ConversationsBridge, DiagnosticSink,
    HostContext, OutboundEndpointKind,
};
use in_memory_conversations::InMemoryConversations;
use integration_test_utils::{RecordingTransport, REPLY_TIMEOUT};
use serde_json::Value;
use std::sync::Arc;

pub(crate) const CREATE: &str = "ConversationClientApi.create";

pub(crate) fn make_bridge(
    name: &str,
    config: BridgeConfig,
) -> (ConversationsBridge, InMemoryConversations) {
    let service = InMemoryConversations::new();
    let bridge = ConversationsBridge::new(name, config, Arc::new(service.clone()))
        .expect("bridge creation should succeed");
    (bridge, service)
}

#[allow(dead_code)]
pub(crate) fn make_bridge_with_sink(
    name: &str,
    config: BridgeConfig,
    sink: Arc<dyn DiagnosticSink>,
) -> (ConversationsBridge, InMemoryConversations) {
    let service = InMemoryConversations::new();
    let bridge = ConversationsBridge::with_sink(name, config, Arc::new(service.clone()), sink)
        .expect("bridge creation should succeed");
    (bridge, service)
}

pub(crate) async fn attach(
    bridge: &ConversationsBridge,
    transport: &Arc<RecordingTransport>,
) -> AttachReport {
    let transport: Arc<dyn ChannelTransport> = transport.clone();
    bridge.attach(transport, HostContext::new("test-host")).await
}

/// Signs `identity` in through the RPC surface and returns the `create` payload.
#[allow(dead_code)]
pub(crate) async fn sign_in(
    transport: &RecordingTransport,
    service: &InMemoryConversations,
    identity: &str,
) -> Value {
    let token = service.issue_token(identity);
    transport
        .call_ok(CREATE, Args::new().with("jwtToken", token))
        .await
}

/// Creates a conversation through the RPC surface and returns its SID.
#[allow(dead_code)]
pub(crate) async fn create_conversation(
    transport: &RecordingTransport,
    friendly_name: &str,
) -> String {
    let snapshot = transport
        .call_ok(
            "ConversationClientApi.createConversation",
            Args::new().with("friendlyName", friendly_name),
        )
        .await;
    snapshot["sid"]
        .as_str()
        .expect("conversation snapshot carries a sid")
        .to_string()
}

#[allow(dead_code)]
pub(crate) async fn assert_push(
    transport: &RecordingTransport,
    endpoint: OutboundEndpointKind,
    method: &str,
) -> Value {
    transport
        .wait_for_push(endpoint, method, REPLY_TIMEOUT)
        .await
        .unwrap_or_else(|| panic!("expected a {endpoint}.{method} push"))
}
