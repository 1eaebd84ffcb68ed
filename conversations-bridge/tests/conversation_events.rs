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

use conversations_bridge::sdk::{ConversationEvent, ParticipantSnapshot};
use conversations_bridge::{
    Args, BridgeConfig, ChannelTransport, ConversationsBridge, HostContext, OutboundEndpointKind,
};
use integration_test_utils::{RecordingTransport, REPLY_TIMEOUT};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use support::{assert_push, attach, create_conversation, make_bridge, sign_in};

const SETTLE: Duration = Duration::from_millis(50);

fn conversation_args(sid: &str) -> Args {
    Args::new().with("conversationSid", sid)
}

fn send_args(sid: &str, body: &str) -> Args {
    conversation_args(sid).with("options", json!({ "body": body }))
}

#[tokio::test(flavor = "multi_thread")]
async fn subscribed_conversation_forwards_new_messages() {
    integration_test_utils::init_logging();
    let (bridge, service) = make_bridge("forwarding", BridgeConfig::default());
    let transport = Arc::new(RecordingTransport::new("primary"));
    attach(&bridge, &transport).await;

    let created = sign_in(&transport, &service, "alice").await;
    assert_eq!(created["myIdentity"], "alice");
    assert_eq!(created["connectionState"], "CONNECTED");

    let sid = create_conversation(&transport, "general").await;
    let handle = transport
        .call_ok("ConversationApi.subscribe", conversation_args(&sid))
        .await;
    assert_eq!(handle["conversationSid"], sid.as_str());
    assert!(handle["listenerId"].is_string());

    let sent = transport
        .call_ok("ConversationApi.sendMessage", send_args(&sid, "hello"))
        .await;
    assert_eq!(sent["body"], "hello");
    assert_eq!(sent["author"], "alice");

    let pushed = assert_push(
        &transport,
        OutboundEndpointKind::ClientEvents,
        "messageAdded",
    )
    .await;
    assert_eq!(pushed["conversationSid"], sid.as_str());
    assert_eq!(pushed["message"], sent);
    assert_eq!(transport.sender_threads(), vec![bridge.delivery_thread().to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn events_from_another_participant_arrive_in_order() {
    integration_test_utils::init_logging();
    let (alice_bridge, service) = make_bridge("alice", BridgeConfig::default());
    let bob_bridge =
        ConversationsBridge::new("bob", BridgeConfig::default(), Arc::new(service.clone()))
            .expect("bridge creation should succeed");
    let alice = Arc::new(RecordingTransport::new("alice"));
    let bob = Arc::new(RecordingTransport::new("bob"));
    attach(&alice_bridge, &alice).await;
    let bob_transport: Arc<dyn ChannelTransport> = bob.clone();
    bob_bridge
        .attach(bob_transport, HostContext::new("bob-host"))
        .await;

    sign_in(&alice, &service, "alice").await;
    sign_in(&bob, &service, "bob").await;
    let sid = create_conversation(&alice, "pair").await;
    alice
        .call_ok(
            "ConversationApi.addParticipantByIdentity",
            conversation_args(&sid).with("identity", "bob"),
        )
        .await;
    bob.call_ok("ConversationApi.subscribe", conversation_args(&sid))
        .await;

    for body in ["one", "two", "three"] {
        alice
            .call_ok("ConversationApi.sendMessage", send_args(&sid, body))
            .await;
    }

    assert!(bob.wait_for_pushes(3, REPLY_TIMEOUT).await);
    let bodies: Vec<_> = bob
        .pushes_of(OutboundEndpointKind::ClientEvents, "messageAdded")
        .into_iter()
        .map(|payload| payload["message"]["body"].clone())
        .collect();
    assert_eq!(bodies, vec![json!("one"), json!("two"), json!("three")]);
    assert!(alice
        .pushes_of(OutboundEndpointKind::ClientEvents, "messageAdded")
        .is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn resubscribing_replaces_the_listener() {
    integration_test_utils::init_logging();
    let (bridge, service) = make_bridge("resubscribe", BridgeConfig::default());
    let transport = Arc::new(RecordingTransport::new("primary"));
    attach(&bridge, &transport).await;
    sign_in(&transport, &service, "alice").await;
    let sid = create_conversation(&transport, "general").await;

    let first = transport
        .call_ok("ConversationApi.subscribe", conversation_args(&sid))
        .await;
    let second = transport
        .call_ok("ConversationApi.subscribe", conversation_args(&sid))
        .await;

    assert_ne!(first["listenerId"], second["listenerId"]);
    assert_eq!(service.listener_count(&sid), 1);
    assert_eq!(bridge.subscribed_entities().await, vec![sid.clone()]);

    let typing = ParticipantSnapshot {
        sid: "MB1".to_string(),
        conversation_sid: sid.clone(),
        identity: "bob".to_string(),
        attributes: json!({}),
    };
    assert!(service.emit(&sid, ConversationEvent::TypingStarted(typing)).await);

    assert_push(&transport, OutboundEndpointKind::ClientEvents, "typingStarted").await;
    tokio::time::sleep(SETTLE).await;
    assert_eq!(
        transport
            .pushes_of(OutboundEndpointKind::ClientEvents, "typingStarted")
            .len(),
        1
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unsubscribe_reports_whether_a_listener_was_removed() {
    integration_test_utils::init_logging();
    let (bridge, service) = make_bridge("unsubscribe", BridgeConfig::default());
    let transport = Arc::new(RecordingTransport::new("primary"));
    attach(&bridge, &transport).await;
    sign_in(&transport, &service, "alice").await;
    let sid = create_conversation(&transport, "general").await;
    transport
        .call_ok("ConversationApi.subscribe", conversation_args(&sid))
        .await;

    let removed = transport
        .call_ok("ConversationApi.unsubscribe", conversation_args(&sid))
        .await;
    let again = transport
        .call_ok("ConversationApi.unsubscribe", conversation_args(&sid))
        .await;

    assert_eq!(removed, json!({ "removed": true }));
    assert_eq!(again, json!({ "removed": false }));
    assert_eq!(service.listener_count(&sid), 0);

    transport.clear_sent();
    transport
        .call_ok("ConversationApi.sendMessage", send_args(&sid, "unheard"))
        .await;
    tokio::time::sleep(SETTLE).await;
    assert!(transport
        .pushes_of(OutboundEndpointKind::ClientEvents, "messageAdded")
        .is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn leaving_a_conversation_drops_its_listener() {
    integration_test_utils::init_logging();
    let (bridge, service) = make_bridge("leave", BridgeConfig::default());
    let transport = Arc::new(RecordingTransport::new("primary"));
    attach(&bridge, &transport).await;
    sign_in(&transport, &service, "alice").await;
    let sid = create_conversation(&transport, "general").await;
    transport
        .call_ok("ConversationApi.subscribe", conversation_args(&sid))
        .await;

    transport
        .call_ok("ConversationApi.leave", conversation_args(&sid))
        .await;

    let deleted = assert_push(
        &transport,
        OutboundEndpointKind::ClientEvents,
        "participantDeleted",
    )
    .await;
    assert_eq!(deleted["participant"]["identity"], "alice");
    assert!(bridge.subscribed_entities().await.is_empty());
    assert_eq!(service.listener_count(&sid), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn destroying_a_conversation_drops_its_listener() {
    integration_test_utils::init_logging();
    let (bridge, service) = make_bridge("destroy", BridgeConfig::default());
    let transport = Arc::new(RecordingTransport::new("primary"));
    attach(&bridge, &transport).await;
    sign_in(&transport, &service, "alice").await;
    let sid = create_conversation(&transport, "short-lived").await;
    transport
        .call_ok("ConversationApi.subscribe", conversation_args(&sid))
        .await;

    transport
        .call_ok("ConversationApi.destroy", conversation_args(&sid))
        .await;

    let deleted = assert_push(
        &transport,
        OutboundEndpointKind::ClientEvents,
        "conversationDeleted",
    )
    .await;
    assert_eq!(deleted["conversation"]["sid"], sid.as_str());
    assert!(bridge.subscribed_entities().await.is_empty());
    assert!(service.conversation_sids().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn message_participant_resolves_to_the_author() {
    integration_test_utils::init_logging();
    let (bridge, service) = make_bridge("message-participant", BridgeConfig::default());
    let transport = Arc::new(RecordingTransport::new("primary"));
    attach(&bridge, &transport).await;
    sign_in(&transport, &service, "alice").await;
    let sid = create_conversation(&transport, "general").await;
    let sent = transport
        .call_ok("ConversationApi.sendMessage", send_args(&sid, "hi"))
        .await;

    let participant = transport
        .call_ok(
            "MessageApi.getParticipant",
            conversation_args(&sid).with("messageIndex", sent["messageIndex"].clone()),
        )
        .await;
    assert_eq!(participant["identity"], "alice");

    let user = transport
        .call_ok(
            "ParticipantApi.getUser",
            conversation_args(&sid).with("participantSid", participant["sid"].clone()),
        )
        .await;
    assert_eq!(user["identity"], "alice");
    assert_eq!(user["isOnline"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_subscribes_leave_a_single_listener() {
    integration_test_utils::init_logging();
    let (bridge, service) = make_bridge("concurrent-subscribe", BridgeConfig::default());
    let transport = Arc::new(RecordingTransport::new("primary"));
    attach(&bridge, &transport).await;
    sign_in(&transport, &service, "alice").await;
    let sid = create_conversation(&transport, "busy").await;

    let subscribing: Vec<_> = (0..8)
        .map(|_| {
            let transport = transport.clone();
            let args = conversation_args(&sid);
            tokio::spawn(async move { transport.call("ConversationApi.subscribe", args).await })
        })
        .collect();
    let mut listener_ids = Vec::new();
    for task in subscribing {
        let outcome = task.await.expect("subscribe task");
        let payload = outcome.payload().expect("subscribe succeeds");
        listener_ids.push(payload["listenerId"].clone());
    }
    listener_ids.sort_by_key(|id| id.to_string());
    listener_ids.dedup();

    assert_eq!(listener_ids.len(), 8);
    assert_eq!(bridge.subscribed_entities().await, vec![sid.clone()]);
    assert_eq!(service.listener_count(&sid), 1);

    transport.clear_sent();
    transport
        .call_ok("ConversationApi.sendMessage", send_args(&sid, "once"))
        .await;
    assert_push(&transport, OutboundEndpointKind::ClientEvents, "messageAdded").await;
    tokio::time::sleep(SETTLE).await;
    assert_eq!(
        transport
            .pushes_of(OutboundEndpointKind::ClientEvents, "messageAdded")
            .len(),
        1
    );
}
