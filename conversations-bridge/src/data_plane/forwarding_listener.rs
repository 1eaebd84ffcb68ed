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

//! SDK listeners that turn native events into `client_events` pushes.
//!
//! Both listeners resolve the endpoint set at event time, so an event raised after a
//! re-attach goes out on the newest transport binding.

use crate::control_plane::outbound::EndpointSlot;
use crate::observability::{events, fields};
use crate::sdk::{ClientEvent, ClientListener, ConversationEvent, ConversationListener};
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

const COMPONENT: &str = "forwarding_listener";

fn forward(endpoints: &EndpointSlot, entity_id: Option<&str>, method: &str, payload: Value) {
    let Some(current) = endpoints.current() else {
        debug!(
            event = events::EVENT_DROPPED_UNATTACHED,
            component = COMPONENT,
            entity_id = fields::format_optional(entity_id).as_str(),
            method,
            reason = fields::REASON_NOT_ATTACHED,
            "dropping event; no outbound endpoints"
        );
        return;
    };

    debug!(
        event = events::EVENT_FORWARD,
        component = COMPONENT,
        entity_id = fields::format_optional(entity_id).as_str(),
        method,
        epoch = current.epoch,
        "forwarding event"
    );
    current.client_events.push(method, payload);
}

/// Forwards the events of one conversation.
pub(crate) struct ForwardingConversationListener {
    entity_id: String,
    endpoints: EndpointSlot,
}

impl ForwardingConversationListener {
    pub(crate) fn new(entity_id: &str, endpoints: EndpointSlot) -> Self {
        Self {
            entity_id: entity_id.to_string(),
            endpoints,
        }
    }

    fn translate(&self, event: ConversationEvent) -> (&'static str, Value) {
        let sid = self.entity_id.as_str();
        match event {
            ConversationEvent::ConversationUpdated(conversation) => (
                "conversationUpdated",
                json!({ "conversationSid": sid, "conversation": conversation }),
            ),
            ConversationEvent::SynchronizationChanged(conversation) => (
                "conversationSynchronizationChange",
                json!({ "conversationSid": sid, "conversation": conversation }),
            ),
            ConversationEvent::MessageAdded(message) => (
                "messageAdded",
                json!({ "conversationSid": sid, "message": message }),
            ),
            ConversationEvent::MessageUpdated(message) => (
                "messageUpdated",
                json!({ "conversationSid": sid, "message": message }),
            ),
            ConversationEvent::MessageDeleted(message) => (
                "messageDeleted",
                json!({ "conversationSid": sid, "message": message }),
            ),
            ConversationEvent::ParticipantAdded(participant) => (
                "participantAdded",
                json!({ "conversationSid": sid, "participant": participant }),
            ),
            ConversationEvent::ParticipantUpdated(participant) => (
                "participantUpdated",
                json!({ "conversationSid": sid, "participant": participant }),
            ),
            ConversationEvent::ParticipantDeleted(participant) => (
                "participantDeleted",
                json!({ "conversationSid": sid, "participant": participant }),
            ),
            ConversationEvent::TypingStarted(participant) => (
                "typingStarted",
                json!({ "conversationSid": sid, "participant": participant }),
            ),
            ConversationEvent::TypingEnded(participant) => (
                "typingEnded",
                json!({ "conversationSid": sid, "participant": participant }),
            ),
        }
    }
}

#[async_trait]
impl ConversationListener for ForwardingConversationListener {
    async fn on_event(&self, event: ConversationEvent) {
        let (method, payload) = self.translate(event);
        forward(&self.endpoints, Some(&self.entity_id), method, payload);
    }
}

/// Forwards client-wide events.
pub(crate) struct ForwardingClientListener {
    endpoints: EndpointSlot,
}

impl ForwardingClientListener {
    pub(crate) fn new(endpoints: EndpointSlot) -> Self {
        Self { endpoints }
    }
}

fn translate_client_event(event: ClientEvent) -> (&'static str, Option<String>, Value) {
    match event {
        ClientEvent::ConnectionStateChanged(state) => {
            ("connectionStateChange", None, json!({ "connectionState": state }))
        }
        ClientEvent::ClientSynchronization(status) => (
            "clientSynchronization",
            None,
            json!({ "synchronizationStatus": status }),
        ),
        ClientEvent::ConversationAdded(conversation) => (
            "conversationAdded",
            Some(conversation.sid.clone()),
            json!({ "conversation": conversation }),
        ),
        ClientEvent::ConversationUpdated(conversation) => (
            "conversationUpdated",
            Some(conversation.sid.clone()),
            json!({ "conversationSid": conversation.sid, "conversation": conversation }),
        ),
        ClientEvent::ConversationDeleted(conversation) => (
            "conversationDeleted",
            Some(conversation.sid.clone()),
            json!({ "conversation": conversation }),
        ),
        ClientEvent::TokenAboutToExpire => ("tokenAboutToExpire", None, json!({})),
        ClientEvent::TokenExpired => ("tokenExpired", None, json!({})),
        ClientEvent::UserUpdated(user) => ("userUpdated", None, json!({ "user": user })),
        ClientEvent::Error(err) => ("error", None, json!({ "errorInfo": err })),
    }
}

#[async_trait]
impl ClientListener for ForwardingClientListener {
    async fn on_event(&self, event: ClientEvent) {
        let (method, entity_id, payload) = translate_client_event(event);
        forward(&self.endpoints, entity_id.as_deref(), method, payload);
    }
}
