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

//! Shared doubles for unit tests inside the crate.

use crate::message::ChannelMessage;
use crate::sdk::{
    ClientProperties, Conversation, ConversationEvent, ConversationListener,
    ConversationSnapshot, ConversationStatus, ConversationsClient, ConversationsClientFactory,
    MessageOptions, MessageSnapshot, ParticipantSnapshot, SdkError, SynchronizationStatus,
};
use crate::status::BridgeStatus;
use crate::transport::{ChannelTransport, RequestHandler};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Conversation that only tracks listener attach/detach and refuses every SDK call.
pub(crate) struct StubConversation {
    sid: String,
    listeners: Mutex<Vec<Arc<dyn ConversationListener>>>,
    add_calls: AtomicUsize,
    remove_calls: AtomicUsize,
}

impl StubConversation {
    pub(crate) fn new(sid: &str) -> Self {
        Self {
            sid: sid.to_string(),
            listeners: Mutex::new(Vec::new()),
            add_calls: AtomicUsize::new(0),
            remove_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn attached_listeners(&self) -> usize {
        self.listeners.lock().expect("listeners lock").len()
    }

    pub(crate) fn add_calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn remove_calls(&self) -> usize {
        self.remove_calls.load(Ordering::SeqCst)
    }

    fn refused<T>(&self) -> Result<T, SdkError> {
        Err(SdkError::new(0, format!("stub conversation {}", self.sid)))
    }
}

#[async_trait]
impl Conversation for StubConversation {
    fn sid(&self) -> String {
        self.sid.clone()
    }

    async fn snapshot(&self) -> ConversationSnapshot {
        ConversationSnapshot {
            sid: self.sid.clone(),
            unique_name: None,
            friendly_name: None,
            created_by: "stub".to_string(),
            status: ConversationStatus::NotParticipating,
            synchronization_status: SynchronizationStatus::None,
            last_message_index: None,
            attributes: json!({}),
        }
    }

    fn add_listener(&self, listener: Arc<dyn ConversationListener>) {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().expect("listeners lock").push(listener);
    }

    fn remove_listener(&self, listener: &Arc<dyn ConversationListener>) {
        self.remove_calls.fetch_add(1, Ordering::SeqCst);
        self.listeners
            .lock()
            .expect("listeners lock")
            .retain(|attached| !Arc::ptr_eq(attached, listener));
    }

    async fn join(&self) -> Result<(), SdkError> {
        self.refused()
    }

    async fn leave(&self) -> Result<(), SdkError> {
        self.refused()
    }

    async fn destroy(&self) -> Result<(), SdkError> {
        self.refused()
    }

    async fn set_friendly_name(&self, _friendly_name: &str) -> Result<(), SdkError> {
        self.refused()
    }

    async fn send_message(&self, _options: MessageOptions) -> Result<MessageSnapshot, SdkError> {
        self.refused()
    }

    async fn last_messages(&self, _count: usize) -> Result<Vec<MessageSnapshot>, SdkError> {
        self.refused()
    }

    async fn messages_count(&self) -> Result<u64, SdkError> {
        self.refused()
    }

    async fn message(&self, _message_index: i64) -> Result<MessageSnapshot, SdkError> {
        self.refused()
    }

    async fn update_message_body(
        &self,
        _message_index: i64,
        _body: &str,
    ) -> Result<MessageSnapshot, SdkError> {
        self.refused()
    }

    async fn set_message_attributes(
        &self,
        _message_index: i64,
        _attributes: Value,
    ) -> Result<MessageSnapshot, SdkError> {
        self.refused()
    }

    async fn participants(&self) -> Result<Vec<ParticipantSnapshot>, SdkError> {
        self.refused()
    }

    async fn participant(&self, _participant_sid: &str) -> Result<ParticipantSnapshot, SdkError> {
        self.refused()
    }

    async fn add_participant_by_identity(&self, _identity: &str) -> Result<(), SdkError> {
        self.refused()
    }

    async fn remove_participant(&self, _participant_sid: &str) -> Result<(), SdkError> {
        self.refused()
    }

    async fn set_participant_attributes(
        &self,
        _participant_sid: &str,
        _attributes: Value,
    ) -> Result<ParticipantSnapshot, SdkError> {
        self.refused()
    }
}

/// Listener that ignores every event.
pub(crate) struct NoopConversationListener;

#[async_trait]
impl ConversationListener for NoopConversationListener {
    async fn on_event(&self, _event: ConversationEvent) {}
}

/// Transport that accepts every registration and send without recording anything.
pub(crate) struct NoopTransport;

#[async_trait]
impl ChannelTransport for NoopTransport {
    async fn register_handler(
        &self,
        _channel: &str,
        _handler: Arc<dyn RequestHandler>,
    ) -> Result<(), BridgeStatus> {
        Ok(())
    }

    async fn send(&self, _message: ChannelMessage) -> Result<(), BridgeStatus> {
        Ok(())
    }
}

/// Factory whose login always fails with an expired-token error.
pub(crate) struct RefusingFactory;

#[async_trait]
impl ConversationsClientFactory for RefusingFactory {
    async fn create(
        &self,
        _token: &str,
        _properties: ClientProperties,
    ) -> Result<Arc<dyn ConversationsClient>, SdkError> {
        Err(SdkError::new(20101, "Invalid Access Token"))
    }
}
