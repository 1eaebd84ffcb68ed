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

use crate::backend::Backend;
use crate::{errors, lock};
use async_trait::async_trait;
use conversations_bridge::sdk::{
    ClientEvent, Conversation, ConversationEvent, ConversationListener, ConversationSnapshot,
    ConversationStatus, MessageOptions, MessageSnapshot, ParticipantSnapshot, SdkError,
    SynchronizationStatus,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

fn new_sid(prefix: &str) -> String {
    format!("{prefix}{}", Uuid::new_v4().simple())
}

struct ConversationData {
    friendly_name: Option<String>,
    unique_name: Option<String>,
    created_by: String,
    attributes: Value,
    messages: Vec<MessageSnapshot>,
    next_message_index: i64,
    participants: Vec<ParticipantSnapshot>,
    destroyed: bool,
}

/// Server-side state of one conversation, shared by every client that looks it up.
pub(crate) struct ConversationRecord {
    sid: String,
    data: Mutex<ConversationData>,
    listeners: Mutex<Vec<Arc<dyn ConversationListener>>>,
}

impl ConversationRecord {
    pub(crate) fn new(friendly_name: &str, unique_name: Option<&str>, created_by: &str) -> Self {
        let sid = new_sid("CH");
        let creator = ParticipantSnapshot {
            sid: new_sid("MB"),
            conversation_sid: sid.clone(),
            identity: created_by.to_string(),
            attributes: json!({}),
        };

        Self {
            sid,
            data: Mutex::new(ConversationData {
                friendly_name: Some(friendly_name.to_string()),
                unique_name: unique_name.map(str::to_string),
                created_by: created_by.to_string(),
                attributes: json!({}),
                messages: Vec::new(),
                next_message_index: 0,
                participants: vec![creator],
                destroyed: false,
            }),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn sid(&self) -> &str {
        &self.sid
    }

    pub(crate) fn matches(&self, sid_or_unique_name: &str) -> bool {
        self.sid == sid_or_unique_name
            || lock(&self.data).unique_name.as_deref() == Some(sid_or_unique_name)
    }

    pub(crate) fn is_participant(&self, identity: &str) -> bool {
        lock(&self.data)
            .participants
            .iter()
            .any(|participant| participant.identity == identity)
    }

    pub(crate) fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    pub(crate) fn snapshot_for(&self, identity: &str) -> ConversationSnapshot {
        let data = lock(&self.data);
        let joined = data
            .participants
            .iter()
            .any(|participant| participant.identity == identity);

        ConversationSnapshot {
            sid: self.sid.clone(),
            unique_name: data.unique_name.clone(),
            friendly_name: data.friendly_name.clone(),
            created_by: data.created_by.clone(),
            status: if joined {
                ConversationStatus::Joined
            } else {
                ConversationStatus::NotParticipating
            },
            synchronization_status: SynchronizationStatus::All,
            last_message_index: data.messages.last().map(|message| message.message_index),
            attributes: data.attributes.clone(),
        }
    }

    /// Delivers `event` to every attached listener, in attach order.
    pub(crate) async fn notify(&self, event: ConversationEvent) {
        let listeners = lock(&self.listeners).clone();
        debug!(
            conversation_sid = self.sid.as_str(),
            listeners = listeners.len(),
            "raising conversation event"
        );
        for listener in listeners {
            listener.on_event(event.clone()).await;
        }
    }

    fn with_live<T>(
        &self,
        operation: impl FnOnce(&mut ConversationData) -> Result<T, SdkError>,
    ) -> Result<T, SdkError> {
        let mut data = lock(&self.data);
        if data.destroyed {
            return Err(errors::conversation_not_found(&self.sid));
        }
        operation(&mut data)
    }

    fn mark_destroyed(&self) {
        lock(&self.data).destroyed = true;
    }
}

/// A conversation as seen by one signed-in identity.
pub(crate) struct ConversationView {
    identity: String,
    record: Arc<ConversationRecord>,
    backend: Arc<Backend>,
}

impl ConversationView {
    pub(crate) fn new(
        identity: &str,
        record: Arc<ConversationRecord>,
        backend: Arc<Backend>,
    ) -> Self {
        Self {
            identity: identity.to_string(),
            record,
            backend,
        }
    }

    fn update_message(
        &self,
        message_index: i64,
        update: impl FnOnce(&mut MessageSnapshot),
    ) -> Result<MessageSnapshot, SdkError> {
        self.record.with_live(|data| {
            let message = data
                .messages
                .iter_mut()
                .find(|message| message.message_index == message_index)
                .ok_or_else(|| errors::message_not_found(message_index))?;
            update(message);
            Ok(message.clone())
        })
    }

    fn add_participant(&self, identity: &str) -> Result<ParticipantSnapshot, SdkError> {
        let sid = self.record.sid.clone();
        self.record.with_live(|data| {
            if data
                .participants
                .iter()
                .any(|participant| participant.identity == identity)
            {
                return Err(errors::participant_exists(identity));
            }
            let participant = ParticipantSnapshot {
                sid: new_sid("MB"),
                conversation_sid: sid,
                identity: identity.to_string(),
                attributes: json!({}),
            };
            data.participants.push(participant.clone());
            Ok(participant)
        })
    }

    fn remove_participant_where(
        &self,
        key: &str,
        predicate: impl Fn(&ParticipantSnapshot) -> bool,
    ) -> Result<ParticipantSnapshot, SdkError> {
        self.record.with_live(|data| {
            let position = data
                .participants
                .iter()
                .position(predicate)
                .ok_or_else(|| errors::participant_not_found(key))?;
            Ok(data.participants.remove(position))
        })
    }
}

#[async_trait]
impl Conversation for ConversationView {
    fn sid(&self) -> String {
        self.record.sid.clone()
    }

    async fn snapshot(&self) -> ConversationSnapshot {
        self.record.snapshot_for(&self.identity)
    }

    fn add_listener(&self, listener: Arc<dyn ConversationListener>) {
        lock(&self.record.listeners).push(listener);
    }

    fn remove_listener(&self, listener: &Arc<dyn ConversationListener>) {
        lock(&self.record.listeners).retain(|attached| !Arc::ptr_eq(attached, listener));
    }

    async fn join(&self) -> Result<(), SdkError> {
        let participant = self.add_participant(&self.identity)?;
        self.record
            .notify(ConversationEvent::ParticipantAdded(participant))
            .await;
        Ok(())
    }

    async fn leave(&self) -> Result<(), SdkError> {
        let identity = self.identity.clone();
        let participant = self.remove_participant_where(&self.identity, |participant| {
            participant.identity == identity
        })?;
        self.record
            .notify(ConversationEvent::ParticipantDeleted(participant))
            .await;
        Ok(())
    }

    async fn destroy(&self) -> Result<(), SdkError> {
        self.record.with_live(|_| Ok(()))?;
        self.backend.remove_conversation(&self.record.sid);
        self.record.mark_destroyed();
        self.backend
            .notify_clients(ClientEvent::ConversationDeleted(
                self.record.snapshot_for(&self.identity),
            ))
            .await;
        Ok(())
    }

    async fn set_friendly_name(&self, friendly_name: &str) -> Result<(), SdkError> {
        self.record.with_live(|data| {
            data.friendly_name = Some(friendly_name.to_string());
            Ok(())
        })?;
        self.record
            .notify(ConversationEvent::ConversationUpdated(
                self.record.snapshot_for(&self.identity),
            ))
            .await;
        Ok(())
    }

    async fn send_message(&self, options: MessageOptions) -> Result<MessageSnapshot, SdkError> {
        let conversation_sid = self.record.sid.clone();
        let message = self.record.with_live(|data| {
            let participant_sid = data
                .participants
                .iter()
                .find(|participant| participant.identity == self.identity)
                .map(|participant| participant.sid.clone());
            let message = MessageSnapshot {
                sid: new_sid("IM"),
                conversation_sid,
                message_index: data.next_message_index,
                author: self.identity.clone(),
                participant_sid,
                body: Some(options.body),
                attributes: options.attributes.unwrap_or_else(|| json!({})),
            };
            data.next_message_index += 1;
            data.messages.push(message.clone());
            Ok(message)
        })?;

        self.record
            .notify(ConversationEvent::MessageAdded(message.clone()))
            .await;
        Ok(message)
    }

    async fn last_messages(&self, count: usize) -> Result<Vec<MessageSnapshot>, SdkError> {
        self.record.with_live(|data| {
            let start = data.messages.len().saturating_sub(count);
            Ok(data.messages[start..].to_vec())
        })
    }

    async fn messages_count(&self) -> Result<u64, SdkError> {
        self.record.with_live(|data| Ok(data.messages.len() as u64))
    }

    async fn message(&self, message_index: i64) -> Result<MessageSnapshot, SdkError> {
        self.record.with_live(|data| {
            data.messages
                .iter()
                .find(|message| message.message_index == message_index)
                .cloned()
                .ok_or_else(|| errors::message_not_found(message_index))
        })
    }

    async fn update_message_body(
        &self,
        message_index: i64,
        body: &str,
    ) -> Result<MessageSnapshot, SdkError> {
        let message = self.update_message(message_index, |message| {
            message.body = Some(body.to_string());
        })?;
        self.record
            .notify(ConversationEvent::MessageUpdated(message.clone()))
            .await;
        Ok(message)
    }

    async fn set_message_attributes(
        &self,
        message_index: i64,
        attributes: Value,
    ) -> Result<MessageSnapshot, SdkError> {
        let message = self.update_message(message_index, |message| {
            message.attributes = attributes;
        })?;
        self.record
            .notify(ConversationEvent::MessageUpdated(message.clone()))
            .await;
        Ok(message)
    }

    async fn participants(&self) -> Result<Vec<ParticipantSnapshot>, SdkError> {
        self.record.with_live(|data| Ok(data.participants.clone()))
    }

    async fn participant(&self, participant_sid: &str) -> Result<ParticipantSnapshot, SdkError> {
        self.record.with_live(|data| {
            data.participants
                .iter()
                .find(|participant| participant.sid == participant_sid)
                .cloned()
                .ok_or_else(|| errors::participant_not_found(participant_sid))
        })
    }

    async fn add_participant_by_identity(&self, identity: &str) -> Result<(), SdkError> {
        let participant = self.add_participant(identity)?;
        self.record
            .notify(ConversationEvent::ParticipantAdded(participant))
            .await;
        Ok(())
    }

    async fn remove_participant(&self, participant_sid: &str) -> Result<(), SdkError> {
        let participant = self.remove_participant_where(participant_sid, |participant| {
            participant.sid == participant_sid
        })?;
        self.record
            .notify(ConversationEvent::ParticipantDeleted(participant))
            .await;
        Ok(())
    }

    async fn set_participant_attributes(
        &self,
        participant_sid: &str,
        attributes: Value,
    ) -> Result<ParticipantSnapshot, SdkError> {
        let participant = self.record.with_live(|data| {
            let participant = data
                .participants
                .iter_mut()
                .find(|participant| participant.sid == participant_sid)
                .ok_or_else(|| errors::participant_not_found(participant_sid))?;
            participant.attributes = attributes;
            Ok(participant.clone())
        })?;
        self.record
            .notify(ConversationEvent::ParticipantUpdated(participant.clone()))
            .await;
        Ok(participant)
    }
}
