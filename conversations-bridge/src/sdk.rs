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

//! Boundary of the native conversations SDK.
//!
//! The bridge only ever talks to the SDK through these traits. Snapshots are plain
//! serializable values so handler groups can hand them straight back to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Error raised by the native SDK. Passed through to the caller unchanged.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SdkError {
    pub code: i32,
    pub message: String,
}

impl SdkError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for SdkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SDK error {}: {}", self.code, self.message)
    }
}

impl Error for SdkError {}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
    Denied,
    Error,
    FatalError,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SynchronizationStatus {
    None,
    Identifier,
    Metadata,
    All,
    Completed,
    Failed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConversationStatus {
    Joined,
    NotParticipating,
}

/// Options accepted when creating a native client.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientProperties {
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSnapshot {
    pub sid: String,
    pub unique_name: Option<String>,
    pub friendly_name: Option<String>,
    pub created_by: String,
    pub status: ConversationStatus,
    pub synchronization_status: SynchronizationStatus,
    pub last_message_index: Option<i64>,
    pub attributes: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSnapshot {
    pub sid: String,
    pub conversation_sid: String,
    pub message_index: i64,
    pub author: String,
    pub participant_sid: Option<String>,
    pub body: Option<String>,
    pub attributes: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSnapshot {
    pub sid: String,
    pub conversation_sid: String,
    pub identity: String,
    pub attributes: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSnapshot {
    pub identity: String,
    pub friendly_name: Option<String>,
    pub is_online: bool,
    pub attributes: Value,
}

/// Message contents for [`Conversation::send_message`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageOptions {
    pub body: String,
    #[serde(default)]
    pub attributes: Option<Value>,
}

/// Events the SDK raises for one conversation.
#[derive(Clone, Debug, PartialEq)]
pub enum ConversationEvent {
    ConversationUpdated(ConversationSnapshot),
    MessageAdded(MessageSnapshot),
    MessageUpdated(MessageSnapshot),
    MessageDeleted(MessageSnapshot),
    ParticipantAdded(ParticipantSnapshot),
    ParticipantUpdated(ParticipantSnapshot),
    ParticipantDeleted(ParticipantSnapshot),
    TypingStarted(ParticipantSnapshot),
    TypingEnded(ParticipantSnapshot),
    SynchronizationChanged(ConversationSnapshot),
}

/// Events the SDK raises for the client as a whole.
#[derive(Clone, Debug, PartialEq)]
pub enum ClientEvent {
    ConnectionStateChanged(ConnectionState),
    ClientSynchronization(SynchronizationStatus),
    ConversationAdded(ConversationSnapshot),
    ConversationUpdated(ConversationSnapshot),
    ConversationDeleted(ConversationSnapshot),
    TokenAboutToExpire,
    TokenExpired,
    UserUpdated(UserSnapshot),
    Error(SdkError),
}

/// Receives events for one conversation. May be invoked from any thread.
#[async_trait]
pub trait ConversationListener: Send + Sync {
    async fn on_event(&self, event: ConversationEvent);
}

/// Receives client-wide events. May be invoked from any thread.
#[async_trait]
pub trait ClientListener: Send + Sync {
    async fn on_event(&self, event: ClientEvent);
}

/// Creates native clients; the login step of the SDK.
#[async_trait]
pub trait ConversationsClientFactory: Send + Sync {
    async fn create(
        &self,
        token: &str,
        properties: ClientProperties,
    ) -> Result<Arc<dyn ConversationsClient>, SdkError>;
}

/// Top-level native client handle.
#[async_trait]
pub trait ConversationsClient: Send + Sync {
    fn my_identity(&self) -> String;

    fn connection_state(&self) -> ConnectionState;

    /// Replaces the client listener; `None` removes it.
    fn set_listener(&self, listener: Option<Arc<dyn ClientListener>>);

    async fn update_token(&self, token: &str) -> Result<(), SdkError>;

    async fn create_conversation(
        &self,
        friendly_name: &str,
    ) -> Result<Arc<dyn Conversation>, SdkError>;

    async fn get_conversation(
        &self,
        sid_or_unique_name: &str,
    ) -> Result<Arc<dyn Conversation>, SdkError>;

    async fn my_conversations(&self) -> Result<Vec<Arc<dyn Conversation>>, SdkError>;

    async fn user(&self, identity: &str) -> Result<UserSnapshot, SdkError>;

    async fn set_user_friendly_name(
        &self,
        identity: &str,
        friendly_name: &str,
    ) -> Result<UserSnapshot, SdkError>;

    async fn set_user_attributes(
        &self,
        identity: &str,
        attributes: Value,
    ) -> Result<UserSnapshot, SdkError>;

    async fn shutdown(&self);
}

/// A native conversation entity.
#[async_trait]
pub trait Conversation: Send + Sync {
    fn sid(&self) -> String;

    async fn snapshot(&self) -> ConversationSnapshot;

    fn add_listener(&self, listener: Arc<dyn ConversationListener>);

    /// Removes a listener previously passed to [`Conversation::add_listener`], by identity.
    fn remove_listener(&self, listener: &Arc<dyn ConversationListener>);

    async fn join(&self) -> Result<(), SdkError>;

    async fn leave(&self) -> Result<(), SdkError>;

    async fn destroy(&self) -> Result<(), SdkError>;

    async fn set_friendly_name(&self, friendly_name: &str) -> Result<(), SdkError>;

    async fn send_message(&self, options: MessageOptions) -> Result<MessageSnapshot, SdkError>;

    async fn last_messages(&self, count: usize) -> Result<Vec<MessageSnapshot>, SdkError>;

    async fn messages_count(&self) -> Result<u64, SdkError>;

    async fn message(&self, message_index: i64) -> Result<MessageSnapshot, SdkError>;

    async fn update_message_body(
        &self,
        message_index: i64,
        body: &str,
    ) -> Result<MessageSnapshot, SdkError>;

    async fn set_message_attributes(
        &self,
        message_index: i64,
        attributes: Value,
    ) -> Result<MessageSnapshot, SdkError>;

    async fn participants(&self) -> Result<Vec<ParticipantSnapshot>, SdkError>;

    async fn participant(&self, participant_sid: &str) -> Result<ParticipantSnapshot, SdkError>;

    async fn add_participant_by_identity(&self, identity: &str) -> Result<(), SdkError>;

    async fn remove_participant(&self, participant_sid: &str) -> Result<(), SdkError>;

    async fn set_participant_attributes(
        &self,
        participant_sid: &str,
        attributes: Value,
    ) -> Result<ParticipantSnapshot, SdkError>;
}
