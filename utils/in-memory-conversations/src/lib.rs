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

//! In-process implementation of the native conversations SDK traits.
//!
//! One [`InMemoryConversations`] value is one service: it issues tokens, acts as the client
//! factory, and keeps conversations, participants, messages and users in memory. SDK events
//! are raised synchronously on the calling task, in the order the mutations happen.
//!
//! ```
//! use conversations_bridge::sdk::{
//!     ClientProperties, Conversation, ConversationsClient, ConversationsClientFactory,
//! };
//! use in_memory_conversations::InMemoryConversations;
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let service = InMemoryConversations::new();
//! let token = service.issue_token("alice");
//!
//! let client = service.create(&token, ClientProperties::default()).await.unwrap();
//! let conversation = client.create_conversation("general").await.unwrap();
//!
//! assert_eq!(service.conversation_sids(), vec![conversation.sid()]);
//! # });
//! ```

mod backend;
mod client;
mod conversation;
pub mod errors;

use async_trait::async_trait;
use backend::Backend;
pub use client::InMemoryClient;
use conversation::ConversationRecord;
use conversations_bridge::sdk::{
    ClientEvent, ClientProperties, ConversationEvent, ConversationsClient,
    ConversationsClientFactory, SdkError,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Clone, Default)]
pub struct InMemoryConversations {
    backend: Arc<Backend>,
    clients_created: Arc<AtomicUsize>,
}

impl InMemoryConversations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `identity` as a user and returns a token that signs it in.
    pub fn issue_token(&self, identity: &str) -> String {
        self.backend.issue_token(identity)
    }

    pub fn revoke_token(&self, token: &str) -> bool {
        self.backend.revoke_token(token)
    }

    /// Creates a conversation outside any client, e.g. to look it up by unique name later.
    pub fn seed_conversation(
        &self,
        friendly_name: &str,
        unique_name: Option<&str>,
        created_by: &str,
    ) -> String {
        let record = Arc::new(ConversationRecord::new(
            friendly_name,
            unique_name,
            created_by,
        ));
        let sid = record.sid().to_string();
        self.backend.insert_conversation(record);
        sid
    }

    pub fn conversation_sids(&self) -> Vec<String> {
        self.backend.conversation_sids()
    }

    /// Number of listeners attached to conversation `sid`; zero when it does not exist.
    pub fn listener_count(&self, sid: &str) -> usize {
        self.backend
            .find_conversation(sid)
            .map(|record| record.listener_count())
            .unwrap_or(0)
    }

    /// Raises `event` on conversation `sid` as if the service had pushed it.
    pub async fn emit(&self, sid: &str, event: ConversationEvent) -> bool {
        match self.backend.find_conversation(sid) {
            Ok(record) => {
                record.notify(event).await;
                true
            }
            Err(_) => false,
        }
    }

    /// Raises `event` on every signed-in client.
    pub async fn emit_client_event(&self, event: ClientEvent) {
        self.backend.notify_clients(event).await;
    }

    pub fn clients_created(&self) -> usize {
        self.clients_created.load(Ordering::SeqCst)
    }

    /// Clients that are signed in and not shut down.
    pub fn live_clients(&self) -> Vec<Arc<InMemoryClient>> {
        self.backend.live_clients()
    }
}

#[async_trait]
impl ConversationsClientFactory for InMemoryConversations {
    async fn create(
        &self,
        token: &str,
        properties: ClientProperties,
    ) -> Result<Arc<dyn ConversationsClient>, SdkError> {
        let identity = self.backend.identity_for(token)?;
        let client = Arc::new(InMemoryClient::new(identity.clone(), self.backend.clone()));
        self.backend.track_client(&client);
        self.backend.set_online(&identity, true);
        self.clients_created.fetch_add(1, Ordering::SeqCst);

        debug!(
            identity = identity.as_str(),
            region = properties.region.as_deref().unwrap_or("us1"),
            "client signed in"
        );
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::{errors, InMemoryConversations};
    use async_trait::async_trait;
    use conversations_bridge::sdk::{
        ClientProperties, Conversation, ConversationEvent, ConversationListener,
        ConversationStatus, ConversationsClient, ConversationsClientFactory, MessageOptions,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingListener {
        events: Mutex<Vec<ConversationEvent>>,
    }

    #[async_trait]
    impl ConversationListener for RecordingListener {
        async fn on_event(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let service = InMemoryConversations::new();

        let err = service
            .create("not-issued", ClientProperties::default())
            .await
            .err()
            .unwrap();

        assert_eq!(err.code, errors::INVALID_ACCESS_TOKEN);
        assert_eq!(service.clients_created(), 0);
    }

    #[tokio::test]
    async fn messages_reach_listeners_of_every_view() {
        let service = InMemoryConversations::new();
        let alice = service
            .create(&service.issue_token("alice"), ClientProperties::default())
            .await
            .unwrap();
        let bob = service
            .create(&service.issue_token("bob"), ClientProperties::default())
            .await
            .unwrap();

        let created = alice.create_conversation("general").await.unwrap();
        let sid = created.sid();
        let seen_by_bob = bob.get_conversation(&sid).await.unwrap();
        let listener = Arc::new(RecordingListener::default());
        let listener_dyn: Arc<dyn ConversationListener> = listener.clone();
        seen_by_bob.add_listener(listener_dyn.clone());

        let message = created
            .send_message(MessageOptions {
                body: "hello".to_string(),
                attributes: None,
            })
            .await
            .unwrap();

        assert_eq!(message.message_index, 0);
        assert_eq!(message.author, "alice");
        assert_eq!(
            *listener.events.lock().unwrap(),
            vec![ConversationEvent::MessageAdded(message)]
        );
        assert_eq!(
            seen_by_bob.snapshot().await.status,
            ConversationStatus::NotParticipating
        );

        seen_by_bob.remove_listener(&listener_dyn);
        assert_eq!(service.listener_count(&sid), 0);
    }

    #[tokio::test]
    async fn unique_names_resolve_to_the_seeded_conversation() {
        let service = InMemoryConversations::new();
        let client = service
            .create(&service.issue_token("alice"), ClientProperties::default())
            .await
            .unwrap();
        let sid = service.seed_conversation("Support", Some("support"), "system");

        let conversation = client.get_conversation("support").await.unwrap();

        assert_eq!(conversation.sid(), sid);
    }

    #[tokio::test]
    async fn destroyed_conversations_disappear() {
        let service = InMemoryConversations::new();
        let client = service
            .create(&service.issue_token("alice"), ClientProperties::default())
            .await
            .unwrap();
        let conversation = client.create_conversation("temp").await.unwrap();
        let sid = conversation.sid();

        conversation.destroy().await.unwrap();

        assert!(service.conversation_sids().is_empty());
        let err = client.get_conversation(&sid).await.err().unwrap();
        assert_eq!(err.code, errors::CONVERSATION_NOT_FOUND);
        assert!(conversation.join().await.is_err());
    }

    #[tokio::test]
    async fn shutdown_stops_the_client() {
        let service = InMemoryConversations::new();
        let client = service
            .create(&service.issue_token("alice"), ClientProperties::default())
            .await
            .unwrap();

        client.shutdown().await;

        assert!(service.live_clients().is_empty());
        let err = client.create_conversation("late").await.err().unwrap();
        assert_eq!(err.code, errors::CLIENT_SHUT_DOWN);
    }
}
