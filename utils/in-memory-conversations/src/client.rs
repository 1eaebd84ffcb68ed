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
use crate::conversation::{ConversationRecord, ConversationView};
use crate::{errors, lock};
use async_trait::async_trait;
use conversations_bridge::sdk::{
    ClientEvent, ClientListener, ConnectionState, Conversation, ConversationsClient, SdkError,
    UserSnapshot,
};
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// One signed-in client of the in-memory service.
pub struct InMemoryClient {
    identity: String,
    backend: Arc<Backend>,
    listener: Mutex<Option<Arc<dyn ClientListener>>>,
    shut_down: AtomicBool,
}

impl InMemoryClient {
    pub(crate) fn new(identity: String, backend: Arc<Backend>) -> Self {
        Self {
            identity,
            backend,
            listener: Mutex::new(None),
            shut_down: AtomicBool::new(false),
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    pub fn has_listener(&self) -> bool {
        lock(&self.listener).is_some()
    }

    pub(crate) async fn notify(&self, event: ClientEvent) {
        let listener = lock(&self.listener).clone();
        if let Some(listener) = listener {
            listener.on_event(event).await;
        }
    }

    fn ensure_running(&self) -> Result<(), SdkError> {
        if self.is_shut_down() {
            return Err(errors::client_shut_down());
        }
        Ok(())
    }

    fn view(&self, record: Arc<ConversationRecord>) -> Arc<dyn Conversation> {
        Arc::new(ConversationView::new(
            &self.identity,
            record,
            self.backend.clone(),
        ))
    }
}

#[async_trait]
impl ConversationsClient for InMemoryClient {
    fn my_identity(&self) -> String {
        self.identity.clone()
    }

    fn connection_state(&self) -> ConnectionState {
        if self.is_shut_down() {
            ConnectionState::Disconnected
        } else {
            ConnectionState::Connected
        }
    }

    fn set_listener(&self, listener: Option<Arc<dyn ClientListener>>) {
        *lock(&self.listener) = listener;
    }

    async fn update_token(&self, token: &str) -> Result<(), SdkError> {
        self.ensure_running()?;
        if self.backend.identity_for(token)? != self.identity {
            return Err(errors::invalid_token());
        }
        Ok(())
    }

    async fn create_conversation(
        &self,
        friendly_name: &str,
    ) -> Result<Arc<dyn Conversation>, SdkError> {
        self.ensure_running()?;
        let record = Arc::new(ConversationRecord::new(friendly_name, None, &self.identity));
        self.backend.insert_conversation(record.clone());
        debug!(
            conversation_sid = record.sid(),
            identity = self.identity.as_str(),
            "conversation created"
        );

        self.notify(ClientEvent::ConversationAdded(
            record.snapshot_for(&self.identity),
        ))
        .await;
        Ok(self.view(record))
    }

    async fn get_conversation(
        &self,
        sid_or_unique_name: &str,
    ) -> Result<Arc<dyn Conversation>, SdkError> {
        self.ensure_running()?;
        let record = self.backend.find_conversation(sid_or_unique_name)?;
        Ok(self.view(record))
    }

    async fn my_conversations(&self) -> Result<Vec<Arc<dyn Conversation>>, SdkError> {
        self.ensure_running()?;
        Ok(self
            .backend
            .conversations_of(&self.identity)
            .into_iter()
            .map(|record| self.view(record))
            .collect())
    }

    async fn user(&self, identity: &str) -> Result<UserSnapshot, SdkError> {
        self.ensure_running()?;
        self.backend.user(identity)
    }

    async fn set_user_friendly_name(
        &self,
        identity: &str,
        friendly_name: &str,
    ) -> Result<UserSnapshot, SdkError> {
        self.ensure_running()?;
        let user = self.backend.update_user(identity, |user| {
            user.friendly_name = Some(friendly_name.to_string());
        })?;
        self.backend
            .notify_clients(ClientEvent::UserUpdated(user.clone()))
            .await;
        Ok(user)
    }

    async fn set_user_attributes(
        &self,
        identity: &str,
        attributes: Value,
    ) -> Result<UserSnapshot, SdkError> {
        self.ensure_running()?;
        let user = self.backend.set_user_attributes(identity, attributes)?;
        self.backend
            .notify_clients(ClientEvent::UserUpdated(user.clone()))
            .await;
        Ok(user)
    }

    async fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }
        self.backend.set_online(&self.identity, false);
        lock(&self.listener).take();
        debug!(identity = self.identity.as_str(), "client shut down");
    }
}
