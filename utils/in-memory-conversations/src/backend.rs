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

use crate::client::InMemoryClient;
use crate::conversation::ConversationRecord;
use crate::{errors, lock};
use conversations_bridge::sdk::{ClientEvent, SdkError, UserSnapshot};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

/// The shared "service": conversations, users, issued tokens and signed-in clients.
#[derive(Default)]
pub(crate) struct Backend {
    conversations: Mutex<HashMap<String, Arc<ConversationRecord>>>,
    users: Mutex<HashMap<String, UserSnapshot>>,
    tokens: Mutex<HashMap<String, String>>,
    clients: Mutex<Vec<Weak<InMemoryClient>>>,
}

impl Backend {
    pub(crate) fn issue_token(&self, identity: &str) -> String {
        let token = format!("token-{}", uuid::Uuid::new_v4().simple());
        lock(&self.tokens).insert(token.clone(), identity.to_string());
        lock(&self.users)
            .entry(identity.to_string())
            .or_insert_with(|| UserSnapshot {
                identity: identity.to_string(),
                friendly_name: None,
                is_online: false,
                attributes: json!({}),
            });
        token
    }

    pub(crate) fn revoke_token(&self, token: &str) -> bool {
        lock(&self.tokens).remove(token).is_some()
    }

    pub(crate) fn identity_for(&self, token: &str) -> Result<String, SdkError> {
        lock(&self.tokens)
            .get(token)
            .cloned()
            .ok_or_else(errors::invalid_token)
    }

    pub(crate) fn track_client(&self, client: &Arc<InMemoryClient>) {
        let mut clients = lock(&self.clients);
        clients.retain(|tracked| tracked.strong_count() > 0);
        clients.push(Arc::downgrade(client));
    }

    pub(crate) fn live_clients(&self) -> Vec<Arc<InMemoryClient>> {
        lock(&self.clients)
            .iter()
            .filter_map(Weak::upgrade)
            .filter(|client| !client.is_shut_down())
            .collect()
    }

    pub(crate) async fn notify_clients(&self, event: ClientEvent) {
        for client in self.live_clients() {
            client.notify(event.clone()).await;
        }
    }

    pub(crate) fn insert_conversation(&self, record: Arc<ConversationRecord>) {
        lock(&self.conversations).insert(record.sid().to_string(), record);
    }

    pub(crate) fn remove_conversation(&self, sid: &str) {
        lock(&self.conversations).remove(sid);
    }

    pub(crate) fn find_conversation(
        &self,
        sid_or_unique_name: &str,
    ) -> Result<Arc<ConversationRecord>, SdkError> {
        lock(&self.conversations)
            .values()
            .find(|record| record.matches(sid_or_unique_name))
            .cloned()
            .ok_or_else(|| errors::conversation_not_found(sid_or_unique_name))
    }

    pub(crate) fn conversations_of(&self, identity: &str) -> Vec<Arc<ConversationRecord>> {
        let mut records: Vec<Arc<ConversationRecord>> = lock(&self.conversations)
            .values()
            .filter(|record| record.is_participant(identity))
            .cloned()
            .collect();
        records.sort_by(|left, right| left.sid().cmp(right.sid()));
        records
    }

    pub(crate) fn conversation_sids(&self) -> Vec<String> {
        let mut sids: Vec<String> = lock(&self.conversations).keys().cloned().collect();
        sids.sort();
        sids
    }

    pub(crate) fn user(&self, identity: &str) -> Result<UserSnapshot, SdkError> {
        lock(&self.users)
            .get(identity)
            .cloned()
            .ok_or_else(|| errors::user_not_found(identity))
    }

    pub(crate) fn update_user(
        &self,
        identity: &str,
        update: impl FnOnce(&mut UserSnapshot),
    ) -> Result<UserSnapshot, SdkError> {
        let mut users = lock(&self.users);
        let user = users
            .get_mut(identity)
            .ok_or_else(|| errors::user_not_found(identity))?;
        update(user);
        Ok(user.clone())
    }

    pub(crate) fn set_online(&self, identity: &str, online: bool) {
        if let Some(user) = lock(&self.users).get_mut(identity) {
            user.is_online = online;
        }
    }

    pub(crate) fn set_user_attributes(
        &self,
        identity: &str,
        attributes: Value,
    ) -> Result<UserSnapshot, SdkError> {
        self.update_user(identity, |user| user.attributes = attributes)
    }
}
