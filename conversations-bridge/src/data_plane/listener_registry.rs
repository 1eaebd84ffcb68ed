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

//! Per-conversation listener registry.
//!
//! Holds at most one listener per conversation SID. The registry itself is not locked; it
//! lives inside the bridge state and every mutation runs under the bridge mutex, which makes
//! a replace (detach old, attach new) atomic with respect to other mutations.

use crate::observability::events;
use crate::sdk::{Conversation, ConversationListener};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

const COMPONENT: &str = "listener_registry";

/// Identifies one live listener registration.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ListenerHandle {
    entity_id: String,
    listener_id: String,
}

impl ListenerHandle {
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn listener_id(&self) -> &str {
        &self.listener_id
    }
}

struct RegisteredListener {
    handle: ListenerHandle,
    conversation: Arc<dyn Conversation>,
    listener: Arc<dyn ConversationListener>,
}

impl RegisteredListener {
    fn detach(&self) {
        self.conversation.remove_listener(&self.listener);
    }
}

#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: HashMap<String, RegisteredListener>,
}

impl ListenerRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Attaches a fresh listener to `conversation`, first detaching any listener already
    /// registered for the same SID.
    pub(crate) fn subscribe<F>(
        &mut self,
        conversation: Arc<dyn Conversation>,
        listener_factory: F,
    ) -> ListenerHandle
    where
        F: FnOnce(&str) -> Arc<dyn ConversationListener>,
    {
        let entity_id = conversation.sid();

        if let Some(previous) = self.entries.remove(&entity_id) {
            previous.detach();
            debug!(
                event = events::LISTENER_REPLACE,
                component = COMPONENT,
                entity_id = entity_id.as_str(),
                listener_id = previous.handle.listener_id.as_str(),
                "detached previous listener before replace"
            );
        }

        let listener = listener_factory(&entity_id);
        conversation.add_listener(listener.clone());

        let handle = ListenerHandle {
            entity_id: entity_id.clone(),
            listener_id: Uuid::new_v4().hyphenated().to_string(),
        };
        debug!(
            event = events::LISTENER_SUBSCRIBE,
            component = COMPONENT,
            entity_id = entity_id.as_str(),
            listener_id = handle.listener_id.as_str(),
            "listener attached"
        );

        self.entries.insert(
            entity_id,
            RegisteredListener {
                handle: handle.clone(),
                conversation,
                listener,
            },
        );
        handle
    }

    /// Detaches and removes the entry for `entity_id`. Returns `false` if there was none.
    pub(crate) fn unsubscribe(&mut self, entity_id: &str) -> bool {
        let Some(registered) = self.entries.remove(entity_id) else {
            debug!(
                event = events::LISTENER_UNSUBSCRIBE_MISSING,
                component = COMPONENT,
                entity_id,
                "no listener registered"
            );
            return false;
        };

        registered.detach();
        debug!(
            event = events::LISTENER_UNSUBSCRIBE,
            component = COMPONENT,
            entity_id,
            listener_id = registered.handle.listener_id.as_str(),
            "listener detached"
        );
        true
    }

    /// Detaches and removes every entry, returning how many were removed.
    pub(crate) fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        for (_, registered) in self.entries.drain() {
            registered.detach();
        }
        debug!(
            event = events::LISTENER_CLEAR,
            component = COMPONENT,
            removed,
            "listener registry cleared"
        );
        removed
    }

    #[cfg(test)]
    pub(crate) fn handle(&self, entity_id: &str) -> Option<ListenerHandle> {
        self.entries
            .get(entity_id)
            .map(|registered| registered.handle.clone())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entity_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }
}
