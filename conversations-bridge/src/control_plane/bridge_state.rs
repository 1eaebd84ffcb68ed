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

//! Shared state of one bridge instance.
//!
//! Everything that mutates (transport binding, native client, listener registry, lifecycle
//! flags) sits behind one async mutex. The endpoint slot and the debug relay live outside it
//! so SDK callbacks can push without touching that mutex.

use crate::config::{BridgeConfig, HostContext, ReattachPolicy};
use crate::control_plane::outbound::EndpointSlot;
use crate::control_plane::transport_identity::TransportIdentityKey;
use crate::data_plane::debug_relay::{DebugRelay, DiagnosticSink};
use crate::data_plane::delivery_worker::DeliveryQueue;
use crate::data_plane::forwarding_listener::{
    ForwardingClientListener, ForwardingConversationListener,
};
use crate::data_plane::listener_registry::{ListenerHandle, ListenerRegistry};
use crate::observability::events;
use crate::sdk::{Conversation, ConversationsClient, ConversationsClientFactory};
use crate::status::BridgeStatus;
use crate::transport::ChannelTransport;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

const COMPONENT: &str = "bridge_state";

pub(crate) struct BridgeInner {
    pub(crate) transport: Option<Arc<dyn ChannelTransport>>,
    pub(crate) host: Option<HostContext>,
    pub(crate) native_client: Option<Arc<dyn ConversationsClient>>,
    pub(crate) initialized: bool,
    pub(crate) registered_on: Option<TransportIdentityKey>,
    pub(crate) attach_epoch: u64,
    pub(crate) listeners: ListenerRegistry,
}

pub(crate) struct BridgeState {
    pub(crate) name: String,
    pub(crate) reattach_policy: ReattachPolicy,
    pub(crate) inner: Mutex<BridgeInner>,
    pub(crate) endpoints: EndpointSlot,
    pub(crate) debug: DebugRelay,
    pub(crate) queue: DeliveryQueue,
    pub(crate) client_factory: Arc<dyn ConversationsClientFactory>,
}

impl BridgeState {
    pub(crate) fn new(
        name: &str,
        config: &BridgeConfig,
        client_factory: Arc<dyn ConversationsClientFactory>,
        sink: Arc<dyn DiagnosticSink>,
        queue: DeliveryQueue,
    ) -> Self {
        let endpoints = EndpointSlot::default();
        Self {
            name: name.to_string(),
            reattach_policy: config.reattach_policy,
            inner: Mutex::new(BridgeInner {
                transport: None,
                host: None,
                native_client: None,
                initialized: false,
                registered_on: None,
                attach_epoch: 0,
                listeners: ListenerRegistry::new(),
            }),
            debug: DebugRelay::new(config.debug, sink, endpoints.clone()),
            endpoints,
            queue,
            client_factory,
        }
    }

    /// Clones the native client out from under the mutex.
    pub(crate) async fn client(&self) -> Result<Arc<dyn ConversationsClient>, BridgeStatus> {
        self.inner
            .lock()
            .await
            .native_client
            .clone()
            .ok_or_else(BridgeStatus::client_not_initialized)
    }

    pub(crate) async fn conversation(
        &self,
        sid_or_unique_name: &str,
    ) -> Result<Arc<dyn Conversation>, BridgeStatus> {
        let client = self.client().await?;
        Ok(client.get_conversation(sid_or_unique_name).await?)
    }

    /// Looks up `sid` and registers a forwarding listener for it, replacing any previous one.
    ///
    /// The registry insert only happens while the client used for the lookup is still the
    /// installed one; a shutdown or replace that lands during the lookup wins.
    pub(crate) async fn subscribe(&self, sid: &str) -> Result<ListenerHandle, BridgeStatus> {
        let client = self.client().await?;
        let conversation = client.get_conversation(sid).await?;

        let mut inner = self.inner.lock().await;
        let still_installed = inner
            .native_client
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &client));
        if !still_installed {
            debug!(
                event = events::LISTENER_SUBSCRIBE_STALE,
                component = COMPONENT,
                bridge = self.name.as_str(),
                entity_id = sid,
                "client changed during lookup, listener not registered"
            );
            return Err(BridgeStatus::client_not_initialized());
        }

        let endpoints = self.endpoints.clone();
        Ok(inner.listeners.subscribe(conversation, move |entity_id| {
            Arc::new(ForwardingConversationListener::new(entity_id, endpoints))
        }))
    }

    pub(crate) async fn unsubscribe(&self, entity_id: &str) -> bool {
        self.inner.lock().await.listeners.unsubscribe(entity_id)
    }

    /// Makes `client` the native client. A previous client is shut down first and every
    /// listener attached through it is dropped.
    pub(crate) async fn install_client(&self, client: Arc<dyn ConversationsClient>) {
        let mut inner = self.inner.lock().await;

        let replaced = match inner.native_client.take() {
            Some(previous) => {
                inner.listeners.clear();
                previous.set_listener(None);
                previous.shutdown().await;
                true
            }
            None => false,
        };

        client.set_listener(Some(Arc::new(ForwardingClientListener::new(
            self.endpoints.clone(),
        ))));
        let identity = client.my_identity();
        inner.native_client = Some(client);

        if replaced {
            info!(
                event = events::CLIENT_REPLACED,
                component = COMPONENT,
                bridge = self.name.as_str(),
                identity = identity.as_str(),
                "native client replaced"
            );
        } else {
            info!(
                event = events::CLIENT_INSTALLED,
                component = COMPONENT,
                bridge = self.name.as_str(),
                identity = identity.as_str(),
                "native client installed"
            );
        }
    }

    /// Clears the registry and shuts down the native client. Returns `false` when there was
    /// no client.
    pub(crate) async fn shutdown_client(&self) -> bool {
        let mut inner = self.inner.lock().await;
        let removed = inner.listeners.clear();

        let Some(client) = inner.native_client.take() else {
            return false;
        };
        client.set_listener(None);
        client.shutdown().await;

        info!(
            event = events::CLIENT_SHUTDOWN,
            component = COMPONENT,
            bridge = self.name.as_str(),
            removed_listeners = removed,
            "native client shut down"
        );
        true
    }
}
