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

use crate::config::{BridgeConfig, HostContext};
use crate::control_plane::bridge_state::BridgeState;
use crate::control_plane::lifecycle::{self, AttachReport};
use crate::data_plane::debug_relay::{DiagnosticSink, TracingSink};
use crate::data_plane::delivery_worker::DeliveryWorker;
use crate::handlers::{default_groups, HandlerGroup};
use crate::observability::events;
use crate::sdk::ConversationsClientFactory;
use crate::status::BridgeStatus;
use crate::transport::ChannelTransport;
use std::sync::Arc;
use tracing::info;

const COMPONENT: &str = "bridge";

/// One bridge instance: a native client, its listener registry and the RPC surface over it.
///
/// Instances are independent; nothing is process-global. Handlers registered on a transport
/// only hold the bridge weakly, so dropping the bridge releases the native client even while
/// the transport lives on.
pub struct ConversationsBridge {
    name: String,
    state: Arc<BridgeState>,
    groups: Vec<Arc<dyn HandlerGroup>>,
    delivery: DeliveryWorker,
}

impl ConversationsBridge {
    /// Creates a bridge that relays diagnostics to `tracing`.
    ///
    /// Spawns the delivery thread; fails only when the thread cannot be started.
    pub fn new(
        name: &str,
        config: BridgeConfig,
        client_factory: Arc<dyn ConversationsClientFactory>,
    ) -> Result<Self, BridgeStatus> {
        Self::with_sink(name, config, client_factory, Arc::new(TracingSink))
    }

    /// Creates a bridge that relays diagnostics to `sink`.
    pub fn with_sink(
        name: &str,
        config: BridgeConfig,
        client_factory: Arc<dyn ConversationsClientFactory>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, BridgeStatus> {
        let (delivery, queue) = DeliveryWorker::spawn()?;
        let state = Arc::new(BridgeState::new(name, &config, client_factory, sink, queue));

        info!(
            event = events::BRIDGE_CREATE,
            component = COMPONENT,
            bridge = name,
            debug = config.debug,
            reattach_policy = ?config.reattach_policy,
            worker_id = delivery.worker_id(),
            worker_thread = delivery.runtime_thread(),
            "bridge created"
        );

        Ok(Self {
            name: name.to_string(),
            state,
            groups: default_groups(),
            delivery,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds the bridge to `transport`. Never fails; refused handler registrations are
    /// listed in the report.
    pub async fn attach(
        &self,
        transport: Arc<dyn ChannelTransport>,
        host: HostContext,
    ) -> AttachReport {
        lifecycle::attach(&self.state, &self.groups, transport, host).await
    }

    pub async fn detach(&self) {
        lifecycle::detach(&self.state).await;
    }

    /// Relays a diagnostic line when debug is enabled.
    pub fn debug(&self, message: &str) {
        self.state.debug.debug(message);
    }

    pub fn set_debug_enabled(&self, enabled: bool) {
        self.state.debug.set_enabled(enabled);
    }

    pub fn debug_enabled(&self) -> bool {
        self.state.debug.is_enabled()
    }

    pub async fn is_initialized(&self) -> bool {
        self.state.inner.lock().await.initialized
    }

    pub async fn has_native_client(&self) -> bool {
        self.state.inner.lock().await.native_client.is_some()
    }

    /// Conversation SIDs with a live forwarding listener, sorted.
    pub async fn subscribed_entities(&self) -> Vec<String> {
        self.state.inner.lock().await.listeners.entity_ids()
    }

    pub async fn attach_epoch(&self) -> u64 {
        self.state.inner.lock().await.attach_epoch
    }

    pub async fn host_context(&self) -> Option<HostContext> {
        self.state.inner.lock().await.host.clone()
    }

    /// Name of the thread every outbound message is sent from.
    pub fn delivery_thread(&self) -> &str {
        self.delivery.runtime_thread()
    }

    /// Full release: clears the registry, shuts down the native client, drops the transport
    /// binding and the endpoints. A later attach registers everything again.
    pub async fn teardown(&self) {
        self.state.shutdown_client().await;

        let mut inner = self.state.inner.lock().await;
        inner.initialized = false;
        inner.transport = None;
        inner.registered_on = None;
        self.state.endpoints.clear();
        drop(inner);

        info!(
            event = events::TEARDOWN,
            component = COMPONENT,
            bridge = self.name.as_str(),
            "bridge torn down"
        );
    }
}
