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

//! Attach/detach transitions of a bridge.
//!
//! Both transitions run entirely under the bridge mutex. Handler registration therefore runs
//! at most once per `initialized` lifetime, and an RPC that needs the native client waits
//! until registration has finished.

use crate::config::{HostContext, ReattachPolicy};
use crate::control_plane::bridge_state::BridgeState;
use crate::control_plane::outbound::OutboundEndpoints;
use crate::control_plane::transport_identity::TransportIdentityKey;
use crate::handlers::{GroupRequestHandler, HandlerGroup};
use crate::message::channel_name;
use crate::observability::events;
use crate::transport::ChannelTransport;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::{debug, info, warn};

const COMPONENT: &str = "lifecycle";

/// What an attach did with the handler groups.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AttachOutcome {
    /// First attach of this `initialized` lifetime; every group was registered.
    Registered,
    /// Already attached; the transport and endpoints were rebound, registrations untouched.
    Rebound,
    /// Already attached on another transport; every group was registered again on the new one.
    Reregistered,
}

impl Display for AttachOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let outcome = match self {
            AttachOutcome::Registered => "registered",
            AttachOutcome::Rebound => "rebound",
            AttachOutcome::Reregistered => "reregistered",
        };
        f.write_str(outcome)
    }
}

/// Result of one attach.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttachReport {
    pub outcome: AttachOutcome,
    pub epoch: u64,
    /// Channels registered by this attach.
    pub registered_channels: usize,
    /// Channels the transport refused; already logged at `warn`.
    pub failed_channels: Vec<String>,
}

#[derive(Default)]
struct Registration {
    registered: usize,
    failed: Vec<String>,
}

async fn register_groups(
    state: &Arc<BridgeState>,
    groups: &[Arc<dyn HandlerGroup>],
    transport: &Arc<dyn ChannelTransport>,
) -> Registration {
    let mut registration = Registration::default();

    for group in groups {
        let handler = Arc::new(GroupRequestHandler::new(
            Arc::downgrade(state),
            group.clone(),
            transport.clone(),
            state.queue.clone(),
        ));

        for method in group.methods() {
            let channel = channel_name(group.api(), method);
            match transport.register_handler(&channel, handler.clone()).await {
                Ok(()) => {
                    registration.registered += 1;
                    debug!(
                        event = events::HANDLER_REGISTER_OK,
                        component = COMPONENT,
                        bridge = state.name.as_str(),
                        channel = channel.as_str(),
                        "handler registered"
                    );
                }
                Err(err) => {
                    warn!(
                        event = events::HANDLER_REGISTER_FAILED,
                        component = COMPONENT,
                        bridge = state.name.as_str(),
                        channel = channel.as_str(),
                        err = %err,
                        "unable to register handler"
                    );
                    registration.failed.push(channel);
                }
            }
        }
    }

    registration
}

pub(crate) async fn attach(
    state: &Arc<BridgeState>,
    groups: &[Arc<dyn HandlerGroup>],
    transport: Arc<dyn ChannelTransport>,
    host: HostContext,
) -> AttachReport {
    let mut inner = state.inner.lock().await;
    inner.attach_epoch += 1;
    let epoch = inner.attach_epoch;

    info!(
        event = events::ATTACH_START,
        component = COMPONENT,
        bridge = state.name.as_str(),
        host = host.name.as_str(),
        epoch,
        initialized = inner.initialized,
        "attaching bridge"
    );

    let host_name = host.name.clone();
    inner.transport = Some(transport.clone());
    inner.host = Some(host);

    state.endpoints.replace(OutboundEndpoints::build(
        epoch,
        transport.clone(),
        state.queue.clone(),
    ));
    debug!(
        event = events::ENDPOINTS_REBUILT,
        component = COMPONENT,
        bridge = state.name.as_str(),
        epoch,
        "outbound endpoints rebuilt"
    );

    let reregister_needed = match state.reattach_policy {
        ReattachPolicy::SkipRegistration => false,
        ReattachPolicy::Reregister => !inner
            .registered_on
            .as_ref()
            .is_some_and(|key| key.is(&transport)),
    };

    let (outcome, registration) = if !inner.initialized {
        let registration = register_groups(state, groups, &transport).await;
        inner.registered_on = Some(TransportIdentityKey::new(transport));
        inner.initialized = true;
        (AttachOutcome::Registered, registration)
    } else if reregister_needed {
        let registration = register_groups(state, groups, &transport).await;
        inner.registered_on = Some(TransportIdentityKey::new(transport));
        (AttachOutcome::Reregistered, registration)
    } else {
        (AttachOutcome::Rebound, Registration::default())
    };
    drop(inner);

    let event = match outcome {
        AttachOutcome::Registered => events::ATTACH_REGISTERED,
        AttachOutcome::Rebound => events::ATTACH_REBOUND,
        AttachOutcome::Reregistered => events::ATTACH_REREGISTERED,
    };
    info!(
        event,
        component = COMPONENT,
        bridge = state.name.as_str(),
        epoch,
        outcome = %outcome,
        registered_channels = registration.registered,
        failed_channels = registration.failed.len(),
        "bridge attached"
    );
    state
        .debug
        .debug(&format!("attached to {host_name} ({outcome}, epoch {epoch})"));

    AttachReport {
        outcome,
        epoch,
        registered_channels: registration.registered,
        failed_channels: registration.failed,
    }
}

/// Marks the bridge as not initialized. The native client, the listener registry, the
/// transport and the endpoints are all kept; detach is not logout.
pub(crate) async fn detach(state: &Arc<BridgeState>) {
    let mut inner = state.inner.lock().await;
    let was_initialized = inner.initialized;
    inner.initialized = false;
    let retained_listeners = inner.listeners.len();
    let has_client = inner.native_client.is_some();
    let has_transport = inner.transport.is_some();
    drop(inner);

    info!(
        event = events::DETACH,
        component = COMPONENT,
        bridge = state.name.as_str(),
        was_initialized,
        has_client,
        has_transport,
        retained_listeners,
        "bridge detached"
    );
    state.debug.debug("detached from host");
}
