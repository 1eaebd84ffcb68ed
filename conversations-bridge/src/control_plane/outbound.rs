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

//! Reverse-channel endpoints and the slot holding the set built by the latest attach.

use crate::data_plane::delivery_worker::DeliveryQueue;
use crate::message::{ChannelMessage, OutboundEndpointKind};
use crate::transport::ChannelTransport;
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// Push handle for one logical surface, bound to one transport.
pub(crate) struct OutboundEndpoint {
    kind: OutboundEndpointKind,
    transport: Arc<dyn ChannelTransport>,
    queue: DeliveryQueue,
}

impl OutboundEndpoint {
    fn new(
        kind: OutboundEndpointKind,
        transport: Arc<dyn ChannelTransport>,
        queue: DeliveryQueue,
    ) -> Self {
        Self {
            kind,
            transport,
            queue,
        }
    }

    /// Fire-and-forget push through the delivery thread.
    pub(crate) fn push(&self, method: &str, payload: Value) -> bool {
        self.queue.enqueue(
            self.transport.clone(),
            ChannelMessage::push(self.kind, method, payload),
        )
    }
}

/// The endpoint set created by one attach.
pub(crate) struct OutboundEndpoints {
    pub(crate) epoch: u64,
    pub(crate) client_events: OutboundEndpoint,
    pub(crate) logging: OutboundEndpoint,
}

impl OutboundEndpoints {
    pub(crate) fn build(
        epoch: u64,
        transport: Arc<dyn ChannelTransport>,
        queue: DeliveryQueue,
    ) -> Self {
        Self {
            epoch,
            client_events: OutboundEndpoint::new(
                OutboundEndpointKind::ClientEvents,
                transport.clone(),
                queue.clone(),
            ),
            logging: OutboundEndpoint::new(OutboundEndpointKind::Logging, transport, queue),
        }
    }
}

/// Shared slot for the current endpoint set.
///
/// Readers are SDK callbacks and the debug relay; they must never wait on the bridge mutex,
/// so the slot has its own short-lived lock.
#[derive(Clone, Default)]
pub(crate) struct EndpointSlot {
    current: Arc<RwLock<Option<Arc<OutboundEndpoints>>>>,
}

impl EndpointSlot {
    pub(crate) fn current(&self) -> Option<Arc<OutboundEndpoints>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the endpoint set; the previous set is dropped, never kept alongside.
    pub(crate) fn replace(&self, endpoints: OutboundEndpoints) {
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(Arc::new(endpoints));
    }

    pub(crate) fn clear(&self) {
        self.current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }
}
