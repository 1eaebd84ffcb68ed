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

//! Boundary of the bidirectional message channel between caller and bridge.

use crate::message::{ChannelMessage, RpcRequest};
use crate::status::BridgeStatus;
use async_trait::async_trait;
use std::sync::Arc;

/// Receives inbound RPC calls for one registered channel name.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    /// Handles one call. The reply travels back through [`ChannelTransport::send`].
    async fn on_request(&self, request: RpcRequest);
}

/// A named-message channel to the caller.
///
/// Implementations own the inbound side: they route each [`RpcRequest`] to the handler
/// registered under its `channel`. Registering a channel name that already has a handler
/// replaces that handler.
#[async_trait]
pub trait ChannelTransport: Send + Sync {
    async fn register_handler(
        &self,
        channel: &str,
        handler: Arc<dyn RequestHandler>,
    ) -> Result<(), BridgeStatus>;

    async fn send(&self, message: ChannelMessage) -> Result<(), BridgeStatus>;
}
