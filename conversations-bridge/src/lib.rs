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

//! # conversations-bridge
//!
//! `conversations-bridge` exposes a native conversations SDK to a caller on the other side
//! of a named-message channel. The caller invokes RPC methods (`ConversationApi.sendMessage`,
//! `UserApi.getUser`, ...) and receives SDK events and diagnostic lines as pushes.
//!
//! Typical usage is centered on [`ConversationsBridge`]: create it with a
//! [`ConversationsClientFactory`](sdk::ConversationsClientFactory), then
//! [`attach`](ConversationsBridge::attach) it to a [`ChannelTransport`].
//!
//! ## Quick start
//!
//! ```
//! use async_trait::async_trait;
//! use conversations_bridge::{
//!     Args, BridgeConfig, BridgeStatus, ChannelMessage, ChannelTransport, ConversationsBridge,
//!     HostContext, RequestHandler, RpcRequest,
//! };
//! use in_memory_conversations::InMemoryConversations;
//! use std::collections::HashMap;
//! use std::sync::{Arc, Mutex};
//!
//! # #[derive(Default)]
//! # struct LoopbackTransport {
//! #     handlers: Mutex<HashMap<String, Arc<dyn RequestHandler>>>,
//! # }
//! #
//! # #[async_trait]
//! # impl ChannelTransport for LoopbackTransport {
//! #     async fn register_handler(
//! #         &self,
//! #         channel: &str,
//! #         handler: Arc<dyn RequestHandler>,
//! #     ) -> Result<(), BridgeStatus> {
//! #         self.handlers.lock().unwrap().insert(channel.to_string(), handler);
//! #         Ok(())
//! #     }
//! #
//! #     async fn send(&self, _message: ChannelMessage) -> Result<(), BridgeStatus> {
//! #         Ok(())
//! #     }
//! # }
//! #
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let service = InMemoryConversations::new();
//! let token = service.issue_token("alice");
//!
//! let bridge = ConversationsBridge::new(
//!     "quick-start",
//!     BridgeConfig::default(),
//!     Arc::new(service.clone()),
//! )
//! .unwrap();
//! let transport = Arc::new(LoopbackTransport::default());
//! let report = bridge.attach(transport.clone(), HostContext::new("app")).await;
//! assert!(report.failed_channels.is_empty());
//!
//! let channel = "ConversationClientApi.create";
//! let create = transport.handlers.lock().unwrap()[channel].clone();
//! let args = Args::new().with("jwtToken", token);
//! create.on_request(RpcRequest::new(1, channel, args)).await;
//! assert!(bridge.has_native_client().await);
//! # });
//! ```
//!
//! ## Layers
//!
//! - handlers: one group per API surface, registered as `<Api>.<method>` channels.
//! - control plane: bridge state under a single lock, attach/detach lifecycle, outbound
//!   endpoints.
//! - data plane: SDK event forwarding, the listener registry, the debug relay and the
//!   delivery worker that owns every outbound send.
//! - runtime: the dedicated delivery thread.
//!
//! ## Observability
//!
//! The crate emits `tracing` events with stable `event` and `component` fields and never
//! installs a subscriber. Relayed diagnostics go to a [`DiagnosticSink`]; the default
//! [`TracingSink`] logs them under the [`LOG_TAG`] target.

mod bridge;
pub mod config;
mod control_plane;
mod data_plane;
mod handlers;
pub mod message;
#[doc(hidden)]
pub mod observability;
mod runtime;
pub mod sdk;
pub mod status;
#[cfg(test)]
mod test_support;
pub mod transport;

pub use bridge::ConversationsBridge;
pub use config::{BridgeConfig, HostContext, ReattachPolicy};
pub use control_plane::lifecycle::{AttachOutcome, AttachReport};
pub use data_plane::debug_relay::{DiagnosticSink, TracingSink, LOG_TAG};
pub use data_plane::listener_registry::ListenerHandle;
pub use message::{
    channel_name, Args, ChannelMessage, OutboundEndpointKind, RpcOutcome, RpcRequest,
};
pub use status::{BridgeCode, BridgeStatus};
pub use transport::{ChannelTransport, RequestHandler};
