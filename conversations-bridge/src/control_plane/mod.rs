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

//! Control-plane layer: bridge state, the attach/detach lifecycle and outbound endpoints.
//!
//! Every mutation of the bridge happens under one async lock. The outbound endpoint set sits
//! behind its own lock so SDK callbacks never wait on an in-flight RPC.
//!
//! ```
//! use async_trait::async_trait;
//! use conversations_bridge::{
//!     AttachOutcome, BridgeConfig, BridgeStatus, ChannelMessage, ChannelTransport,
//!     ConversationsBridge, HostContext, RequestHandler,
//! };
//! use in_memory_conversations::InMemoryConversations;
//! use std::sync::Arc;
//!
//! # struct NullTransport;
//! #
//! # #[async_trait]
//! # impl ChannelTransport for NullTransport {
//! #     async fn register_handler(
//! #         &self,
//! #         _channel: &str,
//! #         _handler: Arc<dyn RequestHandler>,
//! #     ) -> Result<(), BridgeStatus> {
//! #         Ok(())
//! #     }
//! #
//! #     async fn send(&self, _message: ChannelMessage) -> Result<(), BridgeStatus> {
//! #         Ok(())
//! #     }
//! # }
//! #
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let bridge = ConversationsBridge::new(
//!     "control-plane-doc",
//!     BridgeConfig::default(),
//!     Arc::new(InMemoryConversations::new()),
//! )
//! .unwrap();
//! let transport: Arc<dyn ChannelTransport> = Arc::new(NullTransport);
//!
//! // Only the first attach registers handlers; later ones just rebind.
//! let first = bridge.attach(transport.clone(), HostContext::new("app")).await;
//! let second = bridge.attach(transport, HostContext::new("app")).await;
//! assert_eq!(first.outcome, AttachOutcome::Registered);
//! assert_eq!(second.outcome, AttachOutcome::Rebound);
//! # });
//! ```

pub(crate) mod bridge_state;
pub(crate) mod lifecycle;
pub(crate) mod outbound;
pub(crate) mod transport_identity;
