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

//! Data-plane layer: everything that produces or sends outbound messages.
//!
//! SDK listeners, RPC replies and the debug relay never send directly; they queue onto the
//! single delivery worker, which performs every send from its own thread.
//!
//! ```
//! use async_trait::async_trait;
//! use conversations_bridge::{
//!     BridgeConfig, BridgeStatus, ChannelMessage, ChannelTransport, ConversationsBridge,
//!     HostContext, RequestHandler,
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
//!     "data-plane-doc",
//!     BridgeConfig::default(),
//!     Arc::new(InMemoryConversations::new()),
//! )
//! .unwrap();
//! bridge.attach(Arc::new(NullTransport), HostContext::new("app")).await;
//!
//! assert_eq!(bridge.delivery_thread(), "conversations-delivery");
//! assert!(!bridge.debug_enabled());
//! bridge.debug("dropped while the relay is off");
//! # });
//! ```

pub(crate) mod debug_relay;
pub(crate) mod delivery_worker;
pub(crate) mod forwarding_listener;
pub(crate) mod listener_registry;
