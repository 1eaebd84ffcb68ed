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

//! RPC handler groups.
//!
//! A group owns one API surface (`ConversationApi`, `UserApi`, ...). Each of its methods is
//! registered on the transport as `<Api>.<method>`; the shared [`GroupRequestHandler`] turns
//! a request into a group call and queues the reply on the delivery thread.

mod client;
mod conversation;
mod message;
mod participant;
mod plugin;
mod user;

use crate::control_plane::bridge_state::BridgeState;
use crate::data_plane::delivery_worker::DeliveryQueue;
use crate::message::{Args, ChannelMessage, RpcRequest};
use crate::observability::events;
use crate::status::{BridgeCode, BridgeStatus};
use crate::transport::{ChannelTransport, RequestHandler};
use async_trait::async_trait;
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

const COMPONENT: &str = "handlers";

#[async_trait]
pub(crate) trait HandlerGroup: Send + Sync {
    fn api(&self) -> &'static str;

    fn methods(&self) -> &'static [&'static str];

    /// Runs `method`. Arguments are validated before the native client is touched.
    async fn handle(
        &self,
        state: &BridgeState,
        method: &str,
        args: &Args,
    ) -> Result<Value, BridgeStatus>;
}

/// Every group the bridge registers on attach.
pub(crate) fn default_groups() -> Vec<Arc<dyn HandlerGroup>> {
    vec![
        Arc::new(plugin::PluginApi),
        Arc::new(client::ConversationClientApi),
        Arc::new(conversation::ConversationApi),
        Arc::new(participant::ParticipantApi),
        Arc::new(message::MessageApi),
        Arc::new(user::UserApi),
    ]
}

pub(crate) fn unimplemented(api: &str, method: &str) -> BridgeStatus {
    BridgeStatus::fail_with_code(
        BridgeCode::Unimplemented,
        format!("{api} has no method '{method}'"),
    )
}

pub(crate) fn to_payload<T: Serialize>(value: &T) -> Result<Value, BridgeStatus> {
    serde_json::to_value(value).map_err(|err| {
        BridgeStatus::fail_with_code(
            BridgeCode::Internal,
            format!("Unable to encode result: {err}"),
        )
    })
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// Transport-facing handler for every channel of one group.
///
/// Holds the bridge state weakly; replies go out on the transport the handler was
/// registered on.
pub(crate) struct GroupRequestHandler {
    state: Weak<BridgeState>,
    group: Arc<dyn HandlerGroup>,
    transport: Arc<dyn ChannelTransport>,
    queue: DeliveryQueue,
}

impl GroupRequestHandler {
    pub(crate) fn new(
        state: Weak<BridgeState>,
        group: Arc<dyn HandlerGroup>,
        transport: Arc<dyn ChannelTransport>,
        queue: DeliveryQueue,
    ) -> Self {
        Self {
            state,
            group,
            transport,
            queue,
        }
    }

    async fn dispatch(&self, request: &RpcRequest) -> Result<Value, BridgeStatus> {
        let Some(state) = self.state.upgrade() else {
            return Err(BridgeStatus::fail_with_code(
                BridgeCode::Internal,
                "Bridge has been released",
            ));
        };

        let api = self.group.api();
        let Some(method) = request
            .channel
            .strip_prefix(api)
            .and_then(|rest| rest.strip_prefix('.'))
        else {
            return Err(BridgeStatus::fail_with_code(
                BridgeCode::Unimplemented,
                format!("{api} cannot serve channel '{}'", request.channel),
            ));
        };
        if !self.group.methods().contains(&method) {
            return Err(unimplemented(api, method));
        }

        match AssertUnwindSafe(self.group.handle(&state, method, &request.args))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                warn!(
                    event = events::RPC_PANICKED,
                    component = COMPONENT,
                    channel = request.channel.as_str(),
                    call_id = request.call_id,
                    panic = message.as_str(),
                    "handler panicked"
                );
                Err(BridgeStatus::fail_with_code(
                    BridgeCode::Internal,
                    format!("Handler for '{}' panicked: {message}", request.channel),
                ))
            }
        }
    }
}

#[async_trait]
impl RequestHandler for GroupRequestHandler {
    async fn on_request(&self, request: RpcRequest) {
        debug!(
            event = events::RPC_RECEIVED,
            component = COMPONENT,
            channel = request.channel.as_str(),
            call_id = request.call_id,
            "rpc received"
        );

        let result = self.dispatch(&request).await;
        if let Err(err) = &result {
            debug!(
                event = events::RPC_FAILED,
                component = COMPONENT,
                channel = request.channel.as_str(),
                call_id = request.call_id,
                err = %err,
                "rpc failed"
            );
        }

        self.queue.enqueue(
            self.transport.clone(),
            ChannelMessage::reply(&request, result.into()),
        );
    }
}
