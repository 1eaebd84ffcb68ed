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

//! Single delivery worker that owns every outbound send to the caller.
//!
//! RPC replies, event pushes and log pushes may be produced on any thread; they are queued
//! here and sent one at a time, in queue order, from the delivery thread.

use crate::message::ChannelMessage;
use crate::observability::{events, fields, fields::WorkerContext};
use crate::runtime::worker_runtime::{
    spawn_delivery_loop, DeliveryLoopHandle, DELIVERY_RUNTIME_THREAD_NAME,
};
use crate::status::BridgeStatus;
use crate::transport::ChannelTransport;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn, Level};
use uuid::Uuid;

const COMPONENT: &str = "delivery_worker";

/// One queued send: the message and the transport binding it targets.
pub(crate) struct Delivery {
    pub(crate) transport: Arc<dyn ChannelTransport>,
    pub(crate) message: ChannelMessage,
}

/// Producer side of the delivery queue. Cheap to clone; never blocks.
#[derive(Clone)]
pub(crate) struct DeliveryQueue {
    sender: UnboundedSender<Delivery>,
}

impl DeliveryQueue {
    pub(crate) fn new(sender: UnboundedSender<Delivery>) -> Self {
        Self { sender }
    }

    /// Queues a send. Returns `false` when the delivery loop has stopped.
    pub(crate) fn enqueue(
        &self,
        transport: Arc<dyn ChannelTransport>,
        message: ChannelMessage,
    ) -> bool {
        match self.sender.send(Delivery { transport, message }) {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    event = events::DELIVERY_ENQUEUE_FAILED,
                    component = COMPONENT,
                    message = fields::format_message(&err.0.message).as_str(),
                    reason = fields::REASON_QUEUE_CLOSED,
                    "unable to queue outbound message"
                );
                false
            }
        }
    }
}

/// Worker state that owns the spawned delivery thread handle.
pub(crate) struct DeliveryWorker {
    worker_id: String,
    dispatch_handle: DeliveryLoopHandle,
}

impl DeliveryWorker {
    /// Spawns the delivery thread and returns the queue feeding it.
    pub(crate) fn spawn() -> Result<(Self, DeliveryQueue), BridgeStatus> {
        let (sender, receiver) = unbounded_channel();
        let worker_id = Uuid::new_v4().hyphenated().to_string();
        let worker_id_for_loop = worker_id.clone();

        let dispatch_handle =
            spawn_delivery_loop(DELIVERY_RUNTIME_THREAD_NAME, receiver, move |receiver| {
                Self::delivery_loop(worker_id_for_loop, receiver)
            })?;

        Ok((
            Self {
                worker_id,
                dispatch_handle,
            },
            DeliveryQueue::new(sender),
        ))
    }

    /// Returns the unique worker identifier for correlation logs.
    pub(crate) fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// Returns the delivery thread label for diagnostics.
    pub(crate) fn runtime_thread(&self) -> &str {
        self.dispatch_handle.worker_thread()
    }

    /// Sends every queued message on its transport until all producers are gone.
    pub(crate) async fn delivery_loop(
        worker_id: String,
        mut receiver: UnboundedReceiver<Delivery>,
    ) {
        let worker_context = WorkerContext::with_current_thread(worker_id);

        while let Some(Delivery { transport, message }) = receiver.recv().await {
            let label = tracing::enabled!(Level::DEBUG).then(|| fields::format_message(&message));

            if let Some(label) = label.as_deref() {
                debug!(
                    event = events::DELIVERY_SEND_ATTEMPT,
                    component = COMPONENT,
                    worker_id = worker_context.worker_id.as_str(),
                    worker_thread = worker_context.worker_thread.as_str(),
                    message = label,
                    "attempting outbound send"
                );
            }

            let failed_label = tracing::enabled!(Level::WARN).then(|| message.label());
            match transport.send(message).await {
                Ok(()) => {
                    if let Some(label) = label.as_deref() {
                        debug!(
                            event = events::DELIVERY_SEND_OK,
                            component = COMPONENT,
                            worker_id = worker_context.worker_id.as_str(),
                            worker_thread = worker_context.worker_thread.as_str(),
                            message = label,
                            "outbound send succeeded"
                        );
                    }
                }
                Err(err) => {
                    warn!(
                        event = events::DELIVERY_SEND_FAILED,
                        component = COMPONENT,
                        worker_id = worker_context.worker_id.as_str(),
                        worker_thread = worker_context.worker_thread.as_str(),
                        message = fields::format_optional(failed_label.as_deref()).as_str(),
                        err = %err,
                        "outbound send failed"
                    );
                }
            }
        }

        info!(
            event = events::DELIVERY_QUEUE_CLOSED,
            component = COMPONENT,
            worker_id = worker_context.worker_id.as_str(),
            worker_thread = worker_context.worker_thread.as_str(),
            reason = fields::REASON_QUEUE_CLOSED,
            "delivery queue closed; stopping delivery loop"
        );
    }
}
