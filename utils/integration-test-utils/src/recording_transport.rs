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

use async_trait::async_trait;
use conversations_bridge::{
    Args, BridgeCode, BridgeStatus, ChannelMessage, ChannelTransport, OutboundEndpointKind,
    RequestHandler, RpcOutcome, RpcRequest,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// How long [`RecordingTransport::call`] waits for a reply.
pub const REPLY_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(5);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A message the bridge sent, with the name of the thread that sent it.
#[derive(Clone, Debug)]
pub struct SentMessage {
    pub message: ChannelMessage,
    pub thread: Option<String>,
}

/// In-process channel transport.
///
/// Keeps one handler per channel name (a later registration replaces the earlier one),
/// counts registrations, and records every message the bridge sends.
pub struct RecordingTransport {
    name: String,
    handlers: Mutex<HashMap<String, Arc<dyn RequestHandler>>>,
    registrations: AtomicU64,
    refused: Mutex<HashSet<String>>,
    sent: Mutex<Vec<SentMessage>>,
    next_call_id: AtomicU64,
}

impl RecordingTransport {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            handlers: Mutex::new(HashMap::new()),
            registrations: AtomicU64::new(0),
            refused: Mutex::new(HashSet::new()),
            sent: Mutex::new(Vec::new()),
            next_call_id: AtomicU64::new(1),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Makes every later registration of `channel` fail with `UNAVAILABLE`.
    pub fn refuse_registration_of(&self, channel: &str) {
        lock(&self.refused).insert(channel.to_string());
    }

    /// Number of successful `register_handler` calls, replacements included.
    pub fn registration_count(&self) -> u64 {
        self.registrations.load(Ordering::SeqCst)
    }

    pub fn registered_channels(&self) -> Vec<String> {
        let mut channels: Vec<String> = lock(&self.handlers).keys().cloned().collect();
        channels.sort();
        channels
    }

    pub fn has_handler(&self, channel: &str) -> bool {
        lock(&self.handlers).contains_key(channel)
    }

    /// Routes one request to the handler registered for `channel` and returns its call id.
    /// The reply arrives later through [`ChannelTransport::send`].
    pub async fn invoke(&self, channel: &str, args: Args) -> Result<u64, BridgeStatus> {
        let handler = lock(&self.handlers).get(channel).cloned().ok_or_else(|| {
            BridgeStatus::fail_with_code(
                BridgeCode::Unimplemented,
                format!("no handler registered for '{channel}'"),
            )
        })?;

        let call_id = self.next_call_id.fetch_add(1, Ordering::SeqCst);
        debug!(transport = self.name.as_str(), channel, call_id, "invoking handler");
        handler
            .on_request(RpcRequest::new(call_id, channel, args))
            .await;
        Ok(call_id)
    }

    /// Invokes `channel` and waits for its reply.
    pub async fn call(&self, channel: &str, args: Args) -> RpcOutcome {
        match self.invoke(channel, args).await {
            Ok(call_id) => self.wait_for_reply(call_id, REPLY_TIMEOUT).await.unwrap_or_else(|| {
                RpcOutcome::Failure {
                    error: BridgeStatus::fail_with_code(
                        BridgeCode::Unavailable,
                        format!("no reply to call {call_id} on '{channel}'"),
                    ),
                }
            }),
            Err(error) => RpcOutcome::Failure { error },
        }
    }

    /// Invokes `channel` and returns the success payload, panicking on failure.
    pub async fn call_ok(&self, channel: &str, args: Args) -> Value {
        match self.call(channel, args).await {
            RpcOutcome::Success { payload } => payload,
            RpcOutcome::Failure { error } => panic!("{channel} failed: {error}"),
        }
    }

    /// Invokes `channel` and returns the failure, panicking on success.
    pub async fn call_err(&self, channel: &str, args: Args) -> BridgeStatus {
        match self.call(channel, args).await {
            RpcOutcome::Success { payload } => panic!("{channel} succeeded with {payload}"),
            RpcOutcome::Failure { error } => error,
        }
    }

    pub async fn wait_for_reply(&self, call_id: u64, timeout: Duration) -> Option<RpcOutcome> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(outcome) = self.reply(call_id) {
                return Some(outcome);
            }
            if Instant::now() >= deadline {
                return None;
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Waits until at least `count` pushes were sent; returns whether that happened in time.
    pub async fn wait_for_pushes(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.pushes().len() >= count {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    /// Waits for the first push to `endpoint` named `method` and returns its payload.
    pub async fn wait_for_push(
        &self,
        endpoint: OutboundEndpointKind,
        method: &str,
        timeout: Duration,
    ) -> Option<Value> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(payload) = self.pushes_of(endpoint, method).into_iter().next() {
                return Some(payload);
            }
            if Instant::now() >= deadline {
                return None;
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    pub fn reply(&self, call_id: u64) -> Option<RpcOutcome> {
        lock(&self.sent).iter().find_map(|sent| match &sent.message {
            ChannelMessage::Reply {
                call_id: replied,
                outcome,
                ..
            } if *replied == call_id => Some(outcome.clone()),
            _ => None,
        })
    }

    pub fn replies(&self) -> Vec<ChannelMessage> {
        self.sent()
            .into_iter()
            .map(|sent| sent.message)
            .filter(|message| matches!(message, ChannelMessage::Reply { .. }))
            .collect()
    }

    /// Every push as `(endpoint, method, payload)`, in send order.
    pub fn pushes(&self) -> Vec<(OutboundEndpointKind, String, Value)> {
        lock(&self.sent)
            .iter()
            .filter_map(|sent| match &sent.message {
                ChannelMessage::Push {
                    endpoint,
                    method,
                    payload,
                } => Some((*endpoint, method.clone(), payload.clone())),
                ChannelMessage::Reply { .. } => None,
            })
            .collect()
    }

    /// Pushes to `endpoint` named `method`, payloads only.
    pub fn pushes_of(&self, endpoint: OutboundEndpointKind, method: &str) -> Vec<Value> {
        self.pushes()
            .into_iter()
            .filter(|(kind, name, _)| *kind == endpoint && name == method)
            .map(|(_, _, payload)| payload)
            .collect()
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        lock(&self.sent).clone()
    }

    /// Distinct names of the threads that called `send`.
    pub fn sender_threads(&self) -> Vec<String> {
        let mut threads: Vec<String> = lock(&self.sent)
            .iter()
            .map(|sent| sent.thread.clone().unwrap_or_else(|| "<unnamed>".to_string()))
            .collect();
        threads.sort();
        threads.dedup();
        threads
    }

    pub fn clear_sent(&self) {
        lock(&self.sent).clear();
    }
}

#[async_trait]
impl ChannelTransport for RecordingTransport {
    async fn register_handler(
        &self,
        channel: &str,
        handler: Arc<dyn RequestHandler>,
    ) -> Result<(), BridgeStatus> {
        if lock(&self.refused).contains(channel) {
            return Err(BridgeStatus::fail_with_code(
                BridgeCode::Unavailable,
                format!("{} refused '{channel}'", self.name),
            ));
        }

        lock(&self.handlers).insert(channel.to_string(), handler);
        self.registrations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn send(&self, message: ChannelMessage) -> Result<(), BridgeStatus> {
        lock(&self.sent).push(SentMessage {
            message,
            thread: thread::current().name().map(str::to_string),
        });
        Ok(())
    }
}
