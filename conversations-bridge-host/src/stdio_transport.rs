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

//! JSON-lines channel transport: one `RpcRequest` per input line, one `ChannelMessage`
//! per output line.

use async_trait::async_trait;
use conversations_bridge::{
    BridgeCode, BridgeStatus, ChannelMessage, ChannelTransport, RequestHandler, RpcOutcome,
    RpcRequest,
};
use std::collections::HashMap;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) struct StdioTransport {
    handlers: Mutex<HashMap<String, Arc<dyn RequestHandler>>>,
    output: Mutex<Box<dyn Write + Send>>,
    awaiting_reply: AtomicUsize,
}

impl StdioTransport {
    pub(crate) fn new(output: Box<dyn Write + Send>) -> Self {
        Self {
            handlers: Mutex::new(HashMap::new()),
            output: Mutex::new(output),
            awaiting_reply: AtomicUsize::new(0),
        }
    }

    /// Reads requests until `input` is exhausted and waits for every dispatched handler.
    /// Returns the number of requests dispatched.
    pub(crate) async fn serve<R>(&self, input: R) -> usize
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut handlers = JoinSet::new();
        let mut dispatched = 0;

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    warn!(err = %err, "unable to read request line, stopping");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }

            let request: RpcRequest = match serde_json::from_str(&line) {
                Ok(request) => request,
                Err(err) => {
                    warn!(err = %err, "skipping malformed request line");
                    continue;
                }
            };

            let handler = lock(&self.handlers).get(&request.channel).cloned();
            match handler {
                Some(handler) => {
                    debug!(
                        channel = request.channel.as_str(),
                        call_id = request.call_id,
                        "dispatching request"
                    );
                    self.awaiting_reply.fetch_add(1, Ordering::SeqCst);
                    dispatched += 1;
                    handlers.spawn(async move { handler.on_request(request).await });
                }
                None => {
                    // Never reaches the bridge, so there is no delivery queue to go through.
                    // The reply still takes the `send` path other replies use.
                    let error = BridgeStatus::fail_with_code(
                        BridgeCode::Unimplemented,
                        format!("No handler registered for '{}'", request.channel),
                    );
                    self.awaiting_reply.fetch_add(1, Ordering::SeqCst);
                    let reply = ChannelMessage::reply(&request, RpcOutcome::Failure { error });
                    if let Err(err) = self.send(reply).await {
                        warn!(err = %err, "unable to answer request for unknown channel");
                    }
                }
            }
        }

        while let Some(joined) = handlers.join_next().await {
            if let Err(err) = joined {
                warn!(err = %err, "request handler task failed");
            }
        }
        info!(dispatched, "input closed");
        dispatched
    }

    /// Waits until every dispatched request has been answered or `timeout` elapses.
    pub(crate) async fn drain(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.awaiting_reply.load(Ordering::SeqCst) > 0 {
            if Instant::now() >= deadline {
                return false;
            }
            sleep(DRAIN_POLL_INTERVAL).await;
        }
        true
    }

    fn write(&self, message: &ChannelMessage) -> bool {
        let mut output = lock(&self.output);
        let written = serde_json::to_writer(&mut *output, message)
            .map_err(|err| err.to_string())
            .and_then(|()| writeln!(output).map_err(|err| err.to_string()))
            .and_then(|()| output.flush().map_err(|err| err.to_string()));

        match written {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    message = message.label().as_str(),
                    err = err.as_str(),
                    "unable to write message"
                );
                false
            }
        }
    }
}

#[async_trait]
impl ChannelTransport for StdioTransport {
    async fn register_handler(
        &self,
        channel: &str,
        handler: Arc<dyn RequestHandler>,
    ) -> Result<(), BridgeStatus> {
        lock(&self.handlers).insert(channel.to_string(), handler);
        Ok(())
    }

    async fn send(&self, message: ChannelMessage) -> Result<(), BridgeStatus> {
        let is_reply = matches!(message, ChannelMessage::Reply { .. });
        let written = self.write(&message);
        if is_reply {
            let _ = self
                .awaiting_reply
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                    count.checked_sub(1)
                });
        }

        if written {
            Ok(())
        } else {
            Err(BridgeStatus::fail_with_code(
                BridgeCode::Unavailable,
                "stdout is not writable",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StdioTransport;
    use conversations_bridge::{
        BridgeCode, BridgeConfig, ChannelMessage, ConversationsBridge, HostContext, RpcOutcome,
    };
    use in_memory_conversations::InMemoryConversations;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn messages(&self) -> Vec<ChannelMessage> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|line| serde_json::from_str(line).unwrap())
                .collect()
        }
    }

    #[tokio::test]
    async fn unknown_channels_are_answered_and_malformed_lines_skipped() {
        let output = SharedBuffer::default();
        let transport = StdioTransport::new(Box::new(output.clone()));
        let input = b"not json\n\n{\"call_id\":4,\"channel\":\"NoSuchApi.call\"}\n";

        let dispatched = transport.serve(&input[..]).await;

        assert_eq!(dispatched, 0);
        assert!(transport.drain(Duration::ZERO).await);
        let messages = output.messages();
        assert_eq!(messages.len(), 1);
        match &messages[0] {
            ChannelMessage::Reply {
                call_id,
                outcome: RpcOutcome::Failure { error },
                ..
            } => {
                assert_eq!(*call_id, 4);
                assert_eq!(error.code(), BridgeCode::Unimplemented);
            }
            other => panic!("expected a failed reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn requests_reach_the_bridge_and_replies_are_written() {
        let output = SharedBuffer::default();
        let transport = Arc::new(StdioTransport::new(Box::new(output.clone())));
        let service = InMemoryConversations::new();
        let token = service.issue_token("alice");
        let bridge =
            ConversationsBridge::new("stdio-test", BridgeConfig::default(), Arc::new(service))
                .unwrap();
        bridge
            .attach(transport.clone(), HostContext::new("stdio-test"))
            .await;

        let request = serde_json::json!({
            "call_id": 1,
            "channel": "ConversationClientApi.create",
            "args": { "jwtToken": token },
        });
        let input = format!("{request}\n");
        let dispatched = transport.serve(input.as_bytes()).await;

        assert_eq!(dispatched, 1);
        assert!(transport.drain(Duration::from_secs(5)).await);
        let replies: Vec<_> = output
            .messages()
            .into_iter()
            .filter_map(|message| match message {
                ChannelMessage::Reply { outcome, .. } => Some(outcome),
                ChannelMessage::Push { .. } => None,
            })
            .collect();
        assert_eq!(replies.len(), 1);
        assert_eq!(
            replies[0].payload().map(|payload| payload["myIdentity"].clone()),
            Some(serde_json::json!("alice"))
        );
    }
}
