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

//! Messages exchanged with the caller over the channel transport.

use crate::status::BridgeStatus;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{Display, Formatter};

/// Named arguments of one RPC call.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Args(Map<String, Value>);

impl Args {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    pub fn require_str(&self, key: &str) -> Result<&str, BridgeStatus> {
        self.get(key)
            .ok_or_else(|| BridgeStatus::missing_argument(key))?
            .as_str()
            .ok_or_else(|| BridgeStatus::invalid_argument(key, "a string"))
    }

    pub fn optional_str(&self, key: &str) -> Result<Option<&str>, BridgeStatus> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| BridgeStatus::invalid_argument(key, "a string")),
        }
    }

    pub fn require_i64(&self, key: &str) -> Result<i64, BridgeStatus> {
        self.get(key)
            .ok_or_else(|| BridgeStatus::missing_argument(key))?
            .as_i64()
            .ok_or_else(|| BridgeStatus::invalid_argument(key, "an integer"))
    }

    pub fn require_bool(&self, key: &str) -> Result<bool, BridgeStatus> {
        self.get(key)
            .ok_or_else(|| BridgeStatus::missing_argument(key))?
            .as_bool()
            .ok_or_else(|| BridgeStatus::invalid_argument(key, "a boolean"))
    }

    pub fn require_value(&self, key: &str) -> Result<Value, BridgeStatus> {
        self.get(key)
            .cloned()
            .ok_or_else(|| BridgeStatus::missing_argument(key))
    }

    pub fn require_object(&self, key: &str) -> Result<Args, BridgeStatus> {
        self.optional_object(key)?
            .ok_or_else(|| BridgeStatus::missing_argument(key))
    }

    pub fn optional_object(&self, key: &str) -> Result<Option<Args>, BridgeStatus> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Args(map.clone()))),
            Some(_) => Err(BridgeStatus::invalid_argument(key, "an object")),
        }
    }
}

impl From<Map<String, Value>> for Args {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One inbound RPC call. `channel` is `<Api>.<method>`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub call_id: u64,
    pub channel: String,
    #[serde(default)]
    pub args: Args,
}

impl RpcRequest {
    pub fn new(call_id: u64, channel: impl Into<String>, args: Args) -> Self {
        Self {
            call_id,
            channel: channel.into(),
            args,
        }
    }
}

/// Result of one RPC call as seen by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RpcOutcome {
    Success { payload: Value },
    Failure { error: BridgeStatus },
}

impl RpcOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RpcOutcome::Success { .. })
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            RpcOutcome::Success { payload } => Some(payload),
            RpcOutcome::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&BridgeStatus> {
        match self {
            RpcOutcome::Success { .. } => None,
            RpcOutcome::Failure { error } => Some(error),
        }
    }
}

impl From<Result<Value, BridgeStatus>> for RpcOutcome {
    fn from(result: Result<Value, BridgeStatus>) -> Self {
        match result {
            Ok(payload) => RpcOutcome::Success { payload },
            Err(error) => RpcOutcome::Failure { error },
        }
    }
}

/// Reverse-channel surfaces the bridge can push to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboundEndpointKind {
    /// Client and entity lifecycle notifications.
    ClientEvents,
    /// Diagnostic strings relayed from the host.
    Logging,
}

impl OutboundEndpointKind {
    pub fn api_name(&self) -> &'static str {
        match self {
            OutboundEndpointKind::ClientEvents => "FlutterConversationClientApi",
            OutboundEndpointKind::Logging => "FlutterLoggingApi",
        }
    }
}

impl Display for OutboundEndpointKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Everything the bridge sends to the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelMessage {
    Reply {
        call_id: u64,
        channel: String,
        outcome: RpcOutcome,
    },
    Push {
        endpoint: OutboundEndpointKind,
        method: String,
        payload: Value,
    },
}

impl ChannelMessage {
    pub fn reply(request: &RpcRequest, outcome: RpcOutcome) -> Self {
        ChannelMessage::Reply {
            call_id: request.call_id,
            channel: request.channel.clone(),
            outcome,
        }
    }

    pub fn push(endpoint: OutboundEndpointKind, method: impl Into<String>, payload: Value) -> Self {
        ChannelMessage::Push {
            endpoint,
            method: method.into(),
            payload,
        }
    }

    /// Short label used in structured logs.
    pub fn label(&self) -> String {
        match self {
            ChannelMessage::Reply {
                call_id, channel, ..
            } => format!("reply:{channel}#{call_id}"),
            ChannelMessage::Push {
                endpoint, method, ..
            } => format!("push:{endpoint}.{method}"),
        }
    }
}

/// Builds the channel name an RPC method is registered under.
pub fn channel_name(api: &str, method: &str) -> String {
    format!("{api}.{method}")
}
