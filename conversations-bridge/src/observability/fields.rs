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

//! Canonical structured field keys and value-format helpers.

use crate::message::ChannelMessage;

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const WORKER_ID: &str = "worker_id";
pub const WORKER_THREAD: &str = "worker_thread";
pub const BRIDGE: &str = "bridge";
pub const EPOCH: &str = "epoch";
pub const CHANNEL: &str = "channel";
pub const CALL_ID: &str = "call_id";
pub const ENTITY_ID: &str = "entity_id";
pub const LISTENER_ID: &str = "listener_id";
pub const MESSAGE: &str = "message";
pub const REASON: &str = "reason";
pub const ERR: &str = "err";

pub const NONE: &str = "none";
pub const REASON_QUEUE_CLOSED: &str = "queue_closed";
pub const REASON_NOT_ATTACHED: &str = "not_attached";
pub const DEFAULT_WORKER_THREAD: &str = "unknown-thread";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkerContext {
    pub worker_id: String,
    pub worker_thread: String,
}

impl WorkerContext {
    pub fn new(worker_id: impl Into<String>, worker_thread: Option<&str>) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_thread: thread_name_or_default(worker_thread),
        }
    }

    pub fn with_current_thread(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_thread: current_thread_name_or_default(),
        }
    }
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_WORKER_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

pub fn format_message(message: &ChannelMessage) -> String {
    message.label()
}

pub fn format_optional(value: Option<&str>) -> String {
    value.unwrap_or(NONE).to_string()
}

#[cfg(test)]
mod tests {
    use super::{format_optional, thread_name_or_default, WorkerContext, DEFAULT_WORKER_THREAD};

    #[test]
    fn worker_context_falls_back_for_unnamed_threads() {
        let context = WorkerContext::new("worker-1", None);

        assert_eq!(context.worker_id, "worker-1");
        assert_eq!(context.worker_thread, DEFAULT_WORKER_THREAD);
        assert_eq!(thread_name_or_default(Some("delivery")), "delivery");
    }

    #[test]
    fn optional_values_render_none() {
        assert_eq!(format_optional(None), "none");
        assert_eq!(format_optional(Some("CH1")), "CH1");
    }
}
