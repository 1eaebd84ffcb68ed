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

//! Debug relay: mirrors host diagnostics to the local sink and to the caller's logging surface.

use crate::control_plane::outbound::EndpointSlot;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Tag attached to every relayed diagnostic line.
pub const LOG_TAG: &str = "Twilio_Conversations";

const LOG_FROM_HOST: &str = "logFromHost";

/// Local destination for relayed diagnostics. Called synchronously on the emitting thread.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, tag: &str, message: &str);
}

/// Default sink: a `tracing` debug event under the [`LOG_TAG`] target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, tag: &str, message: &str) {
        tracing::debug!(target: LOG_TAG, tag, "{message}");
    }
}

pub(crate) struct DebugRelay {
    enabled: AtomicBool,
    sink: Arc<dyn DiagnosticSink>,
    endpoints: EndpointSlot,
}

impl DebugRelay {
    pub(crate) fn new(
        enabled: bool,
        sink: Arc<dyn DiagnosticSink>,
        endpoints: EndpointSlot,
    ) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            sink,
            endpoints,
        }
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// No-op while disabled. Otherwise one sink emission and one queued `logFromHost` push;
    /// a missing endpoint set or a stopped delivery loop is ignored.
    pub(crate) fn debug(&self, message: &str) {
        if !self.is_enabled() {
            return;
        }

        self.sink.emit(LOG_TAG, message);

        if let Some(current) = self.endpoints.current() {
            current.logging.push(LOG_FROM_HOST, json!({ "msg": message }));
        }
    }
}
