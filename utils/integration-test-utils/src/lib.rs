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


//! Shared doubles for the bridge integration tests: a transport that records everything
//! the bridge sends, a diagnostic sink that counts emissions, and logging setup.

mod counting_sink;
mod recording_transport;

pub use counting_sink::{CountingSink, EmittedLine};
pub use recording_transport::{RecordingTransport, SentMessage, REPLY_TIMEOUT};

/// Installs a `tracing` subscriber once per test binary; later calls are no-ops.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
