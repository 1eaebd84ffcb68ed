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

//! Runtime helper for spawning the dedicated delivery loop thread.

use crate::observability::events;
use crate::status::{BridgeCode, BridgeStatus};
use std::future::Future;
use std::thread;
use tokio::runtime::Builder;
use tracing::{debug, error};

pub(crate) const DELIVERY_RUNTIME_THREAD_NAME: &str = "conversations-delivery";
const COMPONENT: &str = "worker_runtime";

/// Handle to a spawned loop thread. The thread runs detached; the loop ends once its input
/// is closed.
pub(crate) struct DeliveryLoopHandle {
    worker_thread: String,
}

impl DeliveryLoopHandle {
    pub(crate) fn worker_thread(&self) -> &str {
        &self.worker_thread
    }
}

/// Spawns `run_loop(input)` on a dedicated OS thread driving its own current-thread runtime.
pub(crate) fn spawn_delivery_loop<T, F, Fut>(
    thread_name: &str,
    input: T,
    run_loop: F,
) -> Result<DeliveryLoopHandle, BridgeStatus>
where
    T: Send + 'static,
    F: FnOnce(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + 'static,
{
    debug!(
        event = events::RUNTIME_SPAWN_START,
        component = COMPONENT,
        worker_thread = thread_name,
        "spawning delivery runtime thread"
    );

    let runtime_thread_name = thread_name.to_string();
    thread::Builder::new()
        .name(runtime_thread_name.clone())
        .spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    error!(
                        event = events::RUNTIME_SPAWN_FAILED,
                        component = COMPONENT,
                        err = %err,
                        "unable to build delivery runtime"
                    );
                    return;
                }
            };

            runtime.block_on(run_loop(input));
        })
        .map_err(|err| {
            error!(
                event = events::RUNTIME_SPAWN_FAILED,
                component = COMPONENT,
                worker_thread = runtime_thread_name.as_str(),
                err = %err,
                "unable to spawn delivery runtime thread"
            );
            BridgeStatus::fail_with_code(
                BridgeCode::Internal,
                format!("Unable to spawn delivery thread: {err}"),
            )
        })?;

    debug!(
        event = events::RUNTIME_SPAWN_OK,
        component = COMPONENT,
        worker_thread = runtime_thread_name.as_str(),
        "delivery runtime thread spawned"
    );

    Ok(DeliveryLoopHandle {
        worker_thread: runtime_thread_name,
    })
}
