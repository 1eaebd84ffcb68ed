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

//! Canonical structured event names used across `conversations-bridge`.

// Lifecycle controller events.
pub const BRIDGE_CREATE: &str = "bridge_create";
pub const ATTACH_START: &str = "attach_start";
pub const ATTACH_REGISTERED: &str = "attach_registered";
pub const ATTACH_REBOUND: &str = "attach_rebound";
pub const ATTACH_REREGISTERED: &str = "attach_reregistered";
pub const DETACH: &str = "detach";
pub const TEARDOWN: &str = "teardown";
pub const HANDLER_REGISTER_OK: &str = "handler_register_ok";
pub const HANDLER_REGISTER_FAILED: &str = "handler_register_failed";
pub const ENDPOINTS_REBUILT: &str = "endpoints_rebuilt";

// Native client events.
pub const CLIENT_INSTALLED: &str = "client_installed";
pub const CLIENT_REPLACED: &str = "client_replaced";
pub const CLIENT_SHUTDOWN: &str = "client_shutdown";

// Listener registry events.
pub const LISTENER_SUBSCRIBE: &str = "listener_subscribe";
pub const LISTENER_REPLACE: &str = "listener_replace";
pub const LISTENER_SUBSCRIBE_STALE: &str = "listener_subscribe_stale";
pub const LISTENER_UNSUBSCRIBE: &str = "listener_unsubscribe";
pub const LISTENER_UNSUBSCRIBE_MISSING: &str = "listener_unsubscribe_missing";
pub const LISTENER_CLEAR: &str = "listener_clear";

// Dispatch events.
pub const RPC_RECEIVED: &str = "rpc_received";
pub const RPC_FAILED: &str = "rpc_failed";
pub const RPC_PANICKED: &str = "rpc_panicked";
pub const EVENT_FORWARD: &str = "event_forward";
pub const EVENT_DROPPED_UNATTACHED: &str = "event_dropped_unattached";

// Delivery worker events.
pub const DELIVERY_ENQUEUE_FAILED: &str = "delivery_enqueue_failed";
pub const DELIVERY_SEND_ATTEMPT: &str = "delivery_send_attempt";
pub const DELIVERY_SEND_OK: &str = "delivery_send_ok";
pub const DELIVERY_SEND_FAILED: &str = "delivery_send_failed";
pub const DELIVERY_QUEUE_CLOSED: &str = "delivery_queue_closed";

// Runtime events.
pub const RUNTIME_SPAWN_START: &str = "runtime_spawn_start";
pub const RUNTIME_SPAWN_OK: &str = "runtime_spawn_ok";
pub const RUNTIME_SPAWN_FAILED: &str = "runtime_spawn_failed";
