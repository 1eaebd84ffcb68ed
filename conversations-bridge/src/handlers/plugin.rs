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

use super::{unimplemented, HandlerGroup};
use crate::control_plane::bridge_state::BridgeState;
use crate::message::Args;
use crate::status::BridgeStatus;
use async_trait::async_trait;
use serde_json::Value;

pub(crate) struct PluginApi;

#[async_trait]
impl HandlerGroup for PluginApi {
    fn api(&self) -> &'static str {
        "PluginApi"
    }

    fn methods(&self) -> &'static [&'static str] {
        &["debug"]
    }

    async fn handle(
        &self,
        state: &BridgeState,
        method: &str,
        args: &Args,
    ) -> Result<Value, BridgeStatus> {
        match method {
            "debug" => {
                let enable = args.require_bool("enableNative")?;
                state.debug.set_enabled(enable);
                state.debug.debug("native debug logging enabled");
                Ok(Value::Null)
            }
            other => Err(unimplemented(self.api(), other)),
        }
    }
}
