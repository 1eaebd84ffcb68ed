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

use super::{to_payload, unimplemented, HandlerGroup};
use crate::control_plane::bridge_state::BridgeState;
use crate::message::Args;
use crate::status::BridgeStatus;
use async_trait::async_trait;
use serde_json::Value;

pub(crate) struct UserApi;

#[async_trait]
impl HandlerGroup for UserApi {
    fn api(&self) -> &'static str {
        "UserApi"
    }

    fn methods(&self) -> &'static [&'static str] {
        &["getUser", "setFriendlyName", "setAttributes"]
    }

    async fn handle(
        &self,
        state: &BridgeState,
        method: &str,
        args: &Args,
    ) -> Result<Value, BridgeStatus> {
        let identity = args.require_str("identity")?;

        let user = match method {
            "getUser" => state.client().await?.user(identity).await?,
            "setFriendlyName" => {
                let friendly_name = args.require_str("friendlyName")?;
                state
                    .client()
                    .await?
                    .set_user_friendly_name(identity, friendly_name)
                    .await?
            }
            "setAttributes" => {
                let attributes = args.require_value("attributes")?;
                state
                    .client()
                    .await?
                    .set_user_attributes(identity, attributes)
                    .await?
            }
            other => return Err(unimplemented(self.api(), other)),
        };
        to_payload(&user)
    }
}
