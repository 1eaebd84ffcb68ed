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

pub(crate) struct ParticipantApi;

#[async_trait]
impl HandlerGroup for ParticipantApi {
    fn api(&self) -> &'static str {
        "ParticipantApi"
    }

    fn methods(&self) -> &'static [&'static str] {
        &["getUser", "setAttributes"]
    }

    async fn handle(
        &self,
        state: &BridgeState,
        method: &str,
        args: &Args,
    ) -> Result<Value, BridgeStatus> {
        let conversation_sid = args.require_str("conversationSid")?;
        let participant_sid = args.require_str("participantSid")?;

        match method {
            "getUser" => {
                let client = state.client().await?;
                let participant = client
                    .get_conversation(conversation_sid)
                    .await?
                    .participant(participant_sid)
                    .await?;
                let user = client.user(&participant.identity).await?;
                to_payload(&user)
            }
            "setAttributes" => {
                let attributes = args.require_value("attributes")?;
                let participant = state
                    .conversation(conversation_sid)
                    .await?
                    .set_participant_attributes(participant_sid, attributes)
                    .await?;
                to_payload(&participant)
            }
            other => Err(unimplemented(self.api(), other)),
        }
    }
}
