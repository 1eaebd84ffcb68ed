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

//! `MessageApi`: messages are addressed by conversation SID plus message index.

use super::{to_payload, unimplemented, HandlerGroup};
use crate::control_plane::bridge_state::BridgeState;
use crate::message::Args;
use crate::status::{BridgeCode, BridgeStatus};
use async_trait::async_trait;
use serde_json::Value;

pub(crate) struct MessageApi;

#[async_trait]
impl HandlerGroup for MessageApi {
    fn api(&self) -> &'static str {
        "MessageApi"
    }

    fn methods(&self) -> &'static [&'static str] {
        &["updateMessageBody", "setAttributes", "getParticipant"]
    }

    async fn handle(
        &self,
        state: &BridgeState,
        method: &str,
        args: &Args,
    ) -> Result<Value, BridgeStatus> {
        let conversation_sid = args.require_str("conversationSid")?;
        let message_index = args.require_i64("messageIndex")?;

        match method {
            "updateMessageBody" => {
                let body = args.require_str("messageBody")?;
                let message = state
                    .conversation(conversation_sid)
                    .await?
                    .update_message_body(message_index, body)
                    .await?;
                to_payload(&message)
            }
            "setAttributes" => {
                let attributes = args.require_value("attributes")?;
                let message = state
                    .conversation(conversation_sid)
                    .await?
                    .set_message_attributes(message_index, attributes)
                    .await?;
                to_payload(&message)
            }
            "getParticipant" => {
                let conversation = state.conversation(conversation_sid).await?;
                let message = conversation.message(message_index).await?;

                // Messages sent through the REST API carry no participant SID.
                let participant = match message.participant_sid.as_deref() {
                    Some(participant_sid) => conversation.participant(participant_sid).await?,
                    None => conversation
                        .participants()
                        .await?
                        .into_iter()
                        .find(|participant| participant.identity == message.author)
                        .ok_or_else(|| {
                            BridgeStatus::fail_with_code(
                                BridgeCode::InvalidArgument,
                                format!("Message {message_index} has no participant"),
                            )
                        })?,
                };
                to_payload(&participant)
            }
            other => Err(unimplemented(self.api(), other)),
        }
    }
}
