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

//! `ConversationApi`: operations on one conversation, addressed by `conversationSid`.
//!
//! `subscribe`/`unsubscribe` manage the forwarding listener for the conversation; a
//! successful `leave` or `destroy` drops it as well.

use super::{to_payload, unimplemented, HandlerGroup};
use crate::control_plane::bridge_state::BridgeState;
use crate::message::Args;
use crate::sdk::MessageOptions;
use crate::status::BridgeStatus;
use async_trait::async_trait;
use serde_json::{json, Value};

const CONVERSATION_SID: &str = "conversationSid";

pub(crate) struct ConversationApi;

#[async_trait]
impl HandlerGroup for ConversationApi {
    fn api(&self) -> &'static str {
        "ConversationApi"
    }

    fn methods(&self) -> &'static [&'static str] {
        &[
            "subscribe",
            "unsubscribe",
            "join",
            "leave",
            "destroy",
            "setFriendlyName",
            "sendMessage",
            "getLastMessages",
            "getMessagesCount",
            "getParticipantsList",
            "addParticipantByIdentity",
            "removeParticipant",
        ]
    }

    async fn handle(
        &self,
        state: &BridgeState,
        method: &str,
        args: &Args,
    ) -> Result<Value, BridgeStatus> {
        let sid = args.require_str(CONVERSATION_SID)?;

        match method {
            "subscribe" => {
                let handle = state.subscribe(sid).await?;
                Ok(json!({
                    "conversationSid": handle.entity_id(),
                    "listenerId": handle.listener_id(),
                }))
            }
            "unsubscribe" => {
                let removed = state.unsubscribe(sid).await;
                Ok(json!({ "removed": removed }))
            }
            "join" => {
                state.conversation(sid).await?.join().await?;
                Ok(Value::Null)
            }
            "leave" => {
                state.conversation(sid).await?.leave().await?;
                state.unsubscribe(sid).await;
                Ok(Value::Null)
            }
            "destroy" => {
                state.conversation(sid).await?.destroy().await?;
                state.unsubscribe(sid).await;
                Ok(Value::Null)
            }
            "setFriendlyName" => {
                let friendly_name = args.require_str("friendlyName")?;
                state
                    .conversation(sid)
                    .await?
                    .set_friendly_name(friendly_name)
                    .await?;
                Ok(Value::Null)
            }
            "sendMessage" => {
                let options = args.require_object("options")?;
                let body = options.require_str("body")?.to_string();
                let attributes = options.get("attributes").cloned();

                let message = state
                    .conversation(sid)
                    .await?
                    .send_message(MessageOptions { body, attributes })
                    .await?;
                to_payload(&message)
            }
            "getLastMessages" => {
                let count = usize::try_from(args.require_i64("count")?).map_err(|_| {
                    BridgeStatus::invalid_argument("count", "a non-negative integer")
                })?;
                let messages = state.conversation(sid).await?.last_messages(count).await?;
                to_payload(&messages)
            }
            "getMessagesCount" => {
                let count = state.conversation(sid).await?.messages_count().await?;
                Ok(json!(count))
            }
            "getParticipantsList" => {
                let participants = state.conversation(sid).await?.participants().await?;
                to_payload(&participants)
            }
            "addParticipantByIdentity" => {
                let identity = args.require_str("identity")?;
                state
                    .conversation(sid)
                    .await?
                    .add_participant_by_identity(identity)
                    .await?;
                Ok(Value::Null)
            }
            "removeParticipant" => {
                let participant_sid = args.require_str("participantSid")?;
                state
                    .conversation(sid)
                    .await?
                    .remove_participant(participant_sid)
                    .await?;
                Ok(Value::Null)
            }
            other => Err(unimplemented(self.api(), other)),
        }
    }
}
