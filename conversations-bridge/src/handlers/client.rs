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

//! `ConversationClientApi`: native client lifecycle and client-level lookups.

use super::{to_payload, unimplemented, HandlerGroup};
use crate::control_plane::bridge_state::BridgeState;
use crate::message::Args;
use crate::sdk::ClientProperties;
use crate::status::BridgeStatus;
use async_trait::async_trait;
use serde_json::{json, Value};

pub(crate) struct ConversationClientApi;

#[async_trait]
impl HandlerGroup for ConversationClientApi {
    fn api(&self) -> &'static str {
        "ConversationClientApi"
    }

    fn methods(&self) -> &'static [&'static str] {
        &[
            "create",
            "updateToken",
            "shutdown",
            "createConversation",
            "getConversation",
            "getMyConversations",
            "getMyUser",
        ]
    }

    async fn handle(
        &self,
        state: &BridgeState,
        method: &str,
        args: &Args,
    ) -> Result<Value, BridgeStatus> {
        match method {
            "create" => {
                let token = args.require_str("jwtToken")?;
                let region = match args.optional_object("properties")? {
                    Some(properties) => properties.optional_str("region")?.map(str::to_string),
                    None => None,
                };

                state.debug.debug("creating native client");
                let client = state
                    .client_factory
                    .create(token, ClientProperties { region })
                    .await?;
                state.install_client(client.clone()).await;

                Ok(json!({
                    "myIdentity": client.my_identity(),
                    "connectionState": client.connection_state(),
                }))
            }
            "updateToken" => {
                let token = args.require_str("token")?;
                state.client().await?.update_token(token).await?;
                Ok(Value::Null)
            }
            "shutdown" => {
                if state.shutdown_client().await {
                    state.debug.debug("native client shut down");
                }
                Ok(Value::Null)
            }
            "createConversation" => {
                let friendly_name = args.require_str("friendlyName")?;
                let conversation = state
                    .client()
                    .await?
                    .create_conversation(friendly_name)
                    .await?;
                to_payload(&conversation.snapshot().await)
            }
            "getConversation" => {
                let sid_or_unique_name = args.require_str("conversationSidOrUniqueName")?;
                let conversation = state.conversation(sid_or_unique_name).await?;
                to_payload(&conversation.snapshot().await)
            }
            "getMyConversations" => {
                let conversations = state.client().await?.my_conversations().await?;
                let mut snapshots = Vec::with_capacity(conversations.len());
                for conversation in conversations {
                    snapshots.push(conversation.snapshot().await);
                }
                to_payload(&snapshots)
            }
            "getMyUser" => {
                let client = state.client().await?;
                let user = client.user(&client.my_identity()).await?;
                to_payload(&user)
            }
            other => Err(unimplemented(self.api(), other)),
        }
    }
}
