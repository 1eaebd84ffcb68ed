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

//! Error codes raised by the in-memory SDK.

use conversations_bridge::sdk::SdkError;

pub const INVALID_ACCESS_TOKEN: i32 = 20101;
pub const CLIENT_SHUT_DOWN: i32 = 50000;
pub const USER_NOT_FOUND: i32 = 50200;
pub const CONVERSATION_NOT_FOUND: i32 = 50350;
pub const PARTICIPANT_NOT_FOUND: i32 = 50400;
pub const PARTICIPANT_ALREADY_EXISTS: i32 = 50433;
pub const MESSAGE_NOT_FOUND: i32 = 50500;

pub(crate) fn invalid_token() -> SdkError {
    SdkError::new(INVALID_ACCESS_TOKEN, "Invalid Access Token")
}

pub(crate) fn client_shut_down() -> SdkError {
    SdkError::new(CLIENT_SHUT_DOWN, "Client has been shut down")
}

pub(crate) fn user_not_found(identity: &str) -> SdkError {
    SdkError::new(USER_NOT_FOUND, format!("User '{identity}' not found"))
}

pub(crate) fn conversation_not_found(sid_or_unique_name: &str) -> SdkError {
    SdkError::new(
        CONVERSATION_NOT_FOUND,
        format!("Conversation '{sid_or_unique_name}' not found"),
    )
}

pub(crate) fn participant_not_found(key: &str) -> SdkError {
    SdkError::new(PARTICIPANT_NOT_FOUND, format!("Participant '{key}' not found"))
}

pub(crate) fn participant_exists(identity: &str) -> SdkError {
    SdkError::new(
        PARTICIPANT_ALREADY_EXISTS,
        format!("Participant '{identity}' already exists"),
    )
}

pub(crate) fn message_not_found(message_index: i64) -> SdkError {
    SdkError::new(MESSAGE_NOT_FOUND, format!("Message {message_index} not found"))
}
