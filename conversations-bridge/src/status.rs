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

//! Structured failure reported to the caller at the handler boundary.

use crate::sdk::SdkError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure category carried by every [`BridgeStatus`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BridgeCode {
    /// A required RPC argument is missing or has the wrong type.
    InvalidArgument,
    /// An RPC arrived before a native client was created.
    ClientNotInitialized,
    /// The native SDK rejected the operation; see [`BridgeStatus::details`].
    Sdk,
    /// No handler method exists for the requested channel.
    Unimplemented,
    /// The channel transport could not accept a message.
    Unavailable,
    /// A handler failed in a way that is not attributable to the caller or the SDK.
    Internal,
}

impl Display for BridgeCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            BridgeCode::InvalidArgument => "INVALID_ARGUMENT",
            BridgeCode::ClientNotInitialized => "CLIENT_NOT_INITIALIZED",
            BridgeCode::Sdk => "SDK_ERROR",
            BridgeCode::Unimplemented => "UNIMPLEMENTED",
            BridgeCode::Unavailable => "UNAVAILABLE",
            BridgeCode::Internal => "INTERNAL",
        };
        f.write_str(code)
    }
}

/// Structured RPC failure: code, message and, for SDK failures, the native error as raised.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BridgeStatus {
    pub code: BridgeCode,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<SdkError>,
}

impl BridgeStatus {
    pub fn fail_with_code(code: BridgeCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn missing_argument(name: &str) -> Self {
        Self::fail_with_code(
            BridgeCode::InvalidArgument,
            format!("Missing required argument '{name}'"),
        )
    }

    pub fn invalid_argument(name: &str, expected: &str) -> Self {
        Self::fail_with_code(
            BridgeCode::InvalidArgument,
            format!("Argument '{name}' must be {expected}"),
        )
    }

    pub fn client_not_initialized() -> Self {
        Self::fail_with_code(
            BridgeCode::ClientNotInitialized,
            "Client has not been initialized",
        )
    }

    pub fn code(&self) -> BridgeCode {
        self.code
    }

    pub fn details(&self) -> Option<&SdkError> {
        self.details.as_ref()
    }
}

impl From<SdkError> for BridgeStatus {
    fn from(err: SdkError) -> Self {
        Self {
            code: BridgeCode::Sdk,
            message: err.message.clone(),
            details: Some(err),
        }
    }
}

impl Display for BridgeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl Error for BridgeStatus {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.details.as_ref().map(|err| err as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::{BridgeCode, BridgeStatus};
    use crate::sdk::SdkError;
    use std::error::Error;

    #[test]
    fn sdk_error_is_carried_verbatim() {
        let sdk_error = SdkError::new(50107, "User unauthorized to perform action");
        let status = BridgeStatus::from(sdk_error.clone());

        assert_eq!(status.code(), BridgeCode::Sdk);
        assert_eq!(status.message, "User unauthorized to perform action");
        assert_eq!(status.details(), Some(&sdk_error));
        assert!(status.source().is_some());
    }

    #[test]
    fn missing_argument_display_is_stable() {
        let status = BridgeStatus::missing_argument("conversationSid");

        assert_eq!(
            status.to_string(),
            "INVALID_ARGUMENT: Missing required argument 'conversationSid'"
        );
        assert!(status.source().is_none());
    }

    #[test]
    fn failure_serializes_without_empty_details() {
        let status = BridgeStatus::client_not_initialized();
        let json = serde_json::to_value(&status).expect("status serializes");

        assert_eq!(json["code"], "CLIENT_NOT_INITIALIZED");
        assert!(json.get("details").is_none());
    }
}
