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

use serde::{Deserialize, Serialize};

/// What an `attach` does when handler groups are already registered.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReattachPolicy {
    /// Rebind the transport for outbound sends and rebuild the outbound endpoints, but leave
    /// the existing handler registrations alone. Handlers registered earlier keep replying
    /// on the transport they were registered on.
    #[default]
    SkipRegistration,
    /// Additionally register every handler group on the new transport when it is not the
    /// transport the groups were last registered on. Relies on the transport replacing
    /// handlers by channel name.
    Reregister,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BridgeConfig {
    /// Initial state of the debug relay.
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub reattach_policy: ReattachPolicy,
}

/// Identity of the host process the bridge is attached to.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostContext {
    pub name: String,
    #[serde(default)]
    pub application_id: Option<String>,
}

impl HostContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            application_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BridgeConfig, ReattachPolicy};

    #[test]
    fn defaults_reproduce_skip_registration() {
        let config: BridgeConfig = serde_json::from_str("{}").expect("empty config");

        assert!(!config.debug);
        assert_eq!(config.reattach_policy, ReattachPolicy::SkipRegistration);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<BridgeConfig>(r#"{ "debug": true, "verbose": 1 }"#);

        assert!(parsed.is_err());
    }

    #[test]
    fn reregister_policy_parses_from_snake_case() {
        let config: BridgeConfig =
            serde_json::from_str(r#"{ "reattach_policy": "reregister" }"#).expect("policy");

        assert_eq!(config.reattach_policy, ReattachPolicy::Reregister);
    }
}
