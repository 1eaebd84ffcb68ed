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

use conversations_bridge::{BridgeConfig, HostContext};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub(crate) bridge: BridgeConfig,
    pub(crate) host: HostContext,
    /// Identities to issue access tokens for at startup.
    #[serde(default)]
    pub(crate) users: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::Config;
    use conversations_bridge::ReattachPolicy;

    #[test]
    fn default_config_file_parses() {
        let config: Config = json5::from_str(include_str!("../config/DEFAULT_CONFIG.json5"))
            .expect("shipped config parses");

        assert!(config.bridge.debug);
        assert_eq!(config.bridge.reattach_policy, ReattachPolicy::SkipRegistration);
        assert_eq!(config.host.name, "conversations-bridge-host");
        assert_eq!(config.users, vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn bridge_section_is_optional() {
        let config: Config =
            json5::from_str(r#"{ host: { name: "minimal" } }"#).expect("minimal config");

        assert!(!config.bridge.debug);
        assert!(config.users.is_empty());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed = json5::from_str::<Config>(r#"{ host: { name: "x" }, transport: "tcp" }"#);

        assert!(parsed.is_err());
    }
}
