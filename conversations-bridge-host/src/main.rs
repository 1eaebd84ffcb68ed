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

mod config;
mod stdio_transport;

use crate::config::Config;
use crate::stdio_transport::StdioTransport;
use clap::Parser;
use conversations_bridge::{BridgeCode, BridgeStatus, ConversationsBridge};
use in_memory_conversations::InMemoryConversations;
use std::fs::File;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{info, warn};

const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command()]
struct HostArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

fn load_config(path: &str) -> Result<Config, BridgeStatus> {
    let mut file = File::open(path).map_err(|e| {
        BridgeStatus::fail_with_code(
            BridgeCode::InvalidArgument,
            format!("File not found: {e:?}"),
        )
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        BridgeStatus::fail_with_code(
            BridgeCode::Internal,
            format!("Unable to read config file: {e:?}"),
        )
    })?;

    json5::from_str(&contents).map_err(|e| {
        BridgeStatus::fail_with_code(
            BridgeCode::InvalidArgument,
            format!("Unable to parse config file: {e:?}"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), BridgeStatus> {
    // stdout carries the channel; logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init();

    info!("Started conversations-bridge-host");

    let args = HostArgs::parse();
    let config = load_config(&args.config)?;

    let service = InMemoryConversations::new();
    for identity in &config.users {
        let token = service.issue_token(identity);
        info!(identity = identity.as_str(), token = token.as_str(), "issued access token");
    }

    let bridge = ConversationsBridge::new(
        "conversations-bridge-host",
        config.bridge,
        Arc::new(service),
    )?;
    let transport = Arc::new(StdioTransport::new(Box::new(std::io::stdout())));

    let report = bridge.attach(transport.clone(), config.host).await;
    info!(
        outcome = %report.outcome,
        registered_channels = report.registered_channels,
        failed_channels = report.failed_channels.len(),
        "bridge attached to stdio"
    );

    transport.serve(BufReader::new(tokio::io::stdin())).await;
    if !transport.drain(DRAIN_TIMEOUT).await {
        warn!("exiting with unanswered requests");
    }

    bridge.detach().await;
    bridge.teardown().await;
    info!("conversations-bridge-host stopped");
    Ok(())
}
