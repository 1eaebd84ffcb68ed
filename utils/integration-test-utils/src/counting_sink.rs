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


use conversations_bridge::DiagnosticSink;
use std::sync::Mutex;
use std::thread;

/// One emitted diagnostic line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmittedLine {
    pub tag: String,
    pub message: String,
    pub thread: Option<String>,
}

/// Diagnostic sink that keeps every emission in memory.
#[derive(Default)]
pub struct CountingSink {
    lines: Mutex<Vec<EmittedLine>>,
}

impl CountingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.lines().len()
    }

    pub fn messages(&self) -> Vec<String> {
        self.lines().into_iter().map(|line| line.message).collect()
    }

    pub fn lines(&self) -> Vec<EmittedLine> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DiagnosticSink for CountingSink {
    fn emit(&self, tag: &str, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(EmittedLine {
                tag: tag.to_string(),
                message: message.to_string(),
                thread: thread::current().name().map(str::to_string),
            });
    }
}
