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

//! Pointer-identity key for channel transport bindings.

use crate::transport::ChannelTransport;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Identifies a transport binding by the `Arc` it was handed in with, not by value.
#[derive(Clone)]
pub(crate) struct TransportIdentityKey {
    transport: Arc<dyn ChannelTransport>,
}

impl TransportIdentityKey {
    pub(crate) fn new(transport: Arc<dyn ChannelTransport>) -> Self {
        Self { transport }
    }

    pub(crate) fn is(&self, transport: &Arc<dyn ChannelTransport>) -> bool {
        Arc::ptr_eq(&self.transport, transport)
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.transport) as *const ()
    }
}

impl Hash for TransportIdentityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl PartialEq for TransportIdentityKey {
    fn eq(&self, other: &Self) -> bool {
        self.address() == other.address()
    }
}

impl Eq for TransportIdentityKey {}

impl Debug for TransportIdentityKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportIdentityKey")
            .field("address", &self.address())
            .finish()
    }
}
