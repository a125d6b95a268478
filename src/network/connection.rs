// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Request-scoped device connection handle.
//!
//! A [`RequestContext`] travels with every adapter call. It carries the
//! connection the surrounding request opened (the core neither opens nor
//! closes transports) and the cancellation token for the request.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::network::SnmpClient;

/// SNMP side of a device connection.
#[derive(Clone)]
pub struct SnmpConnection {
    pub client: Arc<dyn SnmpClient>,
}

/// The transports available for one device within one request.
///
/// Each transport is optional; adapters check for the one they need and
/// fail with a connection error when it is absent.
#[derive(Clone, Default)]
pub struct DeviceConnection {
    pub snmp: Option<SnmpConnection>,
}

impl DeviceConnection {
    pub fn with_snmp(client: Arc<dyn SnmpClient>) -> Self {
        DeviceConnection {
            snmp: Some(SnmpConnection { client }),
        }
    }
}

/// Per-request context handed to every adapter operation.
#[derive(Clone, Default)]
pub struct RequestContext {
    connection: Option<Arc<DeviceConnection>>,
    cancel: CancellationToken,
}

impl RequestContext {
    pub fn new() -> Self {
        RequestContext::default()
    }

    pub fn with_connection(mut self, connection: DeviceConnection) -> Self {
        self.connection = Some(Arc::new(connection));
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The device connection bound to this request, if any.
    pub fn device_connection(&self) -> Option<&DeviceConnection> {
        self.connection.as_deref()
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
