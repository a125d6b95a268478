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

//! Device capability traits.
//!
//! Communicators are a capability-tagged family, not a deep hierarchy:
//! each concrete adapter implements the narrow traits for what its device
//! family can answer, and the registry hands out one trait object per
//! capability.

use async_trait::async_trait;

use crate::device::{DeviceResult, Interface};
use crate::network::RequestContext;

#[async_trait]
pub trait InterfaceReader: Send + Sync {
    /// Read the normalized interface record set, in device order.
    async fn read_interfaces(&self, ctx: &RequestContext) -> DeviceResult<Vec<Interface>>;
}

#[async_trait]
pub trait UpsMainsVoltageReader: Send + Sync {
    /// Whether mains voltage is currently applied to the UPS.
    async fn mains_voltage_applied(&self, ctx: &RequestContext) -> DeviceResult<bool>;
}

#[async_trait]
pub trait CpuLoadReader: Send + Sync {
    /// Per-core load values, in device order.
    async fn read_cpu_load(&self, ctx: &RequestContext) -> DeviceResult<Vec<f64>>;
}
