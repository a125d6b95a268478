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

//! Check request drivers.
//!
//! A check orchestrates adapter invocation against one device and feeds an
//! injected [`CheckResult`](crate::monitoring::CheckResult) accumulator.
//! Every driver returns the accumulator's snapshot; errors never unwind
//! past the driver.

pub mod cpu_load;
pub mod interface_metrics;
pub mod ups;

use serde::Serialize;
use thiserror::Error;

use crate::device::DeviceClass;
use crate::monitoring::CheckInfo;

pub use cpu_load::CheckCpuLoadRequest;
pub use interface_metrics::CheckInterfaceMetricsRequest;
pub use ups::CheckUpsRequest;

/// Data-shape errors raised by the check pipeline itself.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("interface does not have an ifDescription and ifIndex")]
    MissingDescrAndIndex,

    #[error("interface does not have an ifIndex, but ifDescr is a duplicate")]
    DuplicateDescrWithoutIndex,
}

/// Fields shared by every check request: which device, and how to talk to
/// it. The connection itself travels in the request context.
#[derive(Debug, Clone)]
pub struct BaseRequest {
    pub host: String,
    pub device_class: DeviceClass,
}

/// The response of a finished check: the accumulator snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    #[serde(flatten)]
    pub info: CheckInfo,
}

impl CheckResponse {
    pub fn render(&self) -> String {
        self.info.render()
    }

    pub fn exit_code(&self) -> i32 {
        self.info.exit_code()
    }
}
