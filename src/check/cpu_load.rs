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

//! CPU load check.

use crate::check::{BaseRequest, CheckResponse};
use crate::device::{registry, DeviceError};
use crate::monitoring::{CheckResult, PerformanceDataPoint, Status};
use crate::network::RequestContext;

pub struct CheckCpuLoadRequest {
    pub base: BaseRequest,
}

impl CheckCpuLoadRequest {
    pub async fn process(&self, ctx: &RequestContext, mon: &mut CheckResult) -> CheckResponse {
        let reader = match registry::cpu_load_reader(self.base.device_class) {
            Some(reader) => reader,
            None => {
                let err = DeviceError::CapabilityNotSupported {
                    class: self.base.device_class.to_string(),
                    capability: "cpu reads",
                };
                mon.update_status_on_error(
                    &err,
                    Status::Unknown,
                    "error while processing read cpu load request",
                );
                mon.suppress_performance_data();
                return CheckResponse { info: mon.get_info() };
            }
        };

        let loads = match reader.read_cpu_load(ctx).await {
            Ok(loads) => loads,
            Err(err) => {
                mon.update_status_on_error(
                    &err,
                    Status::Unknown,
                    "error while processing read cpu load request",
                );
                mon.suppress_performance_data();
                return CheckResponse { info: mon.get_info() };
            }
        };

        for (core, load) in loads.iter().enumerate() {
            let point = PerformanceDataPoint::new("cpu_load", *load, "%")
                .with_label(&core.to_string());
            if let Err(err) = mon.add_performance_data_point(point) {
                mon.update_status_on_error(
                    &err,
                    Status::Unknown,
                    "error while adding performance data",
                );
                mon.suppress_performance_data();
                break;
            }
        }

        CheckResponse { info: mon.get_info() }
    }
}
