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

//! UPS mains-voltage check.

use crate::check::{BaseRequest, CheckResponse};
use crate::device::{registry, DeviceError};
use crate::monitoring::{CheckResult, PerformanceDataPoint, Status};
use crate::network::RequestContext;

pub struct CheckUpsRequest {
    pub base: BaseRequest,
}

impl CheckUpsRequest {
    pub async fn process(&self, ctx: &RequestContext, mon: &mut CheckResult) -> CheckResponse {
        let reader = match registry::ups_mains_voltage_reader(self.base.device_class) {
            Some(reader) => reader,
            None => {
                let err = DeviceError::CapabilityNotSupported {
                    class: self.base.device_class.to_string(),
                    capability: "ups reads",
                };
                mon.update_status_on_error(
                    &err,
                    Status::Unknown,
                    "error while processing read ups request",
                );
                mon.suppress_performance_data();
                return CheckResponse { info: mon.get_info() };
            }
        };

        let applied = match reader.mains_voltage_applied(ctx).await {
            Ok(applied) => applied,
            Err(err) => {
                mon.update_status_on_error(
                    &err,
                    Status::Unknown,
                    "error while getting mains voltage applied",
                );
                mon.suppress_performance_data();
                return CheckResponse { info: mon.get_info() };
            }
        };

        if !applied {
            mon.update_status(Status::Critical, "mains voltage is not applied");
        }
        if let Err(err) = mon.add_performance_data_point(PerformanceDataPoint::new(
            "mains_voltage_applied",
            u64::from(applied),
            "",
        )) {
            mon.update_status_on_error(
                &err,
                Status::Unknown,
                "error while adding performance data",
            );
            mon.suppress_performance_data();
        }

        CheckResponse { info: mon.get_info() }
    }
}
