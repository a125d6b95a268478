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

//! CPU load over the UCD-SNMP laTable.

use async_trait::async_trait;

use crate::device::{CpuLoadReader, DeviceError, DeviceResult};
use crate::network::{Oid, RequestContext};

const UCD_LA_LOAD: &str = "1.3.6.1.4.1.2021.10.1.3";

pub struct UcdCpuLoadReader;

#[async_trait]
impl CpuLoadReader for UcdCpuLoadReader {
    async fn read_cpu_load(&self, ctx: &RequestContext) -> DeviceResult<Vec<f64>> {
        let connection = ctx
            .device_connection()
            .and_then(|con| con.snmp.as_ref())
            .ok_or(DeviceError::NoConnection)?;

        let root: Oid = UCD_LA_LOAD.parse().map_err(DeviceError::SnmpWalk)?;
        let bindings = connection
            .client
            .walk(ctx, &root)
            .await
            .map_err(DeviceError::SnmpWalk)?;

        bindings
            .iter()
            .map(|binding| {
                binding
                    .value
                    .as_f64()
                    .map_err(|source| DeviceError::ColumnDecode {
                        column: "laLoad",
                        if_index: binding.oid.components().last().copied().map_or(0, u64::from),
                        source,
                    })
            })
            .collect()
    }
}
