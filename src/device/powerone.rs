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

//! PowerOne UPS controller adapters.
//!
//! The ACC and PCC controller families answer the same mains-voltage probe
//! under different enterprise OIDs. Bit 3 of the probed register is set
//! while the UPS runs on battery.

use async_trait::async_trait;

use crate::device::{DeviceError, DeviceResult, UpsMainsVoltageReader};
use crate::network::{Oid, RequestContext};

const POWERONE_ACC_MAINS_VOLTAGE_OID: &str = ".1.3.6.1.4.1.5961.4.3.2.0";
const POWERONE_PCC_MAINS_VOLTAGE_OID: &str = ".1.3.6.1.4.1.5961.3.3.2.0";

pub struct PoweroneAccCommunicator;

pub struct PoweronePccCommunicator;

#[async_trait]
impl UpsMainsVoltageReader for PoweroneAccCommunicator {
    async fn mains_voltage_applied(&self, ctx: &RequestContext) -> DeviceResult<bool> {
        mains_voltage_applied(ctx, POWERONE_ACC_MAINS_VOLTAGE_OID).await
    }
}

#[async_trait]
impl UpsMainsVoltageReader for PoweronePccCommunicator {
    async fn mains_voltage_applied(&self, ctx: &RequestContext) -> DeviceResult<bool> {
        mains_voltage_applied(ctx, POWERONE_PCC_MAINS_VOLTAGE_OID).await
    }
}

async fn mains_voltage_applied(ctx: &RequestContext, oid: &str) -> DeviceResult<bool> {
    let connection = ctx
        .device_connection()
        .and_then(|con| con.snmp.as_ref())
        .ok_or(DeviceError::NoConnection)?;

    let oid: Oid = oid.parse().map_err(DeviceError::SnmpGet)?;
    let response = connection
        .client
        .get(ctx, &oid)
        .await
        .map_err(DeviceError::SnmpGet)?;

    if response.len() != 1 {
        return Err(DeviceError::UnexpectedResponseCount);
    }

    let raw = response[0]
        .value
        .as_string()
        .map_err(DeviceError::ValueString)?;
    let value: i64 = raw.trim().parse().map_err(DeviceError::ParseResponse)?;

    Ok((value & 8) == 0)
}
