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

//! Interface metrics check.
//!
//! Reads the normalized interface record set of one device, filters it,
//! rewrites colliding interface descriptions so every performance data
//! label stays unique, and projects each record into the flat metric
//! stream consumed by the monitoring frontend.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::check::{BaseRequest, CheckError, CheckResponse};
use crate::device::{registry, DeviceError, Interface};
use crate::error::Result;
use crate::monitoring::{CheckResult, PerfValue, PerformanceDataPoint, Status};
use crate::network::RequestContext;

pub struct CheckInterfaceMetricsRequest {
    pub base: BaseRequest,
    /// ifType values to exclude, one pass per entry.
    pub filter: Vec<String>,
    /// Attach a compact identity view of all interfaces as the OK message.
    pub print_interfaces: bool,
}

/// Compact identity view serialized when `print_interfaces` is set.
/// Absent fields render as empty strings, ifIndex decimally.
#[derive(Serialize)]
struct InterfaceIdentityView {
    #[serde(rename = "ifIndex")]
    if_index: String,
    #[serde(rename = "ifDescr")]
    if_descr: String,
    #[serde(rename = "ifName")]
    if_name: String,
    #[serde(rename = "ifAlias")]
    if_alias: String,
    #[serde(rename = "ifPhysAddress")]
    if_phys_address: String,
}

impl From<&Interface> for InterfaceIdentityView {
    fn from(interface: &Interface) -> Self {
        InterfaceIdentityView {
            if_index: interface.if_index.map(|i| i.to_string()).unwrap_or_default(),
            if_descr: interface.if_descr.clone().unwrap_or_default(),
            if_name: interface.if_name.clone().unwrap_or_default(),
            if_alias: interface.if_alias.clone().unwrap_or_default(),
            if_phys_address: interface.if_phys_address.clone().unwrap_or_default(),
        }
    }
}

impl CheckInterfaceMetricsRequest {
    /// Run the check. All failure paths set UNKNOWN on the accumulator and
    /// suppress performance data; the snapshot is always returned.
    pub async fn process(&self, ctx: &RequestContext, mon: &mut CheckResult) -> CheckResponse {
        let mut interfaces = match self.read_filtered_interfaces(ctx).await {
            Ok(interfaces) => interfaces,
            Err(err) => {
                mon.update_status_on_error(
                    &err,
                    Status::Unknown,
                    "error while processing read interfaces request",
                );
                mon.suppress_performance_data();
                return CheckResponse { info: mon.get_info() };
            }
        };

        if self.print_interfaces {
            let views: Vec<InterfaceIdentityView> =
                interfaces.iter().map(InterfaceIdentityView::from).collect();
            match serde_json::to_string(&views) {
                Ok(output) => mon.update_status(Status::Ok, &output),
                Err(err) => {
                    mon.update_status_on_error(
                        &err,
                        Status::Unknown,
                        "error while marshalling output",
                    );
                    mon.suppress_performance_data();
                    return CheckResponse { info: mon.get_info() };
                }
            }
        }

        if let Err(err) = add_interface_performance_data(&mut interfaces, mon) {
            mon.update_status_on_error(
                &err,
                Status::Unknown,
                "error while adding performance data",
            );
            mon.suppress_performance_data();
        }

        CheckResponse { info: mon.get_info() }
    }

    async fn read_filtered_interfaces(&self, ctx: &RequestContext) -> Result<Vec<Interface>> {
        let reader = registry::interface_reader(self.base.device_class).ok_or(
            DeviceError::CapabilityNotSupported {
                class: self.base.device_class.to_string(),
                capability: "interface reads",
            },
        )?;

        let interfaces = reader.read_interfaces(ctx).await?;
        debug!(
            host = self.base.host.as_str(),
            interfaces = interfaces.len(),
            "read interfaces"
        );

        Ok(filter_interfaces(interfaces, &self.filter))
    }
}

/// Drop interfaces by ifType.
///
/// One pass per filter over the unfiltered list: an interface whose ifType
/// is absent or differs from the filter is copied. With several filters an
/// interface can therefore survive once per filter. Carried-forward
/// contract; see DESIGN.md.
pub fn filter_interfaces(interfaces: Vec<Interface>, filters: &[String]) -> Vec<Interface> {
    if filters.is_empty() {
        return interfaces;
    }
    let mut kept = Vec::new();
    for filter in filters {
        for interface in &interfaces {
            if interface.if_type.as_deref() != Some(filter.as_str()) {
                kept.push(interface.clone());
            }
        }
    }
    kept
}

/// Rewrite colliding ifDescr values in place so they are usable as unique
/// performance data labels.
///
/// The first occurrence of a collision is rewritten once (its back
/// reference is then cleared); every later occurrence rewrites itself.
/// Each rewrite appends the interface's ifIndex, so every colliding
/// participant must carry one. Interfaces without any ifDescr fall back to
/// their decimal ifIndex.
fn reconcile_interface_labels(interfaces: &mut [Interface]) -> std::result::Result<(), CheckError> {
    let mut first_seen: HashMap<String, Option<usize>> = HashMap::new();

    for current in 0..interfaces.len() {
        let Some(original) = interfaces[current].if_descr.clone() else {
            let index = interfaces[current]
                .if_index
                .ok_or(CheckError::MissingDescrAndIndex)?;
            interfaces[current].if_descr = Some(index.to_string());
            continue;
        };

        if !first_seen.contains_key(&original) {
            first_seen.insert(original, Some(current));
            continue;
        }

        // collision: rewrite the first occurrence once, then the current one
        if let Some(first) = first_seen
            .get_mut(&original)
            .and_then(|back_reference| back_reference.take())
        {
            let first_index = interfaces[first]
                .if_index
                .ok_or(CheckError::DuplicateDescrWithoutIndex)?;
            let descr = format!(
                "{} {first_index}",
                interfaces[first].if_descr.as_deref().unwrap_or_default()
            );
            interfaces[first].if_descr = Some(descr);
        }
        let current_index = interfaces[current]
            .if_index
            .ok_or(CheckError::DuplicateDescrWithoutIndex)?;
        interfaces[current].if_descr = Some(format!("{original} {current_index}"));
    }

    Ok(())
}

/// Project every interface into performance data points on `mon`.
///
/// Row order is fixed and 64-bit HC counters win over their 32-bit pair.
pub fn add_interface_performance_data(
    interfaces: &mut [Interface],
    mon: &mut CheckResult,
) -> Result<()> {
    reconcile_interface_labels(interfaces)?;

    for interface in interfaces.iter() {
        let label = interface.if_descr.as_deref().unwrap_or_default();
        let mut add = |name: &str, value: PerfValue, unit: &str| {
            mon.add_performance_data_point(
                PerformanceDataPoint::new(name, value, unit).with_label(label),
            )
        };

        if let Some(v) = interface.if_in_errors {
            add("error_counter_in", v.into(), "c")?;
        }
        if let Some(v) = interface.if_out_errors {
            add("error_counter_out", v.into(), "c")?;
        }
        if let Some(v) = interface.if_in_discards {
            add("packet_counter_discard_in", v.into(), "c")?;
        }
        if let Some(v) = interface.if_out_discards {
            add("packet_counter_discard_out", v.into(), "c")?;
        }
        if let Some(status) = interface.if_admin_status {
            add("interface_admin_status", status.status_code().into(), "")?;
        }
        if let Some(status) = interface.if_oper_status {
            add("interface_oper_status", status.status_code().into(), "")?;
        }
        if let Some(v) = interface.if_hc_in_octets.or(interface.if_in_octets) {
            add("traffic_counter_in", v.into(), "B")?;
        }
        if let Some(v) = interface.if_hc_out_octets.or(interface.if_out_octets) {
            add("traffic_counter_out", v.into(), "B")?;
        }
        if let Some(v) = interface.if_hc_in_ucast_pkts.or(interface.if_in_ucast_pkts) {
            add("packet_counter_unicast_in", v.into(), "c")?;
        }
        if let Some(v) = interface
            .if_hc_out_ucast_pkts
            .or(interface.if_out_ucast_pkts)
        {
            add("packet_counter_unicast_out", v.into(), "c")?;
        }
        if let Some(v) = interface
            .if_hc_in_multicast_pkts
            .or(interface.if_in_multicast_pkts)
        {
            add("packet_counter_multicast_in", v.into(), "c")?;
        }
        if let Some(v) = interface
            .if_hc_out_multicast_pkts
            .or(interface.if_out_multicast_pkts)
        {
            add("packet_counter_multicast_out", v.into(), "c")?;
        }
        if let Some(v) = interface
            .if_hc_in_broadcast_pkts
            .or(interface.if_in_broadcast_pkts)
        {
            add("packet_counter_broadcast_in", v.into(), "c")?;
        }
        if let Some(v) = interface
            .if_hc_out_broadcast_pkts
            .or(interface.if_out_broadcast_pkts)
        {
            add("packet_counter_broadcast_out", v.into(), "c")?;
        }
        if let Some(v) = interface.if_speed {
            add("interface_maxspeed_in", v.into(), "B")?;
            add("interface_maxspeed_out", v.into(), "B")?;
        }

        // EtherLike-MIB
        if let Some(v) = interface.dot3_stats_alignment_errors {
            add("error_counter_alignment_errors", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_fcs_errors {
            add("error_counter_FCSErrors", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_single_collision_frames {
            add("error_counter_single_collision_frames", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_multiple_collision_frames {
            add("error_counter_multiple_collision_frames", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_sqe_test_errors {
            add("error_counter_SQETest_errors", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_deferred_transmissions {
            add("error_counter_deferred_transmissions", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_late_collisions {
            add("error_counter_late_collisions", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_excessive_collisions {
            add("error_counter_excessive_collisions", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_internal_mac_transmit_errors {
            add("error_counter_internal_mac_transmit_errors", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_carrier_sense_errors {
            add("error_counter_carrier_sense_errors", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_frame_too_longs {
            add("error_counter_frame_too_longs", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_stats_internal_mac_receive_errors {
            add("error_counter_internal_mac_receive_errors", v.into(), "c")?;
        }
        if let Some(v) = interface.dot3_hc_stats_fcs_errors {
            add("error_counter_dot3HCStatsFCSErrors", v.into(), "c")?;
        }
        if let Some(v) = interface.ether_stats_crc_align_errors {
            add("error_counter_CRCAlign_errors", v.into(), "c")?;
        }

        // Radio
        if let Some(v) = interface.level_out {
            add("interface_level_out", v.into(), "")?;
        }
        if let Some(v) = interface.level_in {
            add("interface_level_in", v.into(), "")?;
        }
        if let Some(v) = interface.maxbitrate_out {
            add("interface_maxbitrate_out", v.into(), "B")?;
        }
        if let Some(v) = interface.maxbitrate_in {
            add("interface_maxbitrate_in", v.into(), "B")?;
        }

        // DWDM
        if let Some(v) = interface.rx_level {
            add("rx_level", v.into(), "")?;
        }
        if let Some(v) = interface.tx_level {
            add("tx_level", v.into(), "")?;
        }
    }

    Ok(())
}
