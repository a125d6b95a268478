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

//! Generic interface reader over the standard MIB-2 tables.
//!
//! Walks ifTable, ifXTable, the EtherLike-MIB dot3 tables and the RMON
//! etherStats table and merges the columns into [`Interface`] records keyed
//! by the instance ifIndex. Missing tables and sparse columns are normal;
//! a value that cannot be decoded is not.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::device::{DeviceError, DeviceResult, Interface, InterfaceReader, PortStatus};
use crate::network::{Oid, RequestContext, SnmpValue, SnmpVariable};

const IF_TABLE_ENTRY: &str = "1.3.6.1.2.1.2.2.1";
const IF_X_TABLE_ENTRY: &str = "1.3.6.1.2.1.31.1.1.1";
const DOT3_STATS_ENTRY: &str = "1.3.6.1.2.1.10.7.2.1";
const DOT3_HC_STATS_ENTRY: &str = "1.3.6.1.2.1.10.7.11.1";
const ETHER_STATS_ENTRY: &str = "1.3.6.1.2.1.16.1.1.1";

/// ifSpeed reports this sentinel when the real speed exceeds 32 bits;
/// ifHighSpeed (Mb/s) carries the value instead.
const IF_SPEED_OVERFLOW: u64 = 4_294_967_295;

pub struct IfMibInterfaceReader;

#[async_trait]
impl InterfaceReader for IfMibInterfaceReader {
    async fn read_interfaces(&self, ctx: &RequestContext) -> DeviceResult<Vec<Interface>> {
        let connection = ctx
            .device_connection()
            .and_then(|con| con.snmp.as_ref())
            .ok_or(DeviceError::NoConnection)?;

        let mut interfaces: BTreeMap<u64, Interface> = BTreeMap::new();
        let mut high_speed: BTreeMap<u64, u64> = BTreeMap::new();

        for (entry, apply) in TABLE_DECODERS.iter().copied() {
            let root: Oid = entry.parse().map_err(DeviceError::SnmpWalk)?;
            let bindings = connection
                .client
                .walk(ctx, &root)
                .await
                .map_err(DeviceError::SnmpWalk)?;
            debug!(table = entry, bindings = bindings.len(), "walked table");

            for binding in &bindings {
                let Some((column, if_index)) = column_instance(binding, &root) else {
                    continue;
                };
                let interface = interfaces.entry(if_index).or_default();
                if interface.if_index.is_none() {
                    interface.if_index = Some(if_index);
                }
                apply(interface, column, if_index, &binding.value, &mut high_speed)?;
            }
        }

        for (if_index, interface) in &mut interfaces {
            if interface.if_speed == Some(IF_SPEED_OVERFLOW) {
                if let Some(mbits) = high_speed.get(if_index) {
                    interface.if_speed = Some(mbits * 1_000_000);
                }
            }
        }

        Ok(interfaces.into_values().collect())
    }
}

type ColumnDecoder = fn(
    &mut Interface,
    u32,
    u64,
    &SnmpValue,
    &mut BTreeMap<u64, u64>,
) -> DeviceResult<()>;

const TABLE_DECODERS: &[(&str, ColumnDecoder)] = &[
    (IF_TABLE_ENTRY, apply_if_table_column),
    (IF_X_TABLE_ENTRY, apply_if_x_table_column),
    (DOT3_STATS_ENTRY, apply_dot3_stats_column),
    (DOT3_HC_STATS_ENTRY, apply_dot3_hc_stats_column),
    (ETHER_STATS_ENTRY, apply_ether_stats_column),
];

/// Split a table binding into `(column, ifIndex)`; bindings that are not
/// scalar column instances are skipped.
fn column_instance(binding: &SnmpVariable, root: &Oid) -> Option<(u32, u64)> {
    let instance = binding.oid.instance_after(root)?;
    if instance.len() != 2 {
        return None;
    }
    Some((instance[0], u64::from(instance[1])))
}

fn counter(
    column: &'static str,
    if_index: u64,
    value: &SnmpValue,
) -> DeviceResult<u64> {
    value.as_u64().map_err(|source| DeviceError::ColumnDecode {
        column,
        if_index,
        source,
    })
}

fn text(column: &'static str, if_index: u64, value: &SnmpValue) -> DeviceResult<String> {
    value
        .as_string()
        .map_err(|source| DeviceError::ColumnDecode {
            column,
            if_index,
            source,
        })
}

fn status(column: &'static str, if_index: u64, value: &SnmpValue) -> DeviceResult<PortStatus> {
    PortStatus::from_wire(counter(column, if_index, value)?)
}

fn apply_if_table_column(
    interface: &mut Interface,
    column: u32,
    if_index: u64,
    value: &SnmpValue,
    _high_speed: &mut BTreeMap<u64, u64>,
) -> DeviceResult<()> {
    match column {
        2 => interface.if_descr = Some(text("ifDescr", if_index, value)?),
        3 => interface.if_type = Some(if_type_name(counter("ifType", if_index, value)?)),
        5 => interface.if_speed = Some(counter("ifSpeed", if_index, value)?),
        6 => interface.if_phys_address = Some(text("ifPhysAddress", if_index, value)?),
        7 => interface.if_admin_status = Some(status("ifAdminStatus", if_index, value)?),
        8 => interface.if_oper_status = Some(status("ifOperStatus", if_index, value)?),
        10 => interface.if_in_octets = Some(counter("ifInOctets", if_index, value)?),
        11 => interface.if_in_ucast_pkts = Some(counter("ifInUcastPkts", if_index, value)?),
        13 => interface.if_in_discards = Some(counter("ifInDiscards", if_index, value)?),
        14 => interface.if_in_errors = Some(counter("ifInErrors", if_index, value)?),
        16 => interface.if_out_octets = Some(counter("ifOutOctets", if_index, value)?),
        17 => interface.if_out_ucast_pkts = Some(counter("ifOutUcastPkts", if_index, value)?),
        19 => interface.if_out_discards = Some(counter("ifOutDiscards", if_index, value)?),
        20 => interface.if_out_errors = Some(counter("ifOutErrors", if_index, value)?),
        _ => {}
    }
    Ok(())
}

fn apply_if_x_table_column(
    interface: &mut Interface,
    column: u32,
    if_index: u64,
    value: &SnmpValue,
    high_speed: &mut BTreeMap<u64, u64>,
) -> DeviceResult<()> {
    match column {
        1 => interface.if_name = Some(text("ifName", if_index, value)?),
        2 => interface.if_in_multicast_pkts = Some(counter("ifInMulticastPkts", if_index, value)?),
        3 => interface.if_in_broadcast_pkts = Some(counter("ifInBroadcastPkts", if_index, value)?),
        4 => {
            interface.if_out_multicast_pkts = Some(counter("ifOutMulticastPkts", if_index, value)?)
        }
        5 => {
            interface.if_out_broadcast_pkts = Some(counter("ifOutBroadcastPkts", if_index, value)?)
        }
        6 => interface.if_hc_in_octets = Some(counter("ifHCInOctets", if_index, value)?),
        7 => interface.if_hc_in_ucast_pkts = Some(counter("ifHCInUcastPkts", if_index, value)?),
        8 => {
            interface.if_hc_in_multicast_pkts =
                Some(counter("ifHCInMulticastPkts", if_index, value)?)
        }
        9 => {
            interface.if_hc_in_broadcast_pkts =
                Some(counter("ifHCInBroadcastPkts", if_index, value)?)
        }
        10 => interface.if_hc_out_octets = Some(counter("ifHCOutOctets", if_index, value)?),
        11 => interface.if_hc_out_ucast_pkts = Some(counter("ifHCOutUcastPkts", if_index, value)?),
        12 => {
            interface.if_hc_out_multicast_pkts =
                Some(counter("ifHCOutMulticastPkts", if_index, value)?)
        }
        13 => {
            interface.if_hc_out_broadcast_pkts =
                Some(counter("ifHCOutBroadcastPkts", if_index, value)?)
        }
        15 => {
            high_speed.insert(if_index, counter("ifHighSpeed", if_index, value)?);
        }
        18 => interface.if_alias = Some(text("ifAlias", if_index, value)?),
        _ => {}
    }
    Ok(())
}

fn apply_dot3_stats_column(
    interface: &mut Interface,
    column: u32,
    if_index: u64,
    value: &SnmpValue,
    _high_speed: &mut BTreeMap<u64, u64>,
) -> DeviceResult<()> {
    match column {
        2 => {
            interface.dot3_stats_alignment_errors =
                Some(counter("dot3StatsAlignmentErrors", if_index, value)?)
        }
        3 => interface.dot3_stats_fcs_errors = Some(counter("dot3StatsFCSErrors", if_index, value)?),
        4 => {
            interface.dot3_stats_single_collision_frames =
                Some(counter("dot3StatsSingleCollisionFrames", if_index, value)?)
        }
        5 => {
            interface.dot3_stats_multiple_collision_frames =
                Some(counter("dot3StatsMultipleCollisionFrames", if_index, value)?)
        }
        6 => {
            interface.dot3_stats_sqe_test_errors =
                Some(counter("dot3StatsSQETestErrors", if_index, value)?)
        }
        7 => {
            interface.dot3_stats_deferred_transmissions =
                Some(counter("dot3StatsDeferredTransmissions", if_index, value)?)
        }
        8 => {
            interface.dot3_stats_late_collisions =
                Some(counter("dot3StatsLateCollisions", if_index, value)?)
        }
        9 => {
            interface.dot3_stats_excessive_collisions =
                Some(counter("dot3StatsExcessiveCollisions", if_index, value)?)
        }
        10 => {
            interface.dot3_stats_internal_mac_transmit_errors =
                Some(counter("dot3StatsInternalMacTransmitErrors", if_index, value)?)
        }
        11 => {
            interface.dot3_stats_carrier_sense_errors =
                Some(counter("dot3StatsCarrierSenseErrors", if_index, value)?)
        }
        13 => {
            interface.dot3_stats_frame_too_longs =
                Some(counter("dot3StatsFrameTooLongs", if_index, value)?)
        }
        16 => {
            interface.dot3_stats_internal_mac_receive_errors =
                Some(counter("dot3StatsInternalMacReceiveErrors", if_index, value)?)
        }
        _ => {}
    }
    Ok(())
}

fn apply_dot3_hc_stats_column(
    interface: &mut Interface,
    column: u32,
    if_index: u64,
    value: &SnmpValue,
    _high_speed: &mut BTreeMap<u64, u64>,
) -> DeviceResult<()> {
    if column == 3 {
        interface.dot3_hc_stats_fcs_errors =
            Some(counter("dot3HCStatsFCSErrors", if_index, value)?);
    }
    Ok(())
}

fn apply_ether_stats_column(
    interface: &mut Interface,
    column: u32,
    if_index: u64,
    value: &SnmpValue,
    _high_speed: &mut BTreeMap<u64, u64>,
) -> DeviceResult<()> {
    if column == 8 {
        interface.ether_stats_crc_align_errors =
            Some(counter("etherStatsCRCAlignErrors", if_index, value)?);
    }
    Ok(())
}

/// IANAifType numbers for the types the filter layer matches on.
static IANA_IF_TYPES: Lazy<HashMap<u64, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (1, "other"),
        (6, "ethernetCsmacd"),
        (23, "ppp"),
        (24, "softwareLoopback"),
        (32, "frameRelay"),
        (53, "propVirtual"),
        (71, "ieee80211"),
        (117, "gigabitEthernet"),
        (131, "tunnel"),
        (135, "l2vlan"),
        (136, "l3ipvlan"),
        (150, "mplsTunnel"),
        (161, "ieee8023adLag"),
        (166, "mpls"),
        (188, "radioMAC"),
        (194, "atmVciEndPt"),
        (209, "bridge"),
    ])
});

/// Unassigned numbers render decimally so the record stays filterable.
fn if_type_name(value: u64) -> String {
    IANA_IF_TYPES
        .get(&value)
        .map_or_else(|| value.to_string(), |name| (*name).to_string())
}
