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

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::DeviceError;

/// Administrative or operational port status (IF-MIB enumeration).
///
/// The in-memory enum is closed and total: [`PortStatus::status_code`]
/// cannot fail. Decoding from the wire is the fallible step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortStatus {
    Up,
    Down,
    Testing,
    Unknown,
    Dormant,
    NotPresent,
    LowerLayerDown,
}

impl PortStatus {
    /// The IF-MIB enumeration value emitted as a performance data point.
    pub fn status_code(&self) -> u8 {
        match self {
            PortStatus::Up => 1,
            PortStatus::Down => 2,
            PortStatus::Testing => 3,
            PortStatus::Unknown => 4,
            PortStatus::Dormant => 5,
            PortStatus::NotPresent => 6,
            PortStatus::LowerLayerDown => 7,
        }
    }

    /// Decode the integer delivered by ifAdminStatus / ifOperStatus.
    pub fn from_wire(value: u64) -> Result<Self, DeviceError> {
        match value {
            1 => Ok(PortStatus::Up),
            2 => Ok(PortStatus::Down),
            3 => Ok(PortStatus::Testing),
            4 => Ok(PortStatus::Unknown),
            5 => Ok(PortStatus::Dormant),
            6 => Ok(PortStatus::NotPresent),
            7 => Ok(PortStatus::LowerLayerDown),
            other => Err(DeviceError::UnknownStatusValue(other.to_string())),
        }
    }
}

impl FromStr for PortStatus {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(PortStatus::Up),
            "down" => Ok(PortStatus::Down),
            "testing" => Ok(PortStatus::Testing),
            "unknown" => Ok(PortStatus::Unknown),
            "dormant" => Ok(PortStatus::Dormant),
            "notPresent" => Ok(PortStatus::NotPresent),
            "lowerLayerDown" => Ok(PortStatus::LowerLayerDown),
            other => Err(DeviceError::UnknownStatusValue(other.to_string())),
        }
    }
}

/// The device family a communicator is selected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    /// Any device answering the standard IF-MIB / EtherLike-MIB tables.
    Generic,
    /// PowerOne ACC UPS controller.
    PoweroneAcc,
    /// PowerOne PCC UPS controller.
    PoweronePcc,
}

impl FromStr for DeviceClass {
    type Err = DeviceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic" => Ok(DeviceClass::Generic),
            "powerone-acc" => Ok(DeviceClass::PoweroneAcc),
            "powerone-pcc" => Ok(DeviceClass::PoweronePcc),
            other => Err(DeviceError::UnknownDeviceClass(other.to_string())),
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceClass::Generic => "generic",
            DeviceClass::PoweroneAcc => "powerone-acc",
            DeviceClass::PoweronePcc => "powerone-pcc",
        };
        write!(f, "{name}")
    }
}

/// Normalized, vendor-independent per-interface aggregate.
///
/// Every field is optional: absent means "the device did not report it" and
/// no performance data is emitted for it. Absent is never conflated with
/// zero. Counters pair a 32-bit legacy column with a 64-bit HC column; the
/// HC value wins when both are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    // Identity
    #[serde(rename = "ifIndex", skip_serializing_if = "Option::is_none")]
    pub if_index: Option<u64>,
    #[serde(rename = "ifDescr", skip_serializing_if = "Option::is_none")]
    pub if_descr: Option<String>,
    #[serde(rename = "ifName", skip_serializing_if = "Option::is_none")]
    pub if_name: Option<String>,
    #[serde(rename = "ifAlias", skip_serializing_if = "Option::is_none")]
    pub if_alias: Option<String>,
    #[serde(rename = "ifPhysAddress", skip_serializing_if = "Option::is_none")]
    pub if_phys_address: Option<String>,
    #[serde(rename = "ifType", skip_serializing_if = "Option::is_none")]
    pub if_type: Option<String>,

    // Administrative
    #[serde(rename = "ifAdminStatus", skip_serializing_if = "Option::is_none")]
    pub if_admin_status: Option<PortStatus>,
    #[serde(rename = "ifOperStatus", skip_serializing_if = "Option::is_none")]
    pub if_oper_status: Option<PortStatus>,

    // Capacity, bits per second
    #[serde(rename = "ifSpeed", skip_serializing_if = "Option::is_none")]
    pub if_speed: Option<u64>,

    // IF-MIB counters, 32-bit legacy columns
    #[serde(rename = "ifInOctets", skip_serializing_if = "Option::is_none")]
    pub if_in_octets: Option<u64>,
    #[serde(rename = "ifOutOctets", skip_serializing_if = "Option::is_none")]
    pub if_out_octets: Option<u64>,
    #[serde(rename = "ifInUcastPkts", skip_serializing_if = "Option::is_none")]
    pub if_in_ucast_pkts: Option<u64>,
    #[serde(rename = "ifOutUcastPkts", skip_serializing_if = "Option::is_none")]
    pub if_out_ucast_pkts: Option<u64>,
    #[serde(rename = "ifInMulticastPkts", skip_serializing_if = "Option::is_none")]
    pub if_in_multicast_pkts: Option<u64>,
    #[serde(rename = "ifOutMulticastPkts", skip_serializing_if = "Option::is_none")]
    pub if_out_multicast_pkts: Option<u64>,
    #[serde(rename = "ifInBroadcastPkts", skip_serializing_if = "Option::is_none")]
    pub if_in_broadcast_pkts: Option<u64>,
    #[serde(rename = "ifOutBroadcastPkts", skip_serializing_if = "Option::is_none")]
    pub if_out_broadcast_pkts: Option<u64>,
    #[serde(rename = "ifInDiscards", skip_serializing_if = "Option::is_none")]
    pub if_in_discards: Option<u64>,
    #[serde(rename = "ifOutDiscards", skip_serializing_if = "Option::is_none")]
    pub if_out_discards: Option<u64>,
    #[serde(rename = "ifInErrors", skip_serializing_if = "Option::is_none")]
    pub if_in_errors: Option<u64>,
    #[serde(rename = "ifOutErrors", skip_serializing_if = "Option::is_none")]
    pub if_out_errors: Option<u64>,

    // IF-MIB counters, 64-bit HC columns
    #[serde(rename = "ifHCInOctets", skip_serializing_if = "Option::is_none")]
    pub if_hc_in_octets: Option<u64>,
    #[serde(rename = "ifHCOutOctets", skip_serializing_if = "Option::is_none")]
    pub if_hc_out_octets: Option<u64>,
    #[serde(rename = "ifHCInUcastPkts", skip_serializing_if = "Option::is_none")]
    pub if_hc_in_ucast_pkts: Option<u64>,
    #[serde(rename = "ifHCOutUcastPkts", skip_serializing_if = "Option::is_none")]
    pub if_hc_out_ucast_pkts: Option<u64>,
    #[serde(rename = "ifHCInMulticastPkts", skip_serializing_if = "Option::is_none")]
    pub if_hc_in_multicast_pkts: Option<u64>,
    #[serde(rename = "ifHCOutMulticastPkts", skip_serializing_if = "Option::is_none")]
    pub if_hc_out_multicast_pkts: Option<u64>,
    #[serde(rename = "ifHCInBroadcastPkts", skip_serializing_if = "Option::is_none")]
    pub if_hc_in_broadcast_pkts: Option<u64>,
    #[serde(rename = "ifHCOutBroadcastPkts", skip_serializing_if = "Option::is_none")]
    pub if_hc_out_broadcast_pkts: Option<u64>,

    // EtherLike-MIB dot3Stats columns
    #[serde(
        rename = "dot3StatsAlignmentErrors",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_alignment_errors: Option<u64>,
    #[serde(rename = "dot3StatsFCSErrors", skip_serializing_if = "Option::is_none")]
    pub dot3_stats_fcs_errors: Option<u64>,
    #[serde(
        rename = "dot3StatsSingleCollisionFrames",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_single_collision_frames: Option<u64>,
    #[serde(
        rename = "dot3StatsMultipleCollisionFrames",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_multiple_collision_frames: Option<u64>,
    #[serde(
        rename = "dot3StatsSQETestErrors",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_sqe_test_errors: Option<u64>,
    #[serde(
        rename = "dot3StatsDeferredTransmissions",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_deferred_transmissions: Option<u64>,
    #[serde(
        rename = "dot3StatsLateCollisions",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_late_collisions: Option<u64>,
    #[serde(
        rename = "dot3StatsExcessiveCollisions",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_excessive_collisions: Option<u64>,
    #[serde(
        rename = "dot3StatsInternalMacTransmitErrors",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_internal_mac_transmit_errors: Option<u64>,
    #[serde(
        rename = "dot3StatsCarrierSenseErrors",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_carrier_sense_errors: Option<u64>,
    #[serde(
        rename = "dot3StatsFrameTooLongs",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_frame_too_longs: Option<u64>,
    #[serde(
        rename = "dot3StatsInternalMacReceiveErrors",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_stats_internal_mac_receive_errors: Option<u64>,
    #[serde(
        rename = "dot3HCStatsFCSErrors",
        skip_serializing_if = "Option::is_none"
    )]
    pub dot3_hc_stats_fcs_errors: Option<u64>,
    #[serde(
        rename = "etherStatsCRCAlignErrors",
        skip_serializing_if = "Option::is_none"
    )]
    pub ether_stats_crc_align_errors: Option<u64>,

    // Radio interfaces
    #[serde(rename = "levelIn", skip_serializing_if = "Option::is_none")]
    pub level_in: Option<f64>,
    #[serde(rename = "levelOut", skip_serializing_if = "Option::is_none")]
    pub level_out: Option<f64>,
    #[serde(rename = "maxbitrateIn", skip_serializing_if = "Option::is_none")]
    pub maxbitrate_in: Option<u64>,
    #[serde(rename = "maxbitrateOut", skip_serializing_if = "Option::is_none")]
    pub maxbitrate_out: Option<u64>,

    // DWDM optics
    #[serde(rename = "rxLevel", skip_serializing_if = "Option::is_none")]
    pub rx_level: Option<f64>,
    #[serde(rename = "txLevel", skip_serializing_if = "Option::is_none")]
    pub tx_level: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_ifmib_enumeration() {
        assert_eq!(PortStatus::Up.status_code(), 1);
        assert_eq!(PortStatus::Down.status_code(), 2);
        assert_eq!(PortStatus::Testing.status_code(), 3);
        assert_eq!(PortStatus::Unknown.status_code(), 4);
        assert_eq!(PortStatus::Dormant.status_code(), 5);
        assert_eq!(PortStatus::NotPresent.status_code(), 6);
        assert_eq!(PortStatus::LowerLayerDown.status_code(), 7);
    }

    #[test]
    fn test_status_wire_decode() {
        assert_eq!(PortStatus::from_wire(1).unwrap(), PortStatus::Up);
        assert_eq!(PortStatus::from_wire(7).unwrap(), PortStatus::LowerLayerDown);
        assert!(PortStatus::from_wire(0).is_err());
        assert!(PortStatus::from_wire(8).is_err());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("up".parse::<PortStatus>().unwrap(), PortStatus::Up);
        assert_eq!(
            "lowerLayerDown".parse::<PortStatus>().unwrap(),
            PortStatus::LowerLayerDown
        );
        assert!("flapping".parse::<PortStatus>().is_err());
    }

    #[test]
    fn test_interface_serde_field_names() {
        let interface = Interface {
            if_index: Some(3),
            if_descr: Some("Gi0/3".to_string()),
            if_hc_in_octets: Some(1_000_000),
            ..Default::default()
        };
        let json = serde_json::to_value(&interface).unwrap();
        assert_eq!(json["ifIndex"], 3);
        assert_eq!(json["ifDescr"], "Gi0/3");
        assert_eq!(json["ifHCInOctets"], 1_000_000);
        // absent fields stay absent
        assert!(json.get("ifInOctets").is_none());
    }

    #[test]
    fn test_device_class_round_trip() {
        for class in [
            DeviceClass::Generic,
            DeviceClass::PoweroneAcc,
            DeviceClass::PoweronePcc,
        ] {
            assert_eq!(class.to_string().parse::<DeviceClass>().unwrap(), class);
        }
        assert!("powerone".parse::<DeviceClass>().is_err());
    }
}
