// Common error type for device adapters.

use thiserror::Error;

use crate::network::SnmpError;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no device connection available")]
    NoConnection,

    #[error("snmpget failed: {0}")]
    SnmpGet(#[source] SnmpError),

    #[error("snmpwalk failed: {0}")]
    SnmpWalk(#[source] SnmpError),

    #[error("no or more than one snmp response available")]
    UnexpectedResponseCount,

    #[error("couldn't get string value: {0}")]
    ValueString(#[source] SnmpError),

    #[error("failed to parse snmp response")]
    ParseResponse(#[source] std::num::ParseIntError),

    #[error("failed to decode {column} for interface {if_index}: {source}")]
    ColumnDecode {
        column: &'static str,
        if_index: u64,
        #[source]
        source: SnmpError,
    },

    #[error("unknown status value: {0}")]
    UnknownStatusValue(String),

    #[error("unknown device class: {0}")]
    UnknownDeviceClass(String),

    #[error("device class '{class}' does not support {capability}")]
    CapabilityNotSupported {
        class: String,
        capability: &'static str,
    },
}

pub type DeviceResult<T> = Result<T, DeviceError>;
