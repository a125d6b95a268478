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

//! Communicator registry.
//!
//! Maps a [`DeviceClass`] to the adapter implementing each capability.
//! `None` means the class does not carry the capability; callers turn that
//! into a capability error with the class name attached.

use crate::device::ifmib::IfMibInterfaceReader;
use crate::device::powerone::{PoweroneAccCommunicator, PoweronePccCommunicator};
use crate::device::ucd::UcdCpuLoadReader;
use crate::device::{CpuLoadReader, DeviceClass, InterfaceReader, UpsMainsVoltageReader};

pub fn interface_reader(class: DeviceClass) -> Option<Box<dyn InterfaceReader>> {
    match class {
        DeviceClass::Generic => Some(Box::new(IfMibInterfaceReader)),
        // The PowerOne controllers answer ifTable like any MIB-2 agent.
        DeviceClass::PoweroneAcc | DeviceClass::PoweronePcc => {
            Some(Box::new(IfMibInterfaceReader))
        }
    }
}

pub fn ups_mains_voltage_reader(class: DeviceClass) -> Option<Box<dyn UpsMainsVoltageReader>> {
    match class {
        DeviceClass::PoweroneAcc => Some(Box::new(PoweroneAccCommunicator)),
        DeviceClass::PoweronePcc => Some(Box::new(PoweronePccCommunicator)),
        DeviceClass::Generic => None,
    }
}

pub fn cpu_load_reader(class: DeviceClass) -> Option<Box<dyn CpuLoadReader>> {
    match class {
        DeviceClass::Generic => Some(Box::new(UcdCpuLoadReader)),
        DeviceClass::PoweroneAcc | DeviceClass::PoweronePcc => None,
    }
}
