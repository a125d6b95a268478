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

pub mod error;
pub mod ifmib;
pub mod powerone;
pub mod registry;
pub mod traits;
pub mod types;
pub mod ucd;

pub use error::{DeviceError, DeviceResult};
pub use ifmib::IfMibInterfaceReader;
pub use powerone::{PoweroneAccCommunicator, PoweronePccCommunicator};
pub use registry::{cpu_load_reader, interface_reader, ups_mains_voltage_reader};
pub use traits::{CpuLoadReader, InterfaceReader, UpsMainsVoltageReader};
pub use types::{DeviceClass, Interface, PortStatus};
