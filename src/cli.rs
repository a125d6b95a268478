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

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a monitoring check against a device and print the plugin output.
    #[command(subcommand)]
    Check(CheckCommands),
}

#[derive(Subcommand)]
pub enum CheckCommands {
    /// Check interface metrics (IF-MIB, EtherLike-MIB, radio, DWDM).
    InterfaceMetrics(InterfaceMetricsArgs),
    /// Check whether mains voltage is applied to a UPS.
    UpsMainsVoltage(DeviceArgs),
    /// Check per-core CPU load.
    CpuLoad(DeviceArgs),
}

#[derive(Args, Clone)]
pub struct DeviceArgs {
    /// Host name of the device, used in log output.
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Device class selecting the communicator: generic, powerone-acc, powerone-pcc.
    #[arg(long, default_value = "generic")]
    pub device_class: String,

    /// Recorded SNMP snapshot to run against (JSON object of oid: value).
    /// Live transports are provided by the enclosing dispatcher.
    #[arg(long)]
    pub snapshot: PathBuf,
}

#[derive(Args, Clone)]
pub struct InterfaceMetricsArgs {
    #[command(flatten)]
    pub device: DeviceArgs,

    /// ifType values to exclude. May be given multiple times.
    #[arg(long)]
    pub filter: Vec<String>,

    /// Attach a compact identity view of all interfaces as the OK message.
    #[arg(long)]
    pub print_interfaces: bool,
}
