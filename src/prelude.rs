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

//! The ifsentry prelude.
//!
//! This module provides convenient re-exports of commonly used types
//! for library users. Import everything with:
//!
//! ```rust
//! use ifsentry::prelude::*;
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use ifsentry::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let agent = MockSnmpAgent::from_file("walk.json".as_ref()).unwrap();
//!     let ctx = RequestContext::new()
//!         .with_connection(DeviceConnection::with_snmp(Arc::new(agent)));
//!
//!     let request = CheckInterfaceMetricsRequest {
//!         base: BaseRequest {
//!             host: "switch-01".to_string(),
//!             device_class: DeviceClass::Generic,
//!         },
//!         filter: Vec::new(),
//!         print_interfaces: false,
//!     };
//!     let mut mon = CheckResult::new("checked interface metrics");
//!     let response = request.process(&ctx, &mut mon).await;
//!     println!("{}", response.render());
//! }
//! ```

// Check drivers
pub use crate::check::{
    BaseRequest, CheckCpuLoadRequest, CheckError, CheckInterfaceMetricsRequest, CheckResponse,
    CheckUpsRequest,
};

// Error types
pub use crate::error::{Error, Result};

// Core data types - interfaces and devices
pub use crate::device::{DeviceClass, DeviceError, Interface, PortStatus};

// Capability traits
pub use crate::device::{CpuLoadReader, InterfaceReader, UpsMainsVoltageReader};

// Monitoring accumulator
pub use crate::monitoring::{
    CheckInfo, CheckResult, MonitoringError, PerfValue, PerformanceDataPoint, Status,
};

// Connection plumbing
pub use crate::network::{
    DeviceConnection, Oid, RequestContext, SnmpClient, SnmpError, SnmpValue, SnmpVariable,
};

// Snapshot-backed agent
pub use crate::mock::MockSnmpAgent;
