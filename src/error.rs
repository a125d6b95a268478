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

//! Unified error types for the ifsentry library.
//!
//! Each layer carries its own error enum (`SnmpError`, `DeviceError`,
//! `CheckError`, `MonitoringError`); this module aggregates them into one
//! `Error` for library users.
//!
//! # Example
//!
//! ```rust,no_run
//! use ifsentry::error::Result;
//! use ifsentry::network::Oid;
//!
//! fn parse(raw: &str) -> Result<Oid> {
//!     Ok(raw.parse()?)
//! }
//! ```

use thiserror::Error;

use crate::check::CheckError;
use crate::device::DeviceError;
use crate::monitoring::MonitoringError;
use crate::network::SnmpError;

/// The main error type for ifsentry library operations.
#[derive(Debug, Error)]
pub enum Error {
    /// SNMP value model or transport error.
    #[error(transparent)]
    Snmp(#[from] SnmpError),

    /// Device adapter error (connection missing, probe failed, bad data).
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Check pipeline error (invalid interface identity, label collision).
    #[error(transparent)]
    Check(#[from] CheckError),

    /// Monitoring accumulator error (duplicate label, invalid point).
    #[error(transparent)]
    Monitoring(#[from] MonitoringError),

    /// Serialisation of a check output view failed.
    #[error("serialisation failed: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// An I/O error occurred (fixture loading, output).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for ifsentry operations.
pub type Result<T> = std::result::Result<T, Error>;
