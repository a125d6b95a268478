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

//! Monitoring-plugin check result accumulator.
//!
//! Collects a status level, a status message and labelled performance data
//! points for one check, then yields an immutable snapshot. The status only
//! moves toward more severe levels; duplicate (name, label) pairs are
//! rejected at insertion so the emitted perfdata stays valid for the plugin
//! protocol.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitoringError {
    #[error("performance data point with name '{name}' and label '{label}' already exists")]
    DuplicatePoint { name: String, label: String },

    #[error("performance data point name contains invalid characters: {0}")]
    InvalidName(String),

    #[error("performance data point unit contains invalid characters: {0}")]
    InvalidUnit(String),
}

/// Monitoring-plugin status level. Ordering is severity: the accumulator
/// keeps the worst level it has seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    pub fn exit_code(&self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        };
        write!(f, "{label}")
    }
}

/// A performance data value. Counters stay unsigned; status codes are
/// signed; radio levels are floats.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PerfValue {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl fmt::Display for PerfValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerfValue::Unsigned(v) => write!(f, "{v}"),
            PerfValue::Signed(v) => write!(f, "{v}"),
            PerfValue::Float(v) => write!(f, "{v}"),
        }
    }
}

impl From<u64> for PerfValue {
    fn from(value: u64) -> Self {
        PerfValue::Unsigned(value)
    }
}

impl From<u8> for PerfValue {
    fn from(value: u8) -> Self {
        PerfValue::Unsigned(u64::from(value))
    }
}

impl From<i64> for PerfValue {
    fn from(value: i64) -> Self {
        PerfValue::Signed(value)
    }
}

impl From<f64> for PerfValue {
    fn from(value: f64) -> Self {
        PerfValue::Float(value)
    }
}

/// One `(name, value, unit, label)` tuple of the plugin perfdata stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceDataPoint {
    pub name: String,
    pub value: PerfValue,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PerformanceDataPoint {
    pub fn new(name: &str, value: impl Into<PerfValue>, unit: &str) -> Self {
        PerformanceDataPoint {
            name: name.to_string(),
            value: value.into(),
            unit: unit.to_string(),
            label: None,
        }
    }

    /// Tag the point with the entity it belongs to (e.g. an ifDescr).
    pub fn with_label(mut self, tag: &str) -> Self {
        self.label = Some(tag.to_string());
        self
    }

    fn validate(&self) -> Result<(), MonitoringError> {
        if self.name.is_empty() || self.name.contains(['=', '\'']) {
            return Err(MonitoringError::InvalidName(self.name.clone()));
        }
        if self.unit.contains(|c: char| c.is_ascii_digit() || "';=".contains(c)) {
            return Err(MonitoringError::InvalidUnit(self.unit.clone()));
        }
        Ok(())
    }

    /// Perfdata key: the metric name, suffixed with the label tag so points
    /// of different interfaces stay distinct.
    fn key(&self) -> String {
        match &self.label {
            Some(tag) => format!("{}_{tag}", self.name),
            None => self.name.clone(),
        }
    }
}

/// Immutable snapshot of an accumulator, returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInfo {
    pub status: Status,
    pub message: String,
    pub performance_data: Vec<PerformanceDataPoint>,
}

impl CheckInfo {
    /// Single-line plugin output: `STATUS: message | 'key'=valueunit ...`.
    pub fn render(&self) -> String {
        let mut out = format!("{}: {}", self.status, self.message);
        if !self.performance_data.is_empty() {
            out.push_str(" |");
            for point in &self.performance_data {
                out.push_str(&format!(" '{}'={}{}", point.key(), point.value, point.unit));
            }
        }
        out
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }
}

/// Request-owned check result accumulator.
pub struct CheckResult {
    status: Status,
    message: String,
    default_message: String,
    performance_data: Vec<PerformanceDataPoint>,
    seen: HashSet<(String, String)>,
    print_performance_data: bool,
}

impl CheckResult {
    pub fn new(default_message: &str) -> Self {
        CheckResult {
            status: Status::Ok,
            message: String::new(),
            default_message: default_message.to_string(),
            performance_data: Vec::new(),
            seen: HashSet::new(),
            print_performance_data: true,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Record a status observation. The level only escalates; the message
    /// follows the level that set it, and observations at the current level
    /// append.
    pub fn update_status(&mut self, status: Status, message: &str) {
        if status > self.status {
            self.status = status;
            if !message.is_empty() {
                self.message = message.to_string();
            }
        } else if status == self.status && !message.is_empty() {
            if self.message.is_empty() {
                self.message = message.to_string();
            } else {
                self.message.push('\n');
                self.message.push_str(message);
            }
        }
    }

    /// Record an error as a status observation with a context prefix.
    pub fn update_status_on_error(&mut self, err: &dyn fmt::Display, status: Status, prefix: &str) {
        self.update_status(status, &format!("{prefix}: {err}"));
    }

    /// Accept one performance data point. Duplicate (name, label) pairs and
    /// malformed names or units are rejected.
    pub fn add_performance_data_point(
        &mut self,
        point: PerformanceDataPoint,
    ) -> Result<(), MonitoringError> {
        point.validate()?;
        let key = (
            point.name.clone(),
            point.label.clone().unwrap_or_default(),
        );
        if !self.seen.insert(key) {
            return Err(MonitoringError::DuplicatePoint {
                name: point.name,
                label: point.label.unwrap_or_default(),
            });
        }
        self.performance_data.push(point);
        Ok(())
    }

    /// Drop performance data from all future snapshots. Points already
    /// accepted stay recorded but are no longer emitted.
    pub fn suppress_performance_data(&mut self) {
        self.print_performance_data = false;
    }

    /// Snapshot the accumulator.
    pub fn get_info(&self) -> CheckInfo {
        CheckInfo {
            status: self.status,
            message: if self.message.is_empty() {
                self.default_message.clone()
            } else {
                self.message.clone()
            },
            performance_data: if self.print_performance_data {
                self.performance_data.clone()
            } else {
                Vec::new()
            },
        }
    }
}
