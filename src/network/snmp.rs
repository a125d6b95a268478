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

//! SNMP value model and client abstraction.
//!
//! The engine never speaks the SNMP wire protocol itself; it consumes a
//! [`SnmpClient`] provided by the surrounding request (a transport pool in
//! production, a snapshot-backed agent in tests and the CLI snapshot mode).

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::RequestContext;

/// Errors produced by the SNMP value model and client implementations.
#[derive(Debug, Error)]
pub enum SnmpError {
    #[error("invalid oid: {0}")]
    InvalidOid(String),

    #[error("no such object: {0}")]
    NoSuchObject(String),

    #[error("response value is null")]
    NullValue,

    #[error("response value is not numeric")]
    NotNumeric,

    #[error("snmp request cancelled")]
    Cancelled,

    #[error("snmp transport error: {0}")]
    Transport(String),
}

/// A dotted-decimal object identifier.
///
/// Stored as sub-identifier components so that subtree membership and
/// lexicographic walk order work on numbers, not strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Oid(Vec<u32>);

impl Oid {
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Whether `self` lies in the subtree rooted at `prefix`.
    pub fn is_child_of(&self, prefix: &Oid) -> bool {
        self.0.len() > prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// The instance part of a column OID: the components after `prefix`.
    pub fn instance_after(&self, prefix: &Oid) -> Option<&[u32]> {
        if self.is_child_of(prefix) {
            Some(&self.0[prefix.0.len()..])
        } else {
            None
        }
    }
}

impl FromStr for Oid {
    type Err = SnmpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Err(SnmpError::InvalidOid(s.to_string()));
        }
        let components = trimmed
            .split('.')
            .map(|part| part.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| SnmpError::InvalidOid(s.to_string()))?;
        Ok(Oid(components))
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.0 {
            if first {
                write!(f, "{component}")?;
                first = false;
            } else {
                write!(f, ".{component}")?;
            }
        }
        Ok(())
    }
}

/// A decoded SNMP value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnmpValue {
    Integer(i64),
    Counter32(u32),
    Counter64(u64),
    Gauge32(u32),
    OctetString(String),
    Null,
}

impl SnmpValue {
    /// String rendering of the value, as delivered to integer parsers and
    /// free-text fields. Null carries no value and fails.
    pub fn as_string(&self) -> Result<String, SnmpError> {
        match self {
            SnmpValue::Integer(v) => Ok(v.to_string()),
            SnmpValue::Counter32(v) => Ok(v.to_string()),
            SnmpValue::Counter64(v) => Ok(v.to_string()),
            SnmpValue::Gauge32(v) => Ok(v.to_string()),
            SnmpValue::OctetString(s) => Ok(s.clone()),
            SnmpValue::Null => Err(SnmpError::NullValue),
        }
    }

    /// Unsigned numeric rendering; octet strings are parsed decimally.
    pub fn as_u64(&self) -> Result<u64, SnmpError> {
        match self {
            SnmpValue::Integer(v) => u64::try_from(*v).map_err(|_| SnmpError::NotNumeric),
            SnmpValue::Counter32(v) => Ok(u64::from(*v)),
            SnmpValue::Counter64(v) => Ok(*v),
            SnmpValue::Gauge32(v) => Ok(u64::from(*v)),
            SnmpValue::OctetString(s) => s.trim().parse().map_err(|_| SnmpError::NotNumeric),
            SnmpValue::Null => Err(SnmpError::NullValue),
        }
    }

    /// Float rendering; used for radio levels and load averages.
    pub fn as_f64(&self) -> Result<f64, SnmpError> {
        match self {
            SnmpValue::Integer(v) => Ok(*v as f64),
            SnmpValue::Counter32(v) => Ok(f64::from(*v)),
            SnmpValue::Counter64(v) => Ok(*v as f64),
            SnmpValue::Gauge32(v) => Ok(f64::from(*v)),
            SnmpValue::OctetString(s) => s.trim().parse().map_err(|_| SnmpError::NotNumeric),
            SnmpValue::Null => Err(SnmpError::NullValue),
        }
    }
}

/// One `(OID, value)` binding of a GET or walk response.
#[derive(Debug, Clone, PartialEq)]
pub struct SnmpVariable {
    pub oid: Oid,
    pub value: SnmpValue,
}

/// Read access to one SNMP agent.
///
/// Implementations must honor the request context's cancellation token and
/// fail in-flight calls with [`SnmpError::Cancelled`] once it is tripped.
#[async_trait]
pub trait SnmpClient: Send + Sync {
    /// Single GET of one OID. Returns the response bindings.
    async fn get(&self, ctx: &RequestContext, oid: &Oid) -> Result<Vec<SnmpVariable>, SnmpError>;

    /// Subtree walk below `root`, bindings in ascending OID order.
    async fn walk(&self, ctx: &RequestContext, root: &Oid)
        -> Result<Vec<SnmpVariable>, SnmpError>;
}
