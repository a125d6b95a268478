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

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;

use crate::network::{Oid, RequestContext, SnmpClient, SnmpError, SnmpValue, SnmpVariable};

/// Snapshot-backed SNMP agent.
///
/// Holds a `{oid: value}` table in OID order, so a walk is a range scan.
/// Snapshot fixtures are JSON objects; integers deserialize as
/// [`SnmpValue::Integer`], strings as octet strings (floats are recorded
/// as strings).
#[derive(Default)]
pub struct MockSnmpAgent {
    bindings: BTreeMap<Oid, SnmpValue>,
}

impl MockSnmpAgent {
    pub fn new() -> Self {
        MockSnmpAgent::default()
    }

    pub fn insert(&mut self, oid: Oid, value: SnmpValue) {
        self.bindings.insert(oid, value);
    }

    pub fn from_json(raw: &str) -> crate::error::Result<Self> {
        let table: BTreeMap<String, SnmpValue> = serde_json::from_str(raw)?;
        let mut agent = MockSnmpAgent::new();
        for (oid, value) in table {
            agent.insert(oid.parse::<Oid>()?, value);
        }
        Ok(agent)
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        MockSnmpAgent::from_json(&std::fs::read_to_string(path)?)
    }
}

#[async_trait]
impl SnmpClient for MockSnmpAgent {
    async fn get(&self, ctx: &RequestContext, oid: &Oid) -> Result<Vec<SnmpVariable>, SnmpError> {
        if ctx.is_cancelled() {
            return Err(SnmpError::Cancelled);
        }
        match self.bindings.get(oid) {
            Some(value) => Ok(vec![SnmpVariable {
                oid: oid.clone(),
                value: value.clone(),
            }]),
            None => Err(SnmpError::NoSuchObject(oid.to_string())),
        }
    }

    async fn walk(
        &self,
        ctx: &RequestContext,
        root: &Oid,
    ) -> Result<Vec<SnmpVariable>, SnmpError> {
        if ctx.is_cancelled() {
            return Err(SnmpError::Cancelled);
        }
        Ok(self
            .bindings
            .iter()
            .filter(|(oid, _)| oid.is_child_of(root))
            .map(|(oid, value)| SnmpVariable {
                oid: oid.clone(),
                value: value.clone(),
            })
            .collect())
    }
}
