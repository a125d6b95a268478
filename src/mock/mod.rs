//! Mock SNMP agent module for ifsentry
//!
//! This module provides a snapshot-backed agent that answers GET and walk
//! requests from a recorded `{oid: value}` table. The integration tests and
//! the CLI `--snapshot` mode run the full check pipeline against it.

pub mod agent;

pub use agent::MockSnmpAgent;
