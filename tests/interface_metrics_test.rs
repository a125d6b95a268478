use std::io::Write;
use std::sync::Arc;

use ifsentry::check::interface_metrics::add_interface_performance_data;
use ifsentry::check::{BaseRequest, CheckInterfaceMetricsRequest};
use ifsentry::device::{DeviceClass, Interface};
use ifsentry::mock::MockSnmpAgent;
use ifsentry::monitoring::{CheckResult, PerfValue, Status};
use ifsentry::network::{DeviceConnection, RequestContext, SnmpValue};
use tokio_util::sync::CancellationToken;

fn agent_with(bindings: &[(&str, SnmpValue)]) -> MockSnmpAgent {
    let mut agent = MockSnmpAgent::new();
    for (oid, value) in bindings {
        agent.insert(oid.parse().unwrap(), value.clone());
    }
    agent
}

fn ctx_with(agent: MockSnmpAgent) -> RequestContext {
    RequestContext::new().with_connection(DeviceConnection::with_snmp(Arc::new(agent)))
}

fn request(filter: &[&str], print_interfaces: bool) -> CheckInterfaceMetricsRequest {
    CheckInterfaceMetricsRequest {
        base: BaseRequest {
            host: "switch-01".to_string(),
            device_class: DeviceClass::Generic,
        },
        filter: filter.iter().map(|f| f.to_string()).collect(),
        print_interfaces,
    }
}

/// Two interfaces: Gi0/1 carries both the HC and the 32-bit octet counter,
/// Gi0/2 only the 32-bit one. The HC value must win and the 32-bit value
/// must not appear under the same metric name.
#[test]
fn test_projection_mixed_counter_widths() {
    let mut interfaces = vec![
        Interface {
            if_index: Some(1),
            if_descr: Some("Gi0/1".to_string()),
            if_hc_in_octets: Some(1000),
            if_in_octets: Some(500),
            ..Default::default()
        },
        Interface {
            if_index: Some(2),
            if_descr: Some("Gi0/2".to_string()),
            if_in_octets: Some(250),
            ..Default::default()
        },
    ];
    let mut mon = CheckResult::new("");
    add_interface_performance_data(&mut interfaces, &mut mon).unwrap();

    let points = mon.get_info().performance_data;
    let traffic: Vec<(PerfValue, String)> = points
        .iter()
        .filter(|p| p.name == "traffic_counter_in")
        .map(|p| (p.value, p.label.clone().unwrap()))
        .collect();
    assert_eq!(
        traffic,
        [
            (PerfValue::Unsigned(1000), "Gi0/1".to_string()),
            (PerfValue::Unsigned(250), "Gi0/2".to_string()),
        ]
    );
}

#[test]
fn test_duplicate_descriptions_get_index_suffix() {
    let mut interfaces = vec![
        Interface {
            if_index: Some(7),
            if_descr: Some("eth0".to_string()),
            if_in_errors: Some(1),
            ..Default::default()
        },
        Interface {
            if_index: Some(8),
            if_descr: Some("eth0".to_string()),
            if_in_errors: Some(2),
            ..Default::default()
        },
    ];
    let mut mon = CheckResult::new("");
    add_interface_performance_data(&mut interfaces, &mut mon).unwrap();

    let labels: Vec<String> = mon
        .get_info()
        .performance_data
        .iter()
        .map(|p| p.label.clone().unwrap())
        .collect();
    assert_eq!(labels, ["eth0 7", "eth0 8"]);
}

#[test]
fn test_missing_description_falls_back_to_index() {
    let mut interfaces = vec![Interface {
        if_index: Some(42),
        if_in_errors: Some(3),
        ..Default::default()
    }];
    let mut mon = CheckResult::new("");
    add_interface_performance_data(&mut interfaces, &mut mon).unwrap();

    let points = mon.get_info().performance_data;
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].name, "error_counter_in");
    assert_eq!(points[0].value, PerfValue::Unsigned(3));
    assert_eq!(points[0].unit, "c");
    assert_eq!(points[0].label.as_deref(), Some("42"));
}

/// Colliding descriptions without an ifIndex abort the check; the driver
/// turns that into UNKNOWN with suppressed performance data.
#[test]
fn test_duplicate_description_without_index_aborts() {
    let mut interfaces = vec![
        Interface {
            if_descr: Some("x".to_string()),
            if_in_errors: Some(1),
            ..Default::default()
        },
        Interface {
            if_descr: Some("x".to_string()),
            ..Default::default()
        },
    ];
    let mut mon = CheckResult::new("");
    let err = add_interface_performance_data(&mut interfaces, &mut mon).unwrap_err();

    mon.update_status_on_error(&err, Status::Unknown, "error while adding performance data");
    mon.suppress_performance_data();

    let info = mon.get_info();
    assert_eq!(info.status, Status::Unknown);
    assert!(info.performance_data.is_empty());
    assert_eq!(
        info.message,
        "error while adding performance data: interface does not have an ifIndex, but ifDescr is a duplicate"
    );
}

#[test]
fn test_projection_is_idempotent_on_reconciled_input() {
    let make = || {
        vec![Interface {
            if_index: Some(1),
            if_descr: Some("Gi0/1".to_string()),
            if_hc_in_octets: Some(10),
            if_out_errors: Some(2),
            ..Default::default()
        }]
    };

    let mut first = make();
    let mut mon_first = CheckResult::new("");
    add_interface_performance_data(&mut first, &mut mon_first).unwrap();

    // same input again, fresh accumulator
    let mut second = make();
    let mut mon_second = CheckResult::new("");
    add_interface_performance_data(&mut second, &mut mon_second).unwrap();

    assert_eq!(
        mon_first.get_info().performance_data,
        mon_second.get_info().performance_data
    );
}

fn switch_snapshot() -> MockSnmpAgent {
    agent_with(&[
        // ifTable
        ("1.3.6.1.2.1.2.2.1.2.1", SnmpValue::OctetString("Gi0/1".into())),
        ("1.3.6.1.2.1.2.2.1.2.2", SnmpValue::OctetString("Gi0/2".into())),
        ("1.3.6.1.2.1.2.2.1.3.1", SnmpValue::Integer(6)),
        ("1.3.6.1.2.1.2.2.1.3.2", SnmpValue::Integer(24)),
        ("1.3.6.1.2.1.2.2.1.5.1", SnmpValue::Gauge32(1_000_000_000)),
        ("1.3.6.1.2.1.2.2.1.7.1", SnmpValue::Integer(1)),
        ("1.3.6.1.2.1.2.2.1.8.1", SnmpValue::Integer(2)),
        ("1.3.6.1.2.1.2.2.1.10.1", SnmpValue::Counter32(500)),
        ("1.3.6.1.2.1.2.2.1.14.2", SnmpValue::Counter32(3)),
        // ifXTable
        ("1.3.6.1.2.1.31.1.1.1.1.1", SnmpValue::OctetString("Gi0/1".into())),
        ("1.3.6.1.2.1.31.1.1.1.6.1", SnmpValue::Counter64(1000)),
        // dot3StatsTable
        ("1.3.6.1.2.1.10.7.2.1.3.1", SnmpValue::Counter32(7)),
    ])
}

#[tokio::test]
async fn test_process_happy_path() {
    let ctx = ctx_with(switch_snapshot());
    let mut mon = CheckResult::new("checked interface metrics");
    let response = request(&[], false).process(&ctx, &mut mon).await;

    assert_eq!(response.info.status, Status::Ok);
    assert_eq!(response.info.message, "checked interface metrics");

    let points = &response.info.performance_data;
    let find = |name: &str, label: &str| {
        points
            .iter()
            .find(|p| p.name == name && p.label.as_deref() == Some(label))
    };

    // HC wins over the 32-bit octet counter
    assert_eq!(
        find("traffic_counter_in", "Gi0/1").unwrap().value,
        PerfValue::Unsigned(1000)
    );
    assert_eq!(
        find("interface_admin_status", "Gi0/1").unwrap().value,
        PerfValue::Unsigned(1)
    );
    assert_eq!(
        find("interface_oper_status", "Gi0/1").unwrap().value,
        PerfValue::Unsigned(2)
    );
    assert_eq!(
        find("interface_maxspeed_out", "Gi0/1").unwrap().value,
        PerfValue::Unsigned(1_000_000_000)
    );
    assert_eq!(
        find("error_counter_FCSErrors", "Gi0/1").unwrap().value,
        PerfValue::Unsigned(7)
    );
    assert_eq!(
        find("error_counter_in", "Gi0/2").unwrap().value,
        PerfValue::Unsigned(3)
    );

    // no duplicate (name, label) pairs in the emitted stream
    let mut keys: Vec<(String, String)> = points
        .iter()
        .map(|p| (p.name.clone(), p.label.clone().unwrap_or_default()))
        .collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total);
}

#[tokio::test]
async fn test_process_filter_excludes_type() {
    let ctx = ctx_with(switch_snapshot());
    let mut mon = CheckResult::new("checked interface metrics");
    let response = request(&["ethernetCsmacd"], false).process(&ctx, &mut mon).await;

    // Gi0/1 (ethernetCsmacd) is gone, the loopback survives
    assert!(response
        .info
        .performance_data
        .iter()
        .all(|p| p.label.as_deref() == Some("Gi0/2")));
    assert!(!response.info.performance_data.is_empty());
}

#[tokio::test]
async fn test_process_print_interfaces_message() {
    let ctx = ctx_with(switch_snapshot());
    let mut mon = CheckResult::new("checked interface metrics");
    let response = request(&[], true).process(&ctx, &mut mon).await;

    assert_eq!(response.info.status, Status::Ok);
    let views: serde_json::Value = serde_json::from_str(&response.info.message).unwrap();
    assert_eq!(views[0]["ifIndex"], "1");
    assert_eq!(views[0]["ifDescr"], "Gi0/1");
    assert_eq!(views[0]["ifName"], "Gi0/1");
    // absent fields render as empty strings
    assert_eq!(views[0]["ifAlias"], "");
    assert_eq!(views[1]["ifName"], "");
}

#[tokio::test]
async fn test_process_duplicate_descriptions_end_to_end() {
    let agent = agent_with(&[
        ("1.3.6.1.2.1.2.2.1.2.1", SnmpValue::OctetString("eth0".into())),
        ("1.3.6.1.2.1.2.2.1.2.2", SnmpValue::OctetString("eth0".into())),
        ("1.3.6.1.2.1.2.2.1.14.1", SnmpValue::Counter32(1)),
        ("1.3.6.1.2.1.2.2.1.14.2", SnmpValue::Counter32(2)),
    ]);
    let ctx = ctx_with(agent);
    let mut mon = CheckResult::new("checked interface metrics");
    let response = request(&[], false).process(&ctx, &mut mon).await;

    assert_eq!(response.info.status, Status::Ok);
    let labels: Vec<String> = response
        .info
        .performance_data
        .iter()
        .map(|p| p.label.clone().unwrap())
        .collect();
    assert_eq!(labels, ["eth0 1", "eth0 2"]);
}

#[tokio::test]
async fn test_process_without_connection_is_unknown() {
    let ctx = RequestContext::new();
    let mut mon = CheckResult::new("checked interface metrics");
    let response = request(&[], false).process(&ctx, &mut mon).await;

    assert_eq!(response.info.status, Status::Unknown);
    assert!(response.info.performance_data.is_empty());
    assert!(response
        .info
        .message
        .starts_with("error while processing read interfaces request"));
    assert_eq!(response.exit_code(), 3);
}

#[tokio::test]
async fn test_process_cancelled_request_is_unknown() {
    let token = CancellationToken::new();
    token.cancel();
    let ctx = ctx_with(switch_snapshot()).with_cancellation(token);

    let mut mon = CheckResult::new("checked interface metrics");
    let response = request(&[], false).process(&ctx, &mut mon).await;

    assert_eq!(response.info.status, Status::Unknown);
    assert!(response.info.performance_data.is_empty());
}

#[tokio::test]
async fn test_process_empty_device() {
    let ctx = ctx_with(MockSnmpAgent::new());
    let mut mon = CheckResult::new("checked interface metrics");
    let response = request(&[], false).process(&ctx, &mut mon).await;

    assert_eq!(response.info.status, Status::Ok);
    assert!(response.info.performance_data.is_empty());
}

#[tokio::test]
async fn test_process_print_interfaces_empty_device() {
    let ctx = ctx_with(MockSnmpAgent::new());
    let mut mon = CheckResult::new("checked interface metrics");
    let response = request(&[], true).process(&ctx, &mut mon).await;

    assert_eq!(response.info.status, Status::Ok);
    assert_eq!(response.info.message, "[]");
}

#[tokio::test]
async fn test_snapshot_fixture_file_round_trip() {
    let mut fixture = tempfile::NamedTempFile::new().unwrap();
    fixture
        .write_all(
            br#"{
                "1.3.6.1.2.1.2.2.1.2.1": "lo0",
                "1.3.6.1.2.1.2.2.1.10.1": 1500
            }"#,
        )
        .unwrap();

    let agent = MockSnmpAgent::from_file(fixture.path()).unwrap();
    let ctx = ctx_with(agent);
    let mut mon = CheckResult::new("checked interface metrics");
    let response = request(&[], false).process(&ctx, &mut mon).await;

    assert_eq!(response.info.status, Status::Ok);
    assert_eq!(response.info.performance_data.len(), 1);
    assert_eq!(response.info.performance_data[0].name, "traffic_counter_in");
    assert_eq!(
        response.info.performance_data[0].label.as_deref(),
        Some("lo0")
    );
}
