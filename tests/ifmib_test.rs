use std::sync::Arc;

use ifsentry::check::{BaseRequest, CheckCpuLoadRequest};
use ifsentry::device::{
    DeviceClass, DeviceError, IfMibInterfaceReader, InterfaceReader, PortStatus,
};
use ifsentry::mock::MockSnmpAgent;
use ifsentry::monitoring::{CheckResult, PerfValue, Status};
use ifsentry::network::{DeviceConnection, RequestContext, SnmpValue};

fn ctx_with(bindings: &[(&str, SnmpValue)]) -> RequestContext {
    let mut agent = MockSnmpAgent::new();
    for (oid, value) in bindings {
        agent.insert(oid.parse().unwrap(), value.clone());
    }
    RequestContext::new().with_connection(DeviceConnection::with_snmp(Arc::new(agent)))
}

#[tokio::test]
async fn test_reader_merges_tables_by_index() {
    let ctx = ctx_with(&[
        ("1.3.6.1.2.1.2.2.1.2.3", SnmpValue::OctetString("Fa0/3".into())),
        ("1.3.6.1.2.1.2.2.1.3.3", SnmpValue::Integer(6)),
        ("1.3.6.1.2.1.2.2.1.7.3", SnmpValue::Integer(1)),
        ("1.3.6.1.2.1.2.2.1.8.3", SnmpValue::Integer(7)),
        ("1.3.6.1.2.1.2.2.1.13.3", SnmpValue::Counter32(11)),
        ("1.3.6.1.2.1.31.1.1.1.1.3", SnmpValue::OctetString("Fa0/3".into())),
        ("1.3.6.1.2.1.31.1.1.1.18.3", SnmpValue::OctetString("uplink".into())),
        ("1.3.6.1.2.1.31.1.1.1.10.3", SnmpValue::Counter64(12345)),
        ("1.3.6.1.2.1.10.7.2.1.2.3", SnmpValue::Counter32(4)),
        ("1.3.6.1.2.1.10.7.11.1.3.3", SnmpValue::Counter64(5)),
        ("1.3.6.1.2.1.16.1.1.1.8.3", SnmpValue::Counter32(6)),
    ]);

    let interfaces = IfMibInterfaceReader.read_interfaces(&ctx).await.unwrap();
    assert_eq!(interfaces.len(), 1);

    let interface = &interfaces[0];
    assert_eq!(interface.if_index, Some(3));
    assert_eq!(interface.if_descr.as_deref(), Some("Fa0/3"));
    assert_eq!(interface.if_type.as_deref(), Some("ethernetCsmacd"));
    assert_eq!(interface.if_admin_status, Some(PortStatus::Up));
    assert_eq!(interface.if_oper_status, Some(PortStatus::LowerLayerDown));
    assert_eq!(interface.if_in_discards, Some(11));
    assert_eq!(interface.if_alias.as_deref(), Some("uplink"));
    assert_eq!(interface.if_hc_out_octets, Some(12345));
    assert_eq!(interface.dot3_stats_alignment_errors, Some(4));
    assert_eq!(interface.dot3_hc_stats_fcs_errors, Some(5));
    assert_eq!(interface.ether_stats_crc_align_errors, Some(6));
}

#[tokio::test]
async fn test_reader_orders_by_index() {
    let ctx = ctx_with(&[
        ("1.3.6.1.2.1.2.2.1.2.10", SnmpValue::OctetString("b".into())),
        ("1.3.6.1.2.1.2.2.1.2.2", SnmpValue::OctetString("a".into())),
    ]);
    let interfaces = IfMibInterfaceReader.read_interfaces(&ctx).await.unwrap();
    let indexes: Vec<u64> = interfaces.iter().map(|i| i.if_index.unwrap()).collect();
    assert_eq!(indexes, [2, 10]);
}

#[tokio::test]
async fn test_reader_resolves_overflowed_speed() {
    let ctx = ctx_with(&[
        ("1.3.6.1.2.1.2.2.1.2.1", SnmpValue::OctetString("Hu0/1".into())),
        ("1.3.6.1.2.1.2.2.1.5.1", SnmpValue::Gauge32(4_294_967_295)),
        ("1.3.6.1.2.1.31.1.1.1.15.1", SnmpValue::Gauge32(100_000)),
        // a second port under the 32-bit ceiling keeps its ifSpeed
        ("1.3.6.1.2.1.2.2.1.2.2", SnmpValue::OctetString("Gi0/2".into())),
        ("1.3.6.1.2.1.2.2.1.5.2", SnmpValue::Gauge32(1_000_000_000)),
        ("1.3.6.1.2.1.31.1.1.1.15.2", SnmpValue::Gauge32(1_000)),
    ]);
    let interfaces = IfMibInterfaceReader.read_interfaces(&ctx).await.unwrap();
    assert_eq!(interfaces[0].if_speed, Some(100_000_000_000));
    assert_eq!(interfaces[1].if_speed, Some(1_000_000_000));
}

#[tokio::test]
async fn test_reader_rejects_unknown_status_value() {
    let ctx = ctx_with(&[
        ("1.3.6.1.2.1.2.2.1.2.1", SnmpValue::OctetString("Gi0/1".into())),
        ("1.3.6.1.2.1.2.2.1.7.1", SnmpValue::Integer(9)),
    ]);
    let err = IfMibInterfaceReader.read_interfaces(&ctx).await.unwrap_err();
    assert!(matches!(err, DeviceError::UnknownStatusValue(_)));
}

#[tokio::test]
async fn test_reader_rejects_unparseable_counter() {
    let ctx = ctx_with(&[(
        "1.3.6.1.2.1.2.2.1.10.1",
        SnmpValue::OctetString("lots".into()),
    )]);
    let err = IfMibInterfaceReader.read_interfaces(&ctx).await.unwrap_err();
    assert!(matches!(err, DeviceError::ColumnDecode { .. }));
}

#[tokio::test]
async fn test_reader_without_connection() {
    let err = IfMibInterfaceReader
        .read_interfaces(&RequestContext::new())
        .await
        .unwrap_err();
    assert!(matches!(err, DeviceError::NoConnection));
}

#[tokio::test]
async fn test_check_cpu_load() {
    let ctx = ctx_with(&[
        ("1.3.6.1.4.1.2021.10.1.3.1", SnmpValue::OctetString("0.42".into())),
        ("1.3.6.1.4.1.2021.10.1.3.2", SnmpValue::OctetString("1.05".into())),
    ]);
    let request = CheckCpuLoadRequest {
        base: BaseRequest {
            host: "router-01".to_string(),
            device_class: DeviceClass::Generic,
        },
    };
    let mut mon = CheckResult::new("checked cpu load");
    let response = request.process(&ctx, &mut mon).await;

    assert_eq!(response.info.status, Status::Ok);
    let points = &response.info.performance_data;
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].name, "cpu_load");
    assert_eq!(points[0].label.as_deref(), Some("0"));
    assert_eq!(points[0].value, PerfValue::Float(0.42));
    assert_eq!(points[1].label.as_deref(), Some("1"));
}

#[tokio::test]
async fn test_check_cpu_load_without_connection() {
    let request = CheckCpuLoadRequest {
        base: BaseRequest {
            host: "router-01".to_string(),
            device_class: DeviceClass::Generic,
        },
    };
    let mut mon = CheckResult::new("checked cpu load");
    let response = request.process(&RequestContext::new(), &mut mon).await;

    assert_eq!(response.info.status, Status::Unknown);
    assert!(response.info.performance_data.is_empty());
}
