//! End-to-end tests of the adapter against a mock forwarding engine.

mod common;

use common::{unavailable, MockEngine};
use pretty_assertions::assert_eq;
use sai_engine::objects::{neighbor_entry, packet_action, port, queue, route_entry};
use sai_engine::{
    EntryKey, ErrorMode, ObjectRef, PortStateEvent, RpcRequest, RpcResponse, SaiAdapter, SaiError,
};
use sai_proto::endpoints;
use sai_proto::object_attributes::Body;
use sai_proto::objects::{PacketAction, PortOperStatus, QueueType};
use sai_proto::{
    CreateBulkResponse, CreateResponse, GetAttributeResponse, GetStatsResponse, ObjectAttributes,
    PortAttribute, QueueAttribute, RemoveResponse, SetAttributeResponse,
};
use sai_types::{
    Attribute, AttributeValue, IpAddress, IpPrefix, MacAddress, ObjectType, SaiStatus, ValueKind,
    NULL_OBJECT_ID,
};
use std::net::Ipv4Addr;
use std::sync::mpsc;
use std::time::Duration;

const SWITCH: u64 = 0x21_0000_0000_0000;

fn created(oid: u64) -> impl Fn(&'static str, &RpcRequest) -> Result<RpcResponse, sai_engine::TransportError> {
    move |_, _| Ok(RpcResponse::Create(CreateResponse { oid }))
}

#[test]
fn test_queue_create_scenario() {
    let adapter = SaiAdapter::new(MockEngine::new(created(42)));

    let oid = adapter
        .create(
            ObjectType::Queue,
            SWITCH,
            &[
                Attribute::new(queue::attr::TYPE, AttributeValue::Enum(queue::queue_type::UNICAST)),
                Attribute::new(queue::attr::PORT, AttributeValue::Oid(7)),
                Attribute::new(queue::attr::INDEX, AttributeValue::U8(3)),
            ],
        )
        .unwrap();
    assert_eq!(oid, 42);

    let calls = adapter.transport().calls();
    assert_eq!(calls.len(), 1);
    let (endpoint, RpcRequest::Create(request)) = &calls[0] else {
        panic!("expected a create request, got {:?}", calls[0]);
    };
    assert_eq!(*endpoint, endpoints::queue::CREATE);
    assert_eq!(request.switch, SWITCH);
    assert_eq!(request.entry, None);
    assert_eq!(
        request.attributes,
        Some(ObjectAttributes::from(Body::Queue(QueueAttribute {
            r#type: Some(QueueType::Unicast as i32),
            port: Some(7),
            index: Some(3),
            ..Default::default()
        })))
    );
}

#[test]
fn test_short_buffer_get_reports_true_count() {
    let adapter = SaiAdapter::new(MockEngine::new(|_, _| {
        Ok(RpcResponse::Get(GetAttributeResponse {
            attributes: Some(ObjectAttributes::from(Body::Port(PortAttribute {
                qos_queue_list: vec![0x15_01, 0x15_02, 0x15_03, 0x15_04],
                mtu: Some(9100),
                ..Default::default()
            }))),
        }))
    }));

    let mut attrs = vec![
        Attribute::slot(port::attr::QOS_QUEUE_LIST, ValueKind::OidList, 2),
        Attribute::slot(port::attr::MTU, ValueKind::U32, 0),
    ];
    adapter
        .get_attribute(ObjectRef::Oid(ObjectType::Port, 0x1_0001), &mut attrs)
        .unwrap();

    let AttributeValue::OidList(queues) = &attrs[0].value else {
        panic!("queue list slot changed variant");
    };
    assert_eq!(queues.as_slice(), &[0x15_01, 0x15_02]);
    assert_eq!(queues.count(), 4);
    assert!(queues.is_truncated());
    assert_eq!(attrs[1].value, AttributeValue::U32(9100));

    let calls = adapter.transport().calls();
    let (_, RpcRequest::Get(request)) = &calls[0] else {
        panic!("expected a get request");
    };
    assert_eq!(request.oid, 0x1_0001);
    assert_eq!(request.attr_type, vec![4, 10]);
}

#[test]
fn test_unknown_attribute_is_tolerated() {
    let adapter = SaiAdapter::new(MockEngine::new(created(5)));
    let known = vec![
        Attribute::new(port::attr::SPEED, AttributeValue::U32(400_000)),
        Attribute::new(port::attr::ADMIN_STATE, AttributeValue::Bool(true)),
    ];
    let mut with_unknown = known.clone();
    with_unknown.insert(1, Attribute::new(0x1000_0000, AttributeValue::U64(1)));

    adapter.create(ObjectType::Port, SWITCH, &known).unwrap();
    adapter.create(ObjectType::Port, SWITCH, &with_unknown).unwrap();

    let calls = adapter.transport().calls();
    assert_eq!(calls[0], calls[1]);
}

fn remove_fails_for(oid: u64) -> MockEngine {
    MockEngine::new(move |endpoint, request| match request {
        RpcRequest::Remove(req) if req.oid == oid => Err(unavailable(endpoint)),
        _ => Ok(RpcResponse::Remove(RemoveResponse {})),
    })
}

#[test]
fn test_bulk_remove_stop_on_error() {
    let adapter = SaiAdapter::new(remove_fails_for(3));
    let targets: Vec<_> = (1..=5).map(|oid| ObjectRef::Oid(ObjectType::Port, oid)).collect();

    let result = adapter
        .bulk_remove(ObjectType::Port, &targets, ErrorMode::StopOnError)
        .unwrap();

    assert_eq!(
        result.statuses,
        vec![
            SaiStatus::Success,
            SaiStatus::Success,
            SaiStatus::Failure,
            SaiStatus::NotExecuted,
            SaiStatus::NotExecuted,
        ]
    );
    assert_eq!(result.status, SaiStatus::Failure);
    assert_eq!(adapter.transport().calls().len(), 3);
}

#[test]
fn test_bulk_remove_continue_on_error() {
    let adapter = SaiAdapter::new(remove_fails_for(3));
    let targets: Vec<_> = (1..=5).map(|oid| ObjectRef::Oid(ObjectType::Port, oid)).collect();

    let result = adapter
        .bulk_remove(ObjectType::Port, &targets, ErrorMode::ContinueOnError)
        .unwrap();

    assert_eq!(
        result.statuses,
        vec![
            SaiStatus::Success,
            SaiStatus::Success,
            SaiStatus::Failure,
            SaiStatus::Success,
            SaiStatus::Success,
        ]
    );
    assert_eq!(result.status, SaiStatus::Failure);
    assert_eq!(
        adapter.transport().endpoints(),
        vec![endpoints::port::REMOVE; 5]
    );
}

#[test]
fn test_bulk_create_is_one_batched_call() {
    let adapter = SaiAdapter::new(MockEngine::new(|_, request| match request {
        RpcRequest::CreateBulk(bulk) => Ok(RpcResponse::CreateBulk(CreateBulkResponse {
            resps: (0..bulk.reqs.len() as u64)
                .map(|i| CreateResponse { oid: 0x100 + i })
                .collect(),
        })),
        other => panic!("unexpected request {:?}", other),
    }));
    let objects: Vec<Vec<Attribute>> = [10_000u32, 25_000, 100_000]
        .into_iter()
        .map(|speed| vec![Attribute::new(port::attr::SPEED, AttributeValue::U32(speed))])
        .collect();

    let result = adapter
        .bulk_create(ObjectType::Port, SWITCH, &objects, ErrorMode::StopOnError)
        .unwrap();

    assert_eq!(result.outputs, vec![0x100, 0x101, 0x102]);
    assert_eq!(result.statuses, vec![SaiStatus::Success; 3]);
    assert_eq!(result.status, SaiStatus::Success);
    assert_eq!(
        adapter.transport().endpoints(),
        vec![endpoints::port::CREATE_BULK]
    );
}

#[test]
fn test_failed_batch_fabricates_no_success() {
    let adapter = SaiAdapter::new(MockEngine::new(|endpoint, _| Err(unavailable(endpoint))));
    let objects = vec![Vec::new(); 4];

    let result = adapter
        .bulk_create(ObjectType::Port, SWITCH, &objects, ErrorMode::ContinueOnError)
        .unwrap();

    assert_eq!(result.len(), 4);
    assert_eq!(result.statuses, vec![SaiStatus::Failure; 4]);
    assert_eq!(result.outputs, vec![NULL_OBJECT_ID; 4]);
    assert_eq!(result.status, SaiStatus::Failure);
}

#[test]
fn test_unwired_operations_fail_closed() {
    let adapter = SaiAdapter::new(MockEngine::new(created(1)));

    let err = adapter
        .set_attribute(
            ObjectRef::Oid(ObjectType::Vlan, 0x26_0001),
            &Attribute::new(3, AttributeValue::Bool(true)),
        )
        .unwrap_err();
    assert_eq!(err.status(), SaiStatus::NotImplemented);

    let err = adapter
        .bulk_set(
            ObjectType::NextHop,
            &[ObjectRef::Oid(ObjectType::NextHop, 1)],
            &[Attribute::new(2, AttributeValue::Oid(9))],
            ErrorMode::StopOnError,
        )
        .unwrap_err();
    assert_eq!(err.status(), SaiStatus::NotImplemented);

    let err = adapter.create(ObjectType::Tunnel, SWITCH, &[]).unwrap_err();
    assert_eq!(err.status(), SaiStatus::NotImplemented);

    assert!(adapter.transport().calls().is_empty());
}

#[test]
fn test_route_entry_is_addressed_by_key() {
    let adapter = SaiAdapter::new(MockEngine::new(|_, request| match request {
        RpcRequest::Create(_) => Ok(RpcResponse::Create(CreateResponse { oid: 0 })),
        _ => Ok(RpcResponse::Set(SetAttributeResponse {})),
    }));
    let key = EntryKey::Route {
        switch_id: SWITCH,
        vr_id: 0x3_0001,
        destination: IpPrefix::new(IpAddress::V4(Ipv4Addr::new(192, 168, 0, 0)), 24).unwrap(),
    };

    adapter
        .create_entry(
            &key,
            &[
                Attribute::new(
                    route_entry::attr::PACKET_ACTION,
                    AttributeValue::Enum(packet_action::FORWARD),
                ),
                Attribute::new(route_entry::attr::NEXT_HOP_ID, AttributeValue::Oid(0x4_0001)),
            ],
        )
        .unwrap();
    adapter
        .set_attribute(
            ObjectRef::Entry(&key),
            &Attribute::new(route_entry::attr::PACKET_ACTION, AttributeValue::Enum(packet_action::DROP)),
        )
        .unwrap();

    let calls = adapter.transport().calls();
    let (endpoint, RpcRequest::Create(create)) = &calls[0] else {
        panic!("expected a create request");
    };
    assert_eq!(*endpoint, endpoints::route::CREATE);
    assert_eq!(create.switch, SWITCH);
    assert_eq!(create.entry, Some(key.to_wire()));

    let (endpoint, RpcRequest::Set(set)) = &calls[1] else {
        panic!("expected a set request");
    };
    assert_eq!(*endpoint, endpoints::route::SET);
    assert_eq!(set.oid, NULL_OBJECT_ID);
    let Some(Body::RouteEntry(attrs)) = set.attributes.clone().and_then(|a| a.body) else {
        panic!("expected route entry attributes");
    };
    assert_eq!(attrs.packet_action, Some(PacketAction::Drop as i32));
}

#[test]
fn test_neighbor_bulk_create_rejects_foreign_key() {
    let adapter = SaiAdapter::new(MockEngine::new(|_, request| match request {
        RpcRequest::CreateBulk(bulk) => Ok(RpcResponse::CreateBulk(CreateBulkResponse {
            resps: vec![CreateResponse::default(); bulk.reqs.len()],
        })),
        other => panic!("unexpected request {:?}", other),
    }));
    let neighbor = EntryKey::Neighbor {
        switch_id: SWITCH,
        rif_id: 0x6_0001,
        ip: IpAddress::V4(Ipv4Addr::new(10, 0, 0, 2)),
    };
    let route = EntryKey::Route {
        switch_id: SWITCH,
        vr_id: 0x3_0001,
        destination: IpPrefix::new(IpAddress::V4(Ipv4Addr::new(10, 0, 0, 0)), 8).unwrap(),
    };
    let mac = Attribute::new(
        neighbor_entry::attr::DST_MAC_ADDRESS,
        AttributeValue::Mac(MacAddress::new([0, 1, 2, 3, 4, 5])),
    );

    let result = adapter
        .bulk_create_entries(
            ObjectType::NeighborEntry,
            &[(neighbor.clone(), vec![mac.clone()]), (route, vec![]), (neighbor, vec![mac])],
            ErrorMode::ContinueOnError,
        )
        .unwrap();

    assert_eq!(
        result.statuses,
        vec![
            SaiStatus::Success,
            SaiStatus::InvalidParameter,
            SaiStatus::Success
        ]
    );
    let calls = adapter.transport().calls();
    let (endpoint, RpcRequest::CreateBulk(bulk)) = &calls[0] else {
        panic!("expected a bulk create request");
    };
    assert_eq!(*endpoint, endpoints::neighbor::CREATE_BULK);
    assert_eq!(bulk.reqs.len(), 2);
}

#[test]
fn test_port_stats_translate_counter_ids() {
    let adapter = SaiAdapter::new(MockEngine::new(|_, _| {
        Ok(RpcResponse::GetStats(GetStatsResponse {
            values: vec![1_000, 7],
        }))
    }));

    let values = adapter
        .get_stats(
            ObjectType::Port,
            0x1_0001,
            &[port::stat::IF_IN_OCTETS, port::stat::IF_OUT_ERRORS],
        )
        .unwrap();
    assert_eq!(values, vec![1_000, 7]);

    let calls = adapter.transport().calls();
    let (_, RpcRequest::GetStats(request)) = &calls[0] else {
        panic!("expected a stats request");
    };
    assert_eq!(request.counter_ids, vec![1, 14]);

    let err = adapter
        .get_stats(ObjectType::Port, 0x1_0001, &[port::stat::IF_IN_OCTETS, 999])
        .unwrap_err();
    assert_eq!(err.status(), SaiStatus::NotSupported);
    assert_eq!(adapter.transport().calls().len(), 1);
}

#[test]
fn test_transport_failure_carries_trace_id() {
    let adapter = SaiAdapter::new(MockEngine::new(|endpoint, _| Err(unavailable(endpoint))));

    let err = adapter.create(ObjectType::Queue, SWITCH, &[]).unwrap_err();
    assert_eq!(err.status(), SaiStatus::Failure);
    let SaiError::Transport(transport) = &err else {
        panic!("expected a transport error, got {:?}", err);
    };
    assert_eq!(transport.endpoint, endpoints::queue::CREATE);
    assert!(err.to_string().contains("4bf92f3577b34da6a3ce929d0e0e4736"));
}

#[test]
fn test_port_state_registration_slot() {
    let engine = MockEngine::new(created(1)).with_port_batches(vec![vec![
        (0x1_0001, PortOperStatus::Up as i32),
        (0x1_0002, PortOperStatus::Down as i32),
    ]]);
    let adapter = SaiAdapter::new(engine);
    let (tx, rx) = mpsc::channel();

    adapter
        .register_port_state_callback(
            SWITCH,
            Box::new(move |events: &[PortStateEvent]| {
                let _ = tx.send(events.to_vec());
            }),
        )
        .unwrap();

    let events = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(
        events,
        vec![
            PortStateEvent {
                port_id: 0x1_0001,
                oper_status: port::oper_status::UP,
            },
            PortStateEvent {
                port_id: 0x1_0002,
                oper_status: port::oper_status::DOWN,
            },
        ]
    );

    let err = adapter
        .register_port_state_callback(SWITCH, Box::new(|_: &[PortStateEvent]| {}))
        .unwrap_err();
    assert!(matches!(err, SaiError::AlreadyRegistered));
    assert_eq!(adapter.transport().subscriptions(), vec![SWITCH]);

    assert!(adapter.deregister_port_state_callback());
    assert!(!adapter.deregister_port_state_callback());
    adapter
        .register_port_state_callback(SWITCH, Box::new(|_: &[PortStateEvent]| {}))
        .unwrap();
    assert!(adapter.port_state_callback_registered());
}
