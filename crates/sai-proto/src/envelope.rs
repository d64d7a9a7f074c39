//! Request/response envelopes shared by every object family.
//!
//! Oid objects carry their identifier in `oid`; keyed entries carry it in
//! `entry`. Exactly one of the two is meaningful for a given object type.

use crate::keys::EntryKey;
use crate::objects::{ObjectAttributes, PortOperStatus};

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateRequest {
    /// Owning switch. Zero when creating the switch itself.
    #[prost(uint64, tag = "1")]
    pub switch: u64,
    #[prost(message, optional, tag = "2")]
    pub entry: Option<EntryKey>,
    #[prost(message, optional, tag = "3")]
    pub attributes: Option<ObjectAttributes>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateResponse {
    /// Handle of the new object. Zero for keyed entries.
    #[prost(uint64, tag = "1")]
    pub oid: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RemoveRequest {
    #[prost(uint64, tag = "1")]
    pub oid: u64,
    #[prost(message, optional, tag = "2")]
    pub entry: Option<EntryKey>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct RemoveResponse {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SetAttributeRequest {
    #[prost(uint64, tag = "1")]
    pub oid: u64,
    #[prost(message, optional, tag = "2")]
    pub entry: Option<EntryKey>,
    #[prost(message, optional, tag = "3")]
    pub attributes: Option<ObjectAttributes>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SetAttributeResponse {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAttributeRequest {
    #[prost(uint64, tag = "1")]
    pub oid: u64,
    #[prost(message, optional, tag = "2")]
    pub entry: Option<EntryKey>,
    /// Wire attribute numbers of the requested attributes.
    #[prost(int32, repeated, tag = "3")]
    pub attr_type: Vec<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetAttributeResponse {
    #[prost(message, optional, tag = "1")]
    pub attributes: Option<ObjectAttributes>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetStatsRequest {
    #[prost(uint64, tag = "1")]
    pub oid: u64,
    /// Wire counter numbers, in caller order.
    #[prost(int32, repeated, tag = "2")]
    pub counter_ids: Vec<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct GetStatsResponse {
    /// One value per requested counter, same order.
    #[prost(uint64, repeated, tag = "1")]
    pub values: Vec<u64>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ClearStatsRequest {
    #[prost(uint64, tag = "1")]
    pub oid: u64,
    #[prost(int32, repeated, tag = "2")]
    pub counter_ids: Vec<i32>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ClearStatsResponse {}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateBulkRequest {
    #[prost(message, repeated, tag = "1")]
    pub reqs: Vec<CreateRequest>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateBulkResponse {
    /// One response per sub-request, same order.
    #[prost(message, repeated, tag = "1")]
    pub resps: Vec<CreateResponse>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PortStateChangeNotificationRequest {
    #[prost(uint64, tag = "1")]
    pub switch: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PortOperStatusNotification {
    #[prost(uint64, tag = "1")]
    pub port_id: u64,
    #[prost(enumeration = "PortOperStatus", tag = "2")]
    pub port_state: i32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PortStateChangeNotificationResponse {
    #[prost(message, repeated, tag = "1")]
    pub data: Vec<PortOperStatusNotification>,
}
