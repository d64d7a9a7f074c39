//! Mock forwarding engine shared by the integration tests.

#![allow(dead_code)]

use sai_engine::transport::{PortStateStream, StopSignal};
use sai_engine::{RpcRequest, RpcResponse, Transport, TransportError};
use sai_proto::{PortOperStatusNotification, PortStateChangeNotificationResponse};
use sai_types::RawObjectId;
use std::sync::Mutex;

type Responder =
    Box<dyn Fn(&'static str, &RpcRequest) -> Result<RpcResponse, TransportError> + Send + Sync>;

/// Records every call and answers through a scripted responder.
pub struct MockEngine {
    responder: Responder,
    calls: Mutex<Vec<(&'static str, RpcRequest)>>,
    port_batches: Mutex<Vec<Vec<(u64, i32)>>>,
    subscriptions: Mutex<Vec<RawObjectId>>,
}

impl MockEngine {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&'static str, &RpcRequest) -> Result<RpcResponse, TransportError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
            port_batches: Mutex::new(Vec::new()),
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Batches of `(port id, wire oper status)` the next subscription yields.
    pub fn with_port_batches(self, batches: Vec<Vec<(u64, i32)>>) -> Self {
        *self.port_batches.lock().unwrap() = batches;
        self
    }

    pub fn calls(&self) -> Vec<(&'static str, RpcRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().iter().map(|(e, _)| *e).collect()
    }

    pub fn subscriptions(&self) -> Vec<RawObjectId> {
        self.subscriptions.lock().unwrap().clone()
    }
}

impl Transport for MockEngine {
    fn call(&self, endpoint: &'static str, request: RpcRequest) -> Result<RpcResponse, TransportError> {
        let response = (self.responder)(endpoint, &request);
        self.calls.lock().unwrap().push((endpoint, request));
        response
    }

    fn subscribe_port_state(
        &self,
        switch_id: RawObjectId,
        _stop: StopSignal,
    ) -> Result<PortStateStream, TransportError> {
        self.subscriptions.lock().unwrap().push(switch_id);
        let batches = std::mem::take(&mut *self.port_batches.lock().unwrap());
        Ok(Box::new(batches.into_iter().map(|batch| {
            Ok::<_, TransportError>(PortStateChangeNotificationResponse {
                data: batch
                    .into_iter()
                    .map(|(port_id, port_state)| PortOperStatusNotification { port_id, port_state })
                    .collect(),
            })
        })))
    }
}

pub fn unavailable(endpoint: &'static str) -> TransportError {
    TransportError::new(endpoint, tonic::Code::Unavailable, "engine down")
        .with_trace_id("00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01")
}
