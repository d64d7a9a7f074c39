//! gRPC transport over a lazily connected tonic channel.
//!
//! The plugin API is synchronous, so the transport owns a tokio runtime and
//! blocks the calling thread on each RPC. `Runtime::block_on` may be entered
//! from many threads at once; the channel multiplexes them.

use super::{PortStateStream, RpcRequest, RpcResponse, StopSignal, Transport, TransportError};
use crate::config::TransportConfig;
use http::uri::PathAndQuery;
use log::{debug, error, info};
use sai_proto::endpoints;
use sai_proto::{PortStateChangeNotificationRequest, PortStateChangeNotificationResponse};
use sai_types::RawObjectId;
use tokio::runtime::{Handle, Runtime};
use tonic::codec::{ProstCodec, Streaming};
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Status};

pub struct GrpcTransport {
    runtime: Runtime,
    channel: Channel,
    trace_metadata_key: String,
}

impl GrpcTransport {
    /// Creates the transport. No connection is made until the first call.
    pub fn connect(config: &TransportConfig) -> Result<Self, TransportError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("sai-rpc")
            .enable_all()
            .build()
            .map_err(|e| TransportError::new("", Code::Internal, format!("runtime: {}", e)))?;

        let endpoint = Endpoint::from_shared(config.address.clone())
            .map_err(|e| {
                TransportError::new("", Code::InvalidArgument, format!("{}: {}", config.address, e))
            })?
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout());

        let channel = {
            let _guard = runtime.enter();
            endpoint.connect_lazy()
        };

        info!("forwarding engine channel to {}", config.address);
        Ok(Self {
            runtime,
            channel,
            trace_metadata_key: config.trace_metadata_key.clone(),
        })
    }

    fn failure(&self, endpoint: &'static str, status: Status) -> TransportError {
        let mut err = TransportError::new(endpoint, status.code(), status.message());
        if let Some(trace_id) = status
            .metadata()
            .get(self.trace_metadata_key.as_str())
            .and_then(|v| v.to_str().ok())
        {
            err = err.with_trace_id(trace_id);
        }
        error!("{}", err);
        err
    }

    fn unary<Req, Resp>(&self, endpoint: &'static str, request: Req) -> Result<Resp, TransportError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let channel = self.channel.clone();
        self.runtime
            .block_on(async move {
                let mut grpc = tonic::client::Grpc::new(channel);
                grpc.ready()
                    .await
                    .map_err(|e| Status::unavailable(format!("service was not ready: {}", e)))?;
                let codec = ProstCodec::<Req, Resp>::default();
                grpc.unary(
                    tonic::Request::new(request),
                    PathAndQuery::from_static(endpoint),
                    codec,
                )
                .await
                .map(tonic::Response::into_inner)
            })
            .map_err(|status| self.failure(endpoint, status))
    }
}

impl Transport for GrpcTransport {
    fn call(&self, endpoint: &'static str, request: RpcRequest) -> Result<RpcResponse, TransportError> {
        match request {
            RpcRequest::Create(req) => self.unary(endpoint, req).map(RpcResponse::Create),
            RpcRequest::Remove(req) => self.unary(endpoint, req).map(RpcResponse::Remove),
            RpcRequest::Set(req) => self.unary(endpoint, req).map(RpcResponse::Set),
            RpcRequest::Get(req) => self.unary(endpoint, req).map(RpcResponse::Get),
            RpcRequest::GetStats(req) => self.unary(endpoint, req).map(RpcResponse::GetStats),
            RpcRequest::ClearStats(req) => self.unary(endpoint, req).map(RpcResponse::ClearStats),
            RpcRequest::CreateBulk(req) => self.unary(endpoint, req).map(RpcResponse::CreateBulk),
        }
    }

    fn subscribe_port_state(
        &self,
        switch_id: RawObjectId,
        stop: StopSignal,
    ) -> Result<PortStateStream, TransportError> {
        let endpoint = endpoints::switch::PORT_STATE_CHANGE_NOTIFICATION;
        let channel = self.channel.clone();
        let stream = self
            .runtime
            .block_on(async move {
                let mut grpc = tonic::client::Grpc::new(channel);
                grpc.ready()
                    .await
                    .map_err(|e| Status::unavailable(format!("service was not ready: {}", e)))?;
                let codec = ProstCodec::<
                    PortStateChangeNotificationRequest,
                    PortStateChangeNotificationResponse,
                >::default();
                grpc.server_streaming(
                    tonic::Request::new(PortStateChangeNotificationRequest { switch: switch_id }),
                    PathAndQuery::from_static(endpoint),
                    codec,
                )
                .await
                .map(tonic::Response::into_inner)
            })
            .map_err(|status| self.failure(endpoint, status))?;

        Ok(Box::new(PortStateIter {
            handle: self.runtime.handle().clone(),
            stream,
            stop,
            stopped: false,
            endpoint,
        }))
    }
}

/// Blocking view of the port state stream for the listener thread.
///
/// Each wait for a batch races the stop signal, so a stream the server keeps
/// open but silent still ends when the subscriber goes away.
struct PortStateIter {
    handle: Handle,
    stream: Streaming<PortStateChangeNotificationResponse>,
    stop: StopSignal,
    stopped: bool,
    endpoint: &'static str,
}

impl Iterator for PortStateIter {
    type Item = Result<PortStateChangeNotificationResponse, TransportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stopped {
            return None;
        }
        let stop = &mut self.stop;
        let stream = &mut self.stream;
        let message = self.handle.block_on(async move {
            tokio::select! {
                _ = stop => None,
                message = stream.message() => Some(message),
            }
        });
        let Some(message) = message else {
            debug!("port state stream stopped by subscriber");
            self.stopped = true;
            return None;
        };
        match message {
            Ok(Some(batch)) => Some(Ok(batch)),
            Ok(None) => None,
            Err(status) => Some(Err(TransportError::new(
                self.endpoint,
                status.code(),
                status.message(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sai_proto::CreateRequest;
    use std::time::Duration;

    fn unreachable_config() -> TransportConfig {
        TransportConfig {
            // TEST-NET-1, reserved and never routed
            address: "http://192.0.2.1:9".to_string(),
            connect_timeout_ms: 100,
            request_timeout_ms: 200,
            ..Default::default()
        }
    }

    #[test]
    fn test_invalid_address() {
        let config = TransportConfig {
            address: "not a uri".to_string(),
            ..Default::default()
        };
        let err = GrpcTransport::connect(&config).err().unwrap();
        assert_eq!(err.code, Code::InvalidArgument);
    }

    #[test]
    fn test_unreachable_engine_fails_once() {
        let transport = GrpcTransport::connect(&unreachable_config()).unwrap();
        let started = std::time::Instant::now();
        let err = transport
            .call(
                endpoints::queue::CREATE,
                RpcRequest::Create(CreateRequest::default()),
            )
            .unwrap_err();
        assert_eq!(err.endpoint, endpoints::queue::CREATE);
        assert!(err.trace_id.is_none());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_trace_id_is_extracted_from_metadata() {
        let transport = GrpcTransport::connect(&TransportConfig::default()).unwrap();
        let mut status = Status::internal("engine fault");
        status
            .metadata_mut()
            .insert("traceparent", "00-4bf92f-00f067-01".parse().unwrap());

        let err = transport.failure(endpoints::port::SET, status);
        assert_eq!(err.code, Code::Internal);
        assert_eq!(err.trace_id.as_deref(), Some("00-4bf92f-00f067-01"));
    }
}
