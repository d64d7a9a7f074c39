//! Transport adapter: one RPC attempt per call, failures carry the trace id.

mod grpc;

pub use grpc::GrpcTransport;

use sai_proto::{
    ClearStatsRequest, ClearStatsResponse, CreateBulkRequest, CreateBulkResponse, CreateRequest,
    CreateResponse, GetAttributeRequest, GetAttributeResponse, GetStatsRequest, GetStatsResponse,
    PortStateChangeNotificationResponse, RemoveRequest, RemoveResponse, SetAttributeRequest,
    SetAttributeResponse,
};
use sai_types::RawObjectId;
use std::fmt;
use tonic::Code;

/// Outbound request, one variant per envelope shape.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcRequest {
    Create(CreateRequest),
    Remove(RemoveRequest),
    Set(SetAttributeRequest),
    Get(GetAttributeRequest),
    GetStats(GetStatsRequest),
    ClearStats(ClearStatsRequest),
    CreateBulk(CreateBulkRequest),
}

/// Inbound response, mirroring [`RpcRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum RpcResponse {
    Create(CreateResponse),
    Remove(RemoveResponse),
    Set(SetAttributeResponse),
    Get(GetAttributeResponse),
    GetStats(GetStatsResponse),
    ClearStats(ClearStatsResponse),
    CreateBulk(CreateBulkResponse),
}

/// Batches of port state changes, until the server closes the stream or
/// the subscriber stops it.
pub type PortStateStream =
    Box<dyn Iterator<Item = Result<PortStateChangeNotificationResponse, TransportError>> + Send>;

/// Resolves when the subscriber no longer wants port state batches.
pub type StopSignal = tokio::sync::oneshot::Receiver<()>;

/// A failed RPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub endpoint: &'static str,
    pub code: Code,
    pub message: String,
    /// Correlation id from the response metadata, when the server sent one.
    pub trace_id: Option<String>,
}

impl TransportError {
    pub fn new(endpoint: &'static str, code: Code, message: impl Into<String>) -> Self {
        Self {
            endpoint,
            code,
            message: message.into(),
            trace_id: None,
        }
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rpc {} failed: {:?}: {}", self.endpoint, self.code, self.message)?;
        if let Some(trace_id) = &self.trace_id {
            write!(f, " (trace id {})", trace_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for TransportError {}

/// Channel to the remote forwarding engine.
///
/// Implementations must tolerate concurrent calls from many threads and
/// must not retry.
pub trait Transport: Send + Sync {
    /// Performs one unary RPC.
    fn call(&self, endpoint: &'static str, request: RpcRequest) -> Result<RpcResponse, TransportError>;

    /// Opens the server stream of port state changes for a switch.
    ///
    /// The stream must end, even while waiting for a batch, once `stop`
    /// resolves.
    fn subscribe_port_state(
        &self,
        switch_id: RawObjectId,
        stop: StopSignal,
    ) -> Result<PortStateStream, TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn call(&self, endpoint: &'static str, request: RpcRequest) -> Result<RpcResponse, TransportError> {
        (**self).call(endpoint, request)
    }

    fn subscribe_port_state(
        &self,
        switch_id: RawObjectId,
        stop: StopSignal,
    ) -> Result<PortStateStream, TransportError> {
        (**self).subscribe_port_state(switch_id, stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_error_display_includes_trace_id() {
        let err = TransportError::new("/a.B/C", Code::Unavailable, "connection refused");
        assert_eq!(
            err.to_string(),
            "rpc /a.B/C failed: Unavailable: connection refused"
        );

        let err = err.with_trace_id("00-abc-def-01");
        assert_eq!(
            err.to_string(),
            "rpc /a.B/C failed: Unavailable: connection refused (trace id 00-abc-def-01)"
        );
    }
}
