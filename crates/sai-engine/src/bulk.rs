//! Bulk operation coordinator.
//!
//! Two strategies, fixed per operation:
//!
//! - bulk create is sent as one batched RPC. The remote engine does not
//!   report per-item outcomes, so an RPC failure fails every item that was
//!   sent. Items that fail to build locally are subject to the error mode.
//! - bulk remove and bulk set issue one RPC per item, in order, so every
//!   item gets its own outcome.
//!
//! In both cases the per-item result array has exactly one entry per input.

use crate::error::SaiResult;
use log::warn;
use sai_types::SaiStatus;

/// `sai_bulk_op_error_mode_t`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Stop at the first failing item; the rest are not executed.
    StopOnError,
    /// Attempt every item.
    ContinueOnError,
}

impl ErrorMode {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(ErrorMode::StopOnError),
            1 => Some(ErrorMode::ContinueOnError),
            _ => None,
        }
    }
}

/// Per-item outcome of a bulk call plus the aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkResult<T> {
    /// One status per input item.
    pub statuses: Vec<SaiStatus>,
    /// One output per input item; the default value where the item failed.
    pub outputs: Vec<T>,
    /// Success only if every item succeeded.
    pub status: SaiStatus,
}

impl<T: Clone + Default> BulkResult<T> {
    fn not_executed(len: usize) -> Self {
        Self {
            statuses: vec![SaiStatus::NotExecuted; len],
            outputs: vec![T::default(); len],
            status: SaiStatus::Success,
        }
    }

    /// Every item reports `status`.
    pub fn uniform(len: usize, status: SaiStatus) -> Self {
        Self {
            statuses: vec![status; len],
            outputs: vec![T::default(); len],
            status,
        }
    }

    fn finish(mut self) -> Self {
        self.status = if self.statuses.iter().all(SaiStatus::is_success) {
            SaiStatus::Success
        } else {
            SaiStatus::Failure
        };
        self
    }
}

impl<T> BulkResult<T> {
    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Number of items that did not succeed.
    pub fn failed(&self) -> usize {
        self.statuses.iter().filter(|s| !s.is_success()).count()
    }
}

/// Runs `len` items one by one.
pub fn run_sequential<T, F>(len: usize, mode: ErrorMode, mut item: F) -> BulkResult<T>
where
    T: Clone + Default,
    F: FnMut(usize) -> SaiResult<T>,
{
    let mut result = BulkResult::not_executed(len);
    for i in 0..len {
        match item(i) {
            Ok(output) => {
                result.statuses[i] = SaiStatus::Success;
                result.outputs[i] = output;
            }
            Err(e) => {
                warn!("bulk item {} of {} failed: {}", i, len, e);
                result.statuses[i] = e.status();
                if mode == ErrorMode::StopOnError {
                    break;
                }
            }
        }
    }
    result.finish()
}

/// Builds `len` sub-requests and sends the ones that built as one batch.
///
/// `send` must return one output per sub-request, in order.
pub fn run_batched<R, T, B, S>(len: usize, mode: ErrorMode, mut build: B, send: S) -> BulkResult<T>
where
    T: Clone + Default,
    B: FnMut(usize) -> SaiResult<R>,
    S: FnOnce(Vec<R>) -> SaiResult<Vec<T>>,
{
    let mut result = BulkResult::not_executed(len);
    let mut batch = Vec::with_capacity(len);
    let mut positions = Vec::with_capacity(len);

    for i in 0..len {
        match build(i) {
            Ok(request) => {
                batch.push(request);
                positions.push(i);
            }
            Err(e) => {
                warn!("bulk item {} of {} rejected: {}", i, len, e);
                result.statuses[i] = e.status();
                if mode == ErrorMode::StopOnError {
                    break;
                }
            }
        }
    }

    if batch.is_empty() {
        return result.finish();
    }

    let sent = batch.len();
    match send(batch) {
        Ok(outputs) if outputs.len() == sent => {
            for (i, output) in positions.into_iter().zip(outputs) {
                result.statuses[i] = SaiStatus::Success;
                result.outputs[i] = output;
            }
        }
        Ok(outputs) => {
            warn!(
                "batched call returned {} results for {} requests",
                outputs.len(),
                sent
            );
            for i in positions {
                result.statuses[i] = SaiStatus::Failure;
            }
        }
        Err(e) => {
            warn!("batched call of {} items failed: {}", sent, e);
            for i in positions {
                result.statuses[i] = e.status();
            }
        }
    }
    result.finish()
}
