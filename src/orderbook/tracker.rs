//! Observer hook for external instrumentation.
//!
//! The book invokes the observer once per public operation, while the book
//! lock is still held. Hooks must be non-blocking and must not call back
//! into the book; a re-entrant call would deadlock on the write lock.

use std::sync::Arc;
use std::time::Instant;

/// Operation names passed to the observer, one constant per outcome.
pub mod op {
    /// An order passed admission and was placed (and matched)
    pub const ADD_ORDER_SUCCESS: &str = "AddOrder_Success";
    /// An order failed one of the admission checks
    pub const ADD_ORDER_REJECTED: &str = "AddOrder_Rejected";
    /// A resting order was cancelled
    pub const CANCEL_ORDER_SUCCESS: &str = "CancelOrder_Success";
    /// A cancel targeted an unknown order id
    pub const CANCEL_ORDER_NOT_FOUND: &str = "CancelOrder_NotFound";
    /// An amendment replaced its order
    pub const MATCH_ORDER_SUCCESS: &str = "MatchOrder_Success";
    /// An amendment targeted an unknown order id
    pub const MATCH_ORDER_NOT_FOUND: &str = "MatchOrder_NotFound";
    /// One matcher run to fixpoint, including the residual sweep
    pub const MATCH_ORDERS: &str = "MatchOrders";
    /// Order count query
    pub const SIZE: &str = "Size";
    /// Depth snapshot
    pub const GET_ORDER_INFOS: &str = "GetOrderInfos";
}

/// Timing record handed to the observer for a single operation.
#[derive(Debug, Clone, Copy)]
pub struct OperationRecord {
    /// One of the [`op`] constants
    pub operation: &'static str,
    /// When the operation began
    pub started_at: Instant,
    /// When the operation finished
    pub finished_at: Instant,
    /// Orders affected: 1 for a successful mutation, 0 for a rejection or
    /// miss, the trade count for a matcher run, the book size for a
    /// snapshot
    pub orders_affected: usize,
}

impl OperationRecord {
    /// Wall time the operation took
    #[inline]
    pub fn elapsed(&self) -> std::time::Duration {
        self.finished_at.duration_since(self.started_at)
    }
}

/// Observer specification using Arc for shared ownership
pub type BookObserver = Arc<dyn Fn(&OperationRecord) + Send + Sync>;
