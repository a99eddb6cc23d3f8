//! Order book operations like adding, modifying and canceling orders

use super::book::OrderBook;
use super::error::OrderBookError;
use super::order::{Order, OrderId, OrderModify, Price, Quantity, Side, TimeInForce};
use super::tracker::op;
use super::trade::Trade;
use std::time::Instant;
use tracing::trace;

impl OrderBook {
    /// Submit an order to the book.
    ///
    /// Admission is checked first: an order with zero remaining quantity
    /// or id zero, a duplicate id, an IOC with nothing crossable, or a FOK
    /// that cannot fill completely is rejected silently and `Ok(vec![])`
    /// is returned with the book unchanged. An admitted order is appended
    /// at the tail of its price level, the matcher runs to fixpoint, and
    /// the produced trades are returned; any IOC/FOK residual left resting
    /// is cancelled before the method returns.
    ///
    /// # Errors
    /// Returns [`OrderBookError::OverFill`] only if the matcher applied an
    /// impossible fill, which indicates a bug rather than a caller error.
    pub fn add_order(&self, order: Order) -> Result<Vec<Trade>, OrderBookError> {
        let started_at = Instant::now();
        trace!("Adding order {}", order);

        let mut state = self.state.write();
        if !state.can_admit(&order) {
            self.notify(op::ADD_ORDER_REJECTED, started_at, 0);
            return Ok(Vec::new());
        }

        state.insert_order(order);

        let match_started_at = Instant::now();
        let trades = state.match_orders()?;
        self.notify(op::MATCH_ORDERS, match_started_at, trades.len());
        self.notify(op::ADD_ORDER_SUCCESS, started_at, 1);
        Ok(trades)
    }

    /// Construct a limit order and submit it.
    ///
    /// # Errors
    /// Returns a construction error for id or quantity zero; admission
    /// rejections still come back as an empty trade list.
    pub fn add_limit_order(
        &self,
        id: OrderId,
        price: Price,
        quantity: Quantity,
        side: Side,
        time_in_force: TimeInForce,
    ) -> Result<Vec<Trade>, OrderBookError> {
        trace!(
            "Adding limit order {} {} {} {} {}",
            id, price, quantity, side, time_in_force
        );
        let order = Order::new(id, side, price, quantity, time_in_force)?;
        self.add_order(order)
    }

    /// Cancel the resting order with `order_id`. An unknown id is a no-op.
    pub fn cancel_order(&self, order_id: OrderId) {
        let started_at = Instant::now();
        trace!("Cancelling order {}", order_id);

        let mut state = self.state.write();
        if state.cancel(order_id) {
            self.notify(op::CANCEL_ORDER_SUCCESS, started_at, 1);
        } else {
            self.notify(op::CANCEL_ORDER_NOT_FOUND, started_at, 0);
        }
    }

    /// Amend a resting order: cancel it and admit a replacement built from
    /// `modify`, carrying the original order's time-in-force. Cancel and
    /// replace happen under one exclusive lock acquisition, so no
    /// intermediate state is observable; the replacement queues at the
    /// tail of its destination level, losing time priority.
    ///
    /// An unknown id returns an empty trade list and leaves the book
    /// untouched.
    ///
    /// # Errors
    /// Returns a construction error when the amendment carries quantity
    /// zero; the original order has been cancelled by then, matching the
    /// strict cancel-then-replace contract.
    pub fn modify_order(&self, modify: OrderModify) -> Result<Vec<Trade>, OrderBookError> {
        let started_at = Instant::now();
        trace!(
            "Modifying order {} to {} {} @ {}",
            modify.order_id(),
            modify.side(),
            modify.quantity(),
            modify.price()
        );

        let mut state = self.state.write();
        let time_in_force = match state
            .index
            .get(&modify.order_id())
            .map(|&idx| state.arena[idx].order.time_in_force())
        {
            Some(time_in_force) => time_in_force,
            None => {
                self.notify(op::MATCH_ORDER_NOT_FOUND, started_at, 0);
                return Ok(Vec::new());
            }
        };

        state.cancel(modify.order_id());
        let order = modify.to_order(time_in_force)?;

        let trades = if state.can_admit(&order) {
            state.insert_order(order);
            let match_started_at = Instant::now();
            let trades = state.match_orders()?;
            self.notify(op::MATCH_ORDERS, match_started_at, trades.len());
            trades
        } else {
            Vec::new()
        };

        self.notify(op::MATCH_ORDER_SUCCESS, started_at, 1);
        Ok(trades)
    }
}
