//! Contains the core matching engine logic for the order book.
//!
//! Matching runs to fixpoint after every admission: while the best bid
//! price is greater than or equal to the best ask price, the two head
//! orders of those levels trade `min` of their remaining quantities at the
//! resting ask's price. Time priority within a level is strict FIFO.

use super::book::BookState;
use super::error::OrderBookError;
use super::order::{Order, OrderId, Price, Quantity, Side, TimeInForce};
use super::trade::{Execution, Trade};
use tracing::trace;

impl BookState {
    /// Admission predicate for an incoming order, evaluated in order. Any
    /// failing step rejects the order without touching the book.
    pub(super) fn can_admit(&self, order: &Order) -> bool {
        if order.remaining_quantity() == 0 {
            return false;
        }
        if order.id() == 0 {
            return false;
        }
        if self.index.contains_key(&order.id()) {
            return false;
        }
        match order.time_in_force() {
            TimeInForce::Gtc => true,
            TimeInForce::Ioc => self.can_match(order.side(), order.price()),
            TimeInForce::Fok => {
                self.can_fill_completely(order.side(), order.price(), order.remaining_quantity())
            }
        }
    }

    /// Whether at least one opposite-side resting order is crossable with
    /// `price`. Constant-time peek at the opposite best level.
    pub(super) fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self.best_ask().is_some_and(|best_ask| price >= best_ask),
            Side::Sell => self.best_bid().is_some_and(|best_bid| price <= best_bid),
        }
    }

    /// Whether the opposite side holds at least `quantity` across all
    /// prices crossable with `price`. Walks levels from the best price and
    /// short-circuits as soon as the running 64-bit total reaches the
    /// target.
    pub(super) fn can_fill_completely(
        &self,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> bool {
        let target = u64::from(quantity);
        let mut available: u64 = 0;

        match side {
            Side::Buy => {
                for (&ask_price, level) in self.asks.iter() {
                    if ask_price > price {
                        break;
                    }
                    available += level.total_quantity;
                    if available >= target {
                        return true;
                    }
                }
            }
            Side::Sell => {
                for (&bid_price, level) in self.bids.iter().rev() {
                    if bid_price < price {
                        break;
                    }
                    available += level.total_quantity;
                    if available >= target {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// Cross the book to fixpoint and sweep residual IOC/FOK orders.
    ///
    /// Each inner iteration strictly reduces the remaining quantity of at
    /// least one head order; each outer iteration either consumes a level
    /// entirely or reaches a non-crossed state, so the loop terminates.
    ///
    /// # Errors
    /// Returns [`OrderBookError::OverFill`] if a fill exceeds an order's
    /// remaining quantity. The fill quantity is the minimum of the two
    /// heads' remainders, so this cannot happen while the book invariants
    /// hold.
    pub(super) fn match_orders(&mut self) -> Result<Vec<Trade>, OrderBookError> {
        let mut trades = Vec::new();

        loop {
            let (bid_price, ask_price) = match (self.best_bid(), self.best_ask()) {
                (Some(bid_price), Some(ask_price)) => (bid_price, ask_price),
                _ => break,
            };
            if bid_price < ask_price {
                break;
            }

            // Consume the two crossing levels head-to-head until one side
            // of the cross is exhausted. remove_order erases an emptied
            // level, which ends this inner loop.
            loop {
                let bid_idx = match self.bids.get(&bid_price).and_then(|level| level.head) {
                    Some(idx) => idx,
                    None => break,
                };
                let ask_idx = match self.asks.get(&ask_price).and_then(|level| level.head) {
                    Some(idx) => idx,
                    None => break,
                };

                let quantity = self.arena[bid_idx]
                    .order
                    .remaining_quantity()
                    .min(self.arena[ask_idx].order.remaining_quantity());

                self.arena[bid_idx].order.fill(quantity)?;
                self.arena[ask_idx].order.fill(quantity)?;
                if let Some(level) = self.bids.get_mut(&bid_price) {
                    level.total_quantity -= u64::from(quantity);
                }
                if let Some(level) = self.asks.get_mut(&ask_price) {
                    level.total_quantity -= u64::from(quantity);
                }

                // Both legs print at the resting ask's price, giving the
                // aggressive buyer any price improvement.
                let execution_price = self.arena[ask_idx].order.price();
                let bid_id = self.arena[bid_idx].order.id();
                let ask_id = self.arena[ask_idx].order.id();
                let trade = Trade::new(
                    Execution::new(bid_id, execution_price, quantity),
                    Execution::new(ask_id, execution_price, quantity),
                );
                trace!("{}", trade);
                trades.push(trade);

                if self.arena[bid_idx].order.is_filled() {
                    self.remove_order(bid_idx);
                }
                if self.arena[ask_idx].order.is_filled() {
                    self.remove_order(ask_idx);
                }
            }
        }

        // Residual IOC/FOK sweep: anything of those types still resting
        // could not be (fully) matched and is cancelled. Ids are collected
        // first so the index is not mutated mid-iteration.
        let mut residuals: Vec<OrderId> = Vec::new();
        for (&order_id, &idx) in self.index.iter() {
            match self.arena[idx].order.time_in_force() {
                TimeInForce::Ioc | TimeInForce::Fok => residuals.push(order_id),
                TimeInForce::Gtc => {}
            }
        }
        for order_id in residuals {
            self.cancel(order_id);
        }

        Ok(trades)
    }
}
