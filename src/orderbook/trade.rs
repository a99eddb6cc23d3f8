//! Trade records produced by the matching engine

use crate::orderbook::order::{OrderId, Price, Quantity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a trade: the order that participated, the price it executed
/// at, and the executed quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    /// Identifier of the participating order
    pub order_id: OrderId,
    /// Execution price
    pub price: Price,
    /// Executed quantity
    pub quantity: Quantity,
}

impl Execution {
    /// Create an execution record
    pub fn new(order_id: OrderId, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            price,
            quantity,
        }
    }
}

/// A completed trade between a bid and an ask.
///
/// Both legs carry the same quantity and the same execution price: the
/// resting ask's price at the moment of crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    bid: Execution,
    ask: Execution,
}

impl Trade {
    /// Create a trade from its two legs
    pub fn new(bid: Execution, ask: Execution) -> Self {
        Self { bid, ask }
    }

    /// The buy-side leg
    #[inline]
    pub fn bid(&self) -> &Execution {
        &self.bid
    }

    /// The sell-side leg
    #[inline]
    pub fn ask(&self) -> &Execution {
        &self.ask
    }

    /// The price both legs printed at
    #[inline]
    pub fn price(&self) -> Price {
        self.ask.price
    }

    /// The quantity both legs carry
    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.ask.quantity
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TRADE: bid {} x ask {} @ {} x {}",
            self.bid.order_id, self.ask.order_id, self.price(), self.quantity()
        )
    }
}
