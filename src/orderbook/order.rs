//! Order primitives: sides, time-in-force policies, orders and amendments.

use crate::orderbook::error::OrderBookError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Limit price of an order. Signed: negative prices are legal (spreads,
/// energy markets) and sort correctly in the ladders.
pub type Price = i32;

/// Quantity of an order. Individual orders are bounded to 32 bits; depth
/// aggregation widens to 64 bits.
pub type Quantity = u32;

/// Unique order identifier. Zero is reserved and never admitted.
pub type OrderId = u64;

/// The side of an order (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy (bid) side
    Buy,
    /// Sell (ask) side
    Sell,
}

impl Side {
    /// Get the opposite side
    #[inline]
    pub fn opposite(&self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Time-in-force policy for a limit order.
///
/// - `Gtc` rests on the book until filled or cancelled.
/// - `Ioc` trades whatever is immediately crossable; any residual is
///   cancelled. Rejected outright when nothing is crossable.
/// - `Fok` trades in full immediately or is wholly rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good-till-cancel
    Gtc,
    /// Immediate-or-cancel
    Ioc,
    /// Fill-or-kill
    Fok,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeInForce::Gtc => write!(f, "GTC"),
            TimeInForce::Ioc => write!(f, "IOC"),
            TimeInForce::Fok => write!(f, "FOK"),
        }
    }
}

/// An individual order in the book.
///
/// Tracks both the initial and the remaining quantity to support partial
/// fills. Identity fields (id, side, price, time-in-force, initial
/// quantity) are immutable after construction; [`Order::fill`] is the only
/// mutator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    side: Side,
    price: Price,
    time_in_force: TimeInForce,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Create a new order.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidOrderId`] when `id` is zero and
    /// [`OrderBookError::InvalidQuantity`] when `quantity` is zero.
    pub fn new(
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
        time_in_force: TimeInForce,
    ) -> Result<Self, OrderBookError> {
        if id == 0 {
            return Err(OrderBookError::InvalidOrderId);
        }
        if quantity == 0 {
            return Err(OrderBookError::InvalidQuantity { order_id: id });
        }
        Ok(Self {
            id,
            side,
            price,
            time_in_force,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        })
    }

    /// The order's unique identifier
    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// The order's side
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// The order's limit price
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// The order's time-in-force policy
    #[inline]
    pub fn time_in_force(&self) -> TimeInForce {
        self.time_in_force
    }

    /// Quantity the order was created with
    #[inline]
    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    /// Quantity still open on the book
    #[inline]
    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    /// Quantity already executed
    #[inline]
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    /// True once the remaining quantity reaches zero
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Reduce the remaining quantity by `quantity`.
    ///
    /// A zero fill is a no-op. Filling beyond the remaining quantity is a
    /// matcher bug and fails with [`OrderBookError::OverFill`]; the order
    /// is left unchanged.
    ///
    /// # Errors
    /// Returns [`OrderBookError::OverFill`] when `quantity` exceeds the
    /// remaining quantity.
    pub fn fill(&mut self, quantity: Quantity) -> Result<(), OrderBookError> {
        if quantity == 0 {
            return Ok(());
        }
        if quantity > self.remaining_quantity {
            return Err(OrderBookError::OverFill {
                order_id: self.id,
                requested: quantity,
                remaining: self.remaining_quantity,
            });
        }
        self.remaining_quantity -= quantity;
        Ok(())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}/{} @ {}",
            self.id,
            self.side,
            self.time_in_force,
            self.remaining_quantity,
            self.initial_quantity,
            self.price
        )
    }
}

/// A request to amend an existing order.
///
/// Amendments are cancel-and-replace: the original order is removed and a
/// fresh order with the new parameters is admitted at the tail of its
/// destination price level, so time priority is lost. The original
/// time-in-force is preserved and cannot be changed through an amendment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderModify {
    order_id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
}

impl OrderModify {
    /// Create an amendment descriptor for the order with `order_id`
    pub fn new(order_id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            order_id,
            side,
            price,
            quantity,
        }
    }

    /// Identifier of the order being amended
    #[inline]
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// New side
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// New limit price
    #[inline]
    pub fn price(&self) -> Price {
        self.price
    }

    /// New quantity
    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Build the replacement order carrying the preserved `time_in_force`.
    ///
    /// # Errors
    /// Returns a construction error when the amendment's id or quantity is
    /// invalid; validation lives in [`Order::new`].
    pub fn to_order(&self, time_in_force: TimeInForce) -> Result<Order, OrderBookError> {
        Order::new(
            self.order_id,
            self.side,
            self.price,
            self.quantity,
            time_in_force,
        )
    }
}
