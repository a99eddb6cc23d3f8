//! Order book error types

use crate::orderbook::order::{OrderId, Quantity};
use std::fmt;

/// Errors that can occur within the order book
#[derive(Debug)]
#[non_exhaustive]
pub enum OrderBookError {
    /// Order constructed with the reserved id zero
    InvalidOrderId,

    /// Order constructed with zero quantity
    InvalidQuantity {
        /// The order ID that was rejected
        order_id: OrderId,
    },

    /// Fill requested beyond the order's remaining quantity. This indicates
    /// a matcher bug and is fatal to the operation that triggered it.
    OverFill {
        /// The order the fill was applied to
        order_id: OrderId,
        /// Quantity the fill requested
        requested: Quantity,
        /// Quantity actually remaining on the order
        remaining: Quantity,
    },

    /// Error while serializing snapshot data
    Serialization {
        /// Underlying error message
        message: String,
    },

    /// Error while deserializing snapshot data
    Deserialization {
        /// Underlying error message
        message: String,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidOrderId => {
                write!(f, "invalid order: id zero is reserved")
            }
            OrderBookError::InvalidQuantity { order_id } => {
                write!(f, "invalid order {order_id}: quantity cannot be zero")
            }
            OrderBookError::OverFill {
                order_id,
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "over-fill on order {order_id}: requested {requested}, remaining {remaining}"
                )
            }
            OrderBookError::Serialization { message } => {
                write!(f, "serialization error: {message}")
            }
            OrderBookError::Deserialization { message } => {
                write!(f, "deserialization error: {message}")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
