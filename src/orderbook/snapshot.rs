//! Order book snapshot for market data

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::error::OrderBookError;
use super::order::Price;

/// Aggregated view of a single price level: the price and the summed
/// remaining quantity of every order resting there.
///
/// Individual orders are 32-bit; the aggregate is 64-bit so dense levels
/// cannot wrap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// The level's price
    pub price: Price,
    /// Total remaining quantity at this price
    pub quantity: u64,
}

/// A snapshot of the order book depth at a specific point in time.
///
/// Bids are ordered by price descending and asks ascending, so the first
/// element of each side is the top of book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol or identifier for this order book
    pub symbol: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid price levels, best (highest) first
    pub bids: Vec<LevelSnapshot>,

    /// Ask price levels, best (lowest) first
    pub asks: Vec<LevelSnapshot>,
}

impl OrderBookSnapshot {
    /// Get the best bid level
    pub fn best_bid(&self) -> Option<&LevelSnapshot> {
        let best = self.bids.first();
        trace!("best_bid: {:?}", best);
        best
    }

    /// Get the best ask level
    pub fn best_ask(&self) -> Option<&LevelSnapshot> {
        let best = self.asks.first();
        trace!("best_ask: {:?}", best);
        best
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        let mid_price = match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid.price as f64 + ask.price as f64) / 2.0),
            _ => None,
        };
        trace!("mid_price: {:?}", mid_price);
        mid_price
    }

    /// Get the spread (best ask - best bid), widened to 64 bits so extreme
    /// i32 prices cannot overflow the subtraction
    pub fn spread(&self) -> Option<i64> {
        let spread = match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(i64::from(ask.price) - i64::from(bid.price)),
            _ => None,
        };
        trace!("spread: {:?}", spread);
        spread
    }

    /// Total remaining quantity across all bid levels
    pub fn total_bid_quantity(&self) -> u64 {
        self.bids
            .iter()
            .fold(0u64, |sum, level| sum.saturating_add(level.quantity))
    }

    /// Total remaining quantity across all ask levels
    pub fn total_ask_quantity(&self) -> u64 {
        self.asks
            .iter()
            .fold(0u64, |sum, level| sum.saturating_add(level.quantity))
    }

    /// Serializes the snapshot to JSON.
    ///
    /// # Errors
    /// Returns [`OrderBookError::Serialization`] when encoding fails.
    pub fn to_json(&self) -> Result<String, OrderBookError> {
        serde_json::to_string(self).map_err(|error| OrderBookError::Serialization {
            message: error.to_string(),
        })
    }

    /// Deserializes a snapshot from JSON.
    ///
    /// # Errors
    /// Returns [`OrderBookError::Deserialization`] when decoding fails.
    pub fn from_json(data: &str) -> Result<Self, OrderBookError> {
        serde_json::from_str(data).map_err(|error| OrderBookError::Deserialization {
            message: error.to_string(),
        })
    }
}
