//! Prelude module that re-exports commonly used types and traits.
//!
//! This module provides a convenient way to import the most commonly used
//! types from the matchbook crate. Instead of importing each type
//! individually, you can use:
//!
//! ```rust
//! use matchbook::prelude::*;
//! ```
//!
//! This will import all the essential types needed for working with the
//! order book.

// Core order book types
pub use crate::orderbook::OrderBook;
pub use crate::orderbook::OrderBookError;

// Order types and enums
pub use crate::orderbook::order::{Order, OrderId, OrderModify, Price, Quantity, Side, TimeInForce};

// Trade-related types
pub use crate::orderbook::trade::{Execution, Trade};

// Snapshot types
pub use crate::orderbook::snapshot::{LevelSnapshot, OrderBookSnapshot};

// Observer types
pub use crate::orderbook::tracker::{op, BookObserver, OperationRecord};

// Utility functions
pub use crate::utils::current_time_millis;
