//! # Price-Time Priority Limit Order Book
//!
//! A thread-safe limit order book and matching engine written in Rust. This
//! crate provides the in-memory trading-venue data structure at the heart of
//! an exchange-style matcher: it ingests limit orders, crosses them against
//! resting liquidity, produces trades, and maintains an indexed book of open
//! orders supporting cancellation and amendment.
//!
//! ## Key Features
//!
//! - **Price-time priority matching**: Incoming orders always cross the best
//!   opposite price first and, within a price level, the oldest resting
//!   order first. Partial fills arise naturally when head-of-queue
//!   remainders differ.
//!
//! - **Three limit-order policies**: Good-till-cancel orders rest until
//!   cancelled; immediate-or-cancel orders trade whatever is crossable and
//!   drop the rest; fill-or-kill orders trade in full immediately or are
//!   wholly rejected before touching the book.
//!
//! - **O(1) cancellation**: An order index maps every resting id to its
//!   arena slot, and level queues are intrusive doubly-linked lists, so
//!   cancel and amend never scan.
//!
//! - **Reader-writer concurrency**: A single `RwLock` guards the ladders
//!   and the index. Mutations are linearizable; concurrent readers obtain
//!   consistent sizes and depth snapshots and can never observe a crossed
//!   book.
//!
//! - **Observable operations**: An optional observer hook receives one
//!   timing record per public operation, replacing any embedded statistics
//!   collector. See [`BookObserver`].
//!
//! ## Example
//!
//! ```rust
//! use matchbook::prelude::*;
//!
//! let book = OrderBook::new("BTC/USD");
//!
//! // A resting sell and an aggressive buy that crosses it.
//! book.add_limit_order(1, 100, 10, Side::Sell, TimeInForce::Gtc).unwrap();
//! let trades = book
//!     .add_limit_order(2, 100, 10, Side::Buy, TimeInForce::Gtc)
//!     .unwrap();
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].price(), 100);
//! assert_eq!(book.size(), 0);
//! ```
//!
//! ## Design Goals
//!
//! 1. **Correctness**: Every operation maintains the structural invariants
//!    of the book. The index and the ladders always agree exactly, and the
//!    book is never crossed at rest.
//! 2. **Predictable latency**: Best-price lookup is O(log N) in the number
//!    of levels; cancellation is O(1); matching touches only the levels it
//!    crosses.
//! 3. **Small surface**: The book is a library, not a venue. There is no
//!    wire format, no persistence, and no order routing; integration
//!    happens through the trade results and the observer hook.

pub mod orderbook;

pub mod prelude;
mod utils;

pub use orderbook::snapshot::{LevelSnapshot, OrderBookSnapshot};
pub use orderbook::tracker::{op, BookObserver, OperationRecord};
pub use orderbook::trade::{Execution, Trade};
pub use orderbook::{
    Order, OrderBook, OrderBookError, OrderId, OrderModify, Price, Quantity, Side, TimeInForce,
};
pub use utils::current_time_millis;
