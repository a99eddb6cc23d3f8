//! Core OrderBook implementation for managing price levels and orders

use super::level::{LevelQueue, OrderSlot};
use super::order::{Order, OrderId, Price, Side};
use super::snapshot::{LevelSnapshot, OrderBookSnapshot};
use super::tracker::{op, BookObserver, OperationRecord};
use crate::utils::current_time_millis;
use parking_lot::RwLock;
use slab::Slab;
use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// The OrderBook maintains a two-sided price-time priority book: sorted
/// bid and ask ladders with a FIFO queue per price, an order index for
/// O(1) cancellation, and the matching engine that crosses incoming
/// orders against resting liquidity.
///
/// All mutating operations (`add_order`, `cancel_order`, `modify_order`,
/// `clear`) hold the book's write lock for their entire duration,
/// including matching and observer notification; `size`, `snapshot` and
/// the other read accessors hold the read lock. Concurrent readers never
/// observe a crossed book or a half-applied mutation.
pub struct OrderBook {
    /// The symbol or identifier for this order book
    symbol: String,

    /// Ladders, index and arena, guarded by the single reader-writer lock
    /// of the concurrency contract
    pub(super) state: RwLock<BookState>,

    /// Optional instrumentation hook, invoked while the state lock is held
    observer: RwLock<Option<BookObserver>>,
}

/// The book state proper: everything the lock guards.
pub(super) struct BookState {
    /// Bid ladder: price -> FIFO queue, best bid is the maximum key
    pub(super) bids: BTreeMap<Price, LevelQueue>,

    /// Ask ladder: price -> FIFO queue, best ask is the minimum key
    pub(super) asks: BTreeMap<Price, LevelQueue>,

    /// Order index: id -> arena slot, the back-reference that makes
    /// cancellation O(1)
    pub(super) index: HashMap<OrderId, usize>,

    /// Arena of resting orders; slots double as linked-list nodes of their
    /// level queue
    pub(super) arena: Slab<OrderSlot>,
}

impl BookState {
    fn new() -> Self {
        Self {
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            index: HashMap::new(),
            arena: Slab::new(),
        }
    }

    /// Highest resting bid price
    #[inline]
    pub(super) fn best_bid(&self) -> Option<Price> {
        self.bids.last_key_value().map(|(&price, _)| price)
    }

    /// Lowest resting ask price
    #[inline]
    pub(super) fn best_ask(&self) -> Option<Price> {
        self.asks.first_key_value().map(|(&price, _)| price)
    }

    /// Append `order` to the tail of its price level, creating the level
    /// if absent, and record it in the index. Returns the arena slot.
    pub(super) fn insert_order(&mut self, order: Order) -> usize {
        let side = order.side();
        let price = order.price();
        let id = order.id();
        let remaining = u64::from(order.remaining_quantity());

        let idx = self.arena.insert(OrderSlot::new(order));

        let ladder = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let level = ladder.entry(price).or_insert_with(LevelQueue::new);
        let old_tail = level.tail;
        level.tail = Some(idx);
        if level.head.is_none() {
            level.head = Some(idx);
        }
        level.order_count += 1;
        level.total_quantity += remaining;

        if let Some(tail_idx) = old_tail {
            self.arena[tail_idx].next = Some(idx);
            self.arena[idx].prev = Some(tail_idx);
        }

        self.index.insert(id, idx);
        idx
    }

    /// Unlink the slot from its level queue, erase the level if it became
    /// empty, and drop the order from index and arena. Returns the
    /// removed order.
    pub(super) fn remove_order(&mut self, idx: usize) -> Order {
        let OrderSlot { order, prev, next } = self.arena.remove(idx);
        self.index.remove(&order.id());

        let price = order.price();
        let level_emptied = {
            let ladder = match order.side() {
                Side::Buy => &mut self.bids,
                Side::Sell => &mut self.asks,
            };
            match ladder.get_mut(&price) {
                Some(level) => {
                    if level.head == Some(idx) {
                        level.head = next;
                    }
                    if level.tail == Some(idx) {
                        level.tail = prev;
                    }
                    level.order_count -= 1;
                    level.total_quantity -= u64::from(order.remaining_quantity());
                    level.is_empty()
                }
                None => false,
            }
        };

        if let Some(prev_idx) = prev {
            self.arena[prev_idx].next = next;
        }
        if let Some(next_idx) = next {
            self.arena[next_idx].prev = prev;
        }

        if level_emptied {
            match order.side() {
                Side::Buy => {
                    self.bids.remove(&price);
                }
                Side::Sell => {
                    self.asks.remove(&price);
                }
            }
        }

        order
    }

    /// Remove the order with `order_id` if it is resting. Returns whether
    /// anything was removed.
    pub(super) fn cancel(&mut self, order_id: OrderId) -> bool {
        match self.index.get(&order_id).copied() {
            Some(idx) => {
                self.remove_order(idx);
                true
            }
            None => false,
        }
    }
}

impl OrderBook {
    /// Create a new, empty order book for the given symbol
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            state: RwLock::new(BookState::new()),
            observer: RwLock::new(None),
        }
    }

    /// The symbol this book trades
    #[inline]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Install or remove the instrumentation hook.
    ///
    /// The hook is invoked once per public operation while the book lock
    /// is held; it must be non-blocking and must not call back into the
    /// book.
    pub fn set_observer(&self, observer: Option<BookObserver>) {
        *self.observer.write() = observer;
    }

    pub(super) fn notify(
        &self,
        operation: &'static str,
        started_at: Instant,
        orders_affected: usize,
    ) {
        if let Some(hook) = self.observer.read().as_ref() {
            let record = OperationRecord {
                operation,
                started_at,
                finished_at: Instant::now(),
                orders_affected,
            };
            hook(&record);
        }
    }

    /// Number of orders currently resting on the book
    pub fn size(&self) -> usize {
        let started_at = Instant::now();
        let state = self.state.read();
        let size = state.index.len();
        self.notify(op::SIZE, started_at, 0);
        size
    }

    /// True when no orders are resting
    pub fn is_empty(&self) -> bool {
        self.state.read().index.is_empty()
    }

    /// Highest resting bid price, if any
    pub fn best_bid(&self) -> Option<Price> {
        self.state.read().best_bid()
    }

    /// Lowest resting ask price, if any
    pub fn best_ask(&self) -> Option<Price> {
        self.state.read().best_ask()
    }

    /// Look up a resting order by id. Returns a copy of its current state.
    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        let state = self.state.read();
        state
            .index
            .get(&order_id)
            .map(|&idx| state.arena[idx].order.clone())
    }

    /// The resting orders at `price` on `side`, oldest first. Empty when
    /// the level does not exist.
    pub fn orders_at(&self, side: Side, price: Price) -> Vec<Order> {
        let state = self.state.read();
        let ladder = match side {
            Side::Buy => &state.bids,
            Side::Sell => &state.asks,
        };
        let mut orders = Vec::new();
        if let Some(level) = ladder.get(&price) {
            let mut cursor = level.head;
            while let Some(idx) = cursor {
                let slot = &state.arena[idx];
                orders.push(slot.order.clone());
                cursor = slot.next;
            }
        }
        orders
    }

    /// Take a consistent depth snapshot of both sides.
    ///
    /// Bids are returned best (highest) first, asks best (lowest) first;
    /// each level carries its 64-bit aggregate remaining quantity. The
    /// snapshot reflects a single moment: it is taken under the shared
    /// lock, so no concurrent mutation can be half-visible.
    pub fn snapshot(&self) -> OrderBookSnapshot {
        let started_at = Instant::now();
        let state = self.state.read();

        let bids = state
            .bids
            .iter()
            .rev()
            .map(|(&price, level)| LevelSnapshot {
                price,
                quantity: level.total_quantity,
            })
            .collect();
        let asks = state
            .asks
            .iter()
            .map(|(&price, level)| LevelSnapshot {
                price,
                quantity: level.total_quantity,
            })
            .collect();
        let orders_affected = state.index.len();

        let snapshot = OrderBookSnapshot {
            symbol: self.symbol.clone(),
            timestamp: current_time_millis(),
            bids,
            asks,
        };
        self.notify(op::GET_ORDER_INFOS, started_at, orders_affected);
        snapshot
    }

    /// Drop every resting order and both ladders. Idempotent.
    pub fn clear(&self) {
        let mut state = self.state.write();
        state.bids.clear();
        state.asks.clear();
        state.index.clear();
        state.arena.clear();
    }
}
