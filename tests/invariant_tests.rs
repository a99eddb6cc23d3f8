//! Structural invariants under mixed operation sequences.

use matchbook::prelude::*;

/// Deterministic pseudo-random stream so failures reproduce exactly.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

fn assert_book_not_crossed(book: &OrderBook) {
    if let (Some(best_bid), Some(best_ask)) = (book.best_bid(), book.best_ask()) {
        assert!(
            best_bid < best_ask,
            "book crossed at rest: bid {best_bid} >= ask {best_ask}"
        );
    }
}

fn assert_snapshot_well_formed(snapshot: &OrderBookSnapshot) {
    assert!(
        snapshot.bids.windows(2).all(|pair| pair[0].price > pair[1].price),
        "bids not strictly descending"
    );
    assert!(
        snapshot.asks.windows(2).all(|pair| pair[0].price < pair[1].price),
        "asks not strictly ascending"
    );
    assert!(
        snapshot.bids.iter().chain(snapshot.asks.iter()).all(|level| level.quantity > 0),
        "empty level present in snapshot"
    );
}

#[test]
fn mixed_workload_preserves_invariants() {
    let book = OrderBook::new("TEST");
    let mut rng = Lcg(0x5eed);
    let mut next_id: OrderId = 1;
    let mut known_ids: Vec<OrderId> = Vec::new();

    for step in 0..2_000u32 {
        match rng.next() % 10 {
            // Mostly adds, a mix of sides, prices and policies.
            0..=5 => {
                let side = if rng.next() % 2 == 0 { Side::Buy } else { Side::Sell };
                let price = 95 + (rng.next() % 11) as Price;
                let quantity = 1 + (rng.next() % 9) as Quantity;
                let time_in_force = match rng.next() % 5 {
                    0 => TimeInForce::Ioc,
                    1 => TimeInForce::Fok,
                    _ => TimeInForce::Gtc,
                };
                let id = next_id;
                next_id += 1;
                book.add_limit_order(id, price, quantity, side, time_in_force)
                    .unwrap();
                known_ids.push(id);
            }
            6..=7 => {
                if !known_ids.is_empty() {
                    let victim = known_ids[(rng.next() as usize) % known_ids.len()];
                    book.cancel_order(victim);
                }
            }
            _ => {
                if !known_ids.is_empty() {
                    let target = known_ids[(rng.next() as usize) % known_ids.len()];
                    let side = if rng.next() % 2 == 0 { Side::Buy } else { Side::Sell };
                    let price = 95 + (rng.next() % 11) as Price;
                    let quantity = 1 + (rng.next() % 9) as Quantity;
                    book.modify_order(OrderModify::new(target, side, price, quantity))
                        .unwrap();
                }
            }
        }

        assert_book_not_crossed(&book);
        if step % 16 == 0 {
            assert_snapshot_well_formed(&book.snapshot());
        }
    }

    // Reconcile the book against every order ever submitted: the index
    // holds exactly the live ids, and per-side depth equals the sum of
    // the live orders' remaining quantities.
    let mut live = 0usize;
    let mut bid_quantity = 0u64;
    let mut ask_quantity = 0u64;
    for id in 1..next_id {
        if let Some(order) = book.get_order(id) {
            live += 1;
            assert!(order.remaining_quantity() > 0, "filled order still indexed");
            match order.side() {
                Side::Buy => bid_quantity += u64::from(order.remaining_quantity()),
                Side::Sell => ask_quantity += u64::from(order.remaining_quantity()),
            }
        }
    }

    assert_eq!(book.size(), live);
    let snapshot = book.snapshot();
    assert_snapshot_well_formed(&snapshot);
    assert_eq!(snapshot.total_bid_quantity(), bid_quantity);
    assert_eq!(snapshot.total_ask_quantity(), ask_quantity);
}

#[test]
fn fills_never_exceed_initial_quantity() {
    let book = OrderBook::new("TEST");
    let mut rng = Lcg(0xfeed);
    let mut next_id: OrderId = 1;
    let mut initial_quantities: Vec<(OrderId, u64)> = Vec::new();
    let mut filled: std::collections::HashMap<OrderId, u64> = std::collections::HashMap::new();

    for _ in 0..500 {
        let side = if rng.next() % 2 == 0 { Side::Buy } else { Side::Sell };
        let price = 99 + (rng.next() % 3) as Price;
        let quantity = 1 + (rng.next() % 20) as Quantity;
        let id = next_id;
        next_id += 1;

        let trades = book
            .add_limit_order(id, price, quantity, side, TimeInForce::Gtc)
            .unwrap();
        initial_quantities.push((id, u64::from(quantity)));

        for trade in &trades {
            *filled.entry(trade.bid().order_id).or_default() += u64::from(trade.quantity());
            *filled.entry(trade.ask().order_id).or_default() += u64::from(trade.quantity());
            assert_eq!(trade.bid().quantity, trade.ask().quantity);
            assert_eq!(trade.bid().price, trade.ask().price);
        }
    }

    for (id, initial) in initial_quantities {
        let executed = filled.get(&id).copied().unwrap_or(0);
        assert!(
            executed <= initial,
            "order {id} executed {executed} beyond its size {initial}"
        );
        if let Some(order) = book.get_order(id) {
            assert_eq!(
                executed + u64::from(order.remaining_quantity()),
                initial,
                "order {id} lost quantity"
            );
        }
    }
}

#[test]
fn add_cancel_round_trip_is_identity() {
    let book = OrderBook::new("TEST");

    book.add_limit_order(1, 100, 10, Side::Buy, TimeInForce::Gtc)
        .unwrap();
    book.add_limit_order(2, 110, 10, Side::Sell, TimeInForce::Gtc)
        .unwrap();

    let before = book.snapshot();
    for id in 10..20u64 {
        book.add_limit_order(id, 105, 3, Side::Buy, TimeInForce::Gtc)
            .unwrap();
    }
    for id in 10..20u64 {
        book.cancel_order(id);
    }
    let after = book.snapshot();

    assert_eq!(before.bids, after.bids);
    assert_eq!(before.asks, after.asks);
    assert_eq!(book.size(), 2);
}
