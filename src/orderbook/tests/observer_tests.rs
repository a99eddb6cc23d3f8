//! Observer hook behaviour: event names, counts, and ordering.

use super::test_helpers::{fok, gtc};
use crate::orderbook::book::OrderBook;
use crate::orderbook::order::{OrderModify, Side};
use crate::orderbook::tracker::{op, BookObserver, OperationRecord};
use std::sync::{Arc, Mutex};

type Recorded = Arc<Mutex<Vec<(&'static str, usize)>>>;

fn recording_observer() -> (BookObserver, Recorded) {
    let records: Recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&records);
    let observer: BookObserver = Arc::new(move |record: &OperationRecord| {
        assert!(record.finished_at >= record.started_at);
        sink.lock()
            .unwrap()
            .push((record.operation, record.orders_affected));
    });
    (observer, records)
}

#[test]
fn test_successful_add_emits_match_then_success() {
    let book = OrderBook::new("TEST");
    let (observer, records) = recording_observer();
    book.set_observer(Some(observer));

    book.add_order(gtc(1, Side::Sell, 100, 10)).unwrap();

    let events = records.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![(op::MATCH_ORDERS, 0), (op::ADD_ORDER_SUCCESS, 1)]
    );
}

#[test]
fn test_crossing_add_reports_trade_count() {
    let book = OrderBook::new("TEST");
    book.add_order(gtc(1, Side::Sell, 100, 5)).unwrap();
    book.add_order(gtc(2, Side::Sell, 100, 5)).unwrap();

    let (observer, records) = recording_observer();
    book.set_observer(Some(observer));
    book.add_order(gtc(3, Side::Buy, 100, 10)).unwrap();

    let events = records.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![(op::MATCH_ORDERS, 2), (op::ADD_ORDER_SUCCESS, 1)]
    );
}

#[test]
fn test_rejected_add_emits_single_event() {
    let book = OrderBook::new("TEST");
    let (observer, records) = recording_observer();
    book.set_observer(Some(observer));

    book.add_order(fok(1, Side::Buy, 100, 10)).unwrap();

    let events = records.lock().unwrap().clone();
    assert_eq!(events, vec![(op::ADD_ORDER_REJECTED, 0)]);
}

#[test]
fn test_cancel_events() {
    let book = OrderBook::new("TEST");
    book.add_order(gtc(1, Side::Buy, 100, 10)).unwrap();

    let (observer, records) = recording_observer();
    book.set_observer(Some(observer));

    book.cancel_order(1);
    book.cancel_order(1);

    let events = records.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            (op::CANCEL_ORDER_SUCCESS, 1),
            (op::CANCEL_ORDER_NOT_FOUND, 0)
        ]
    );
}

#[test]
fn test_modify_events() {
    let book = OrderBook::new("TEST");
    book.add_order(gtc(1, Side::Buy, 100, 10)).unwrap();

    let (observer, records) = recording_observer();
    book.set_observer(Some(observer));

    book.modify_order(OrderModify::new(1, Side::Buy, 101, 10))
        .unwrap();
    book.modify_order(OrderModify::new(77, Side::Buy, 101, 10))
        .unwrap();

    let events = records.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            (op::MATCH_ORDERS, 0),
            (op::MATCH_ORDER_SUCCESS, 1),
            (op::MATCH_ORDER_NOT_FOUND, 0)
        ]
    );
}

#[test]
fn test_read_operation_events() {
    let book = OrderBook::new("TEST");
    book.add_order(gtc(1, Side::Buy, 100, 10)).unwrap();
    book.add_order(gtc(2, Side::Sell, 105, 10)).unwrap();

    let (observer, records) = recording_observer();
    book.set_observer(Some(observer));

    book.size();
    book.snapshot();

    let events = records.lock().unwrap().clone();
    assert_eq!(events, vec![(op::SIZE, 0), (op::GET_ORDER_INFOS, 2)]);
}

#[test]
fn test_removing_observer_stops_events() {
    let book = OrderBook::new("TEST");
    let (observer, records) = recording_observer();
    book.set_observer(Some(observer));

    book.size();
    book.set_observer(None);
    book.size();
    book.add_order(gtc(1, Side::Buy, 100, 10)).unwrap();

    let events = records.lock().unwrap().clone();
    assert_eq!(events, vec![(op::SIZE, 0)]);
}
