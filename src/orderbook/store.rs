use std::collections::HashMap;
use std::sync::Arc;
use chrono::Utc;
use crate::orderbook::book::{BookLevel, OrderBookSnapshot};
use crate::types::ids::PairSymbol;
use crate::types::side::BookSide;

/// Latest snapshot per pair. Only `replace` and `apply_updates` mutate.
#[derive(Default)]
pub struct OrderBookStore {
    books: HashMap<PairSymbol, Arc<OrderBookSnapshot>>,
}

impl OrderBookStore {
    pub fn new() -> Self {
        OrderBookStore {
            books: HashMap::new(),
        }
    }

    /// Swap in a fresh snapshot, stamping it with the next sequence number.
    pub fn replace(&mut self, mut snapshot: OrderBookSnapshot) -> Arc<OrderBookSnapshot> {
        snapshot.sequence = self.next_sequence(&snapshot.symbol);
        snapshot.updated_at = Utc::now();

        let snapshot = Arc::new(snapshot);
        self.books.insert(snapshot.symbol.clone(), Arc::clone(&snapshot));
        snapshot
    }

    /// Copy-on-write update of one side. Readers holding the previous `Arc`
    /// keep seeing the old ladders.
    pub fn apply_updates(
        &mut self,
        symbol: &PairSymbol,
        side: BookSide,
        updates: Vec<BookLevel>,
    ) -> Arc<OrderBookSnapshot> {
        let mut snapshot = match self.books.get(symbol) {
            Some(current) => OrderBookSnapshot::clone(current),
            None => OrderBookSnapshot::empty(symbol.clone()),
        };
        snapshot.apply_updates(side, updates);
        self.replace(snapshot)
    }

    pub fn get(&self, symbol: &PairSymbol) -> Option<Arc<OrderBookSnapshot>> {
        self.books.get(symbol).cloned()
    }

    /// Snapshot for `symbol`, or an empty one if nothing was loaded yet.
    pub fn get_or_empty(&self, symbol: &PairSymbol) -> Arc<OrderBookSnapshot> {
        self.get(symbol)
            .unwrap_or_else(|| Arc::new(OrderBookSnapshot::empty(symbol.clone())))
    }

    fn next_sequence(&self, symbol: &PairSymbol) -> u64 {
        self.books.get(symbol).map_or(1, |book| book.sequence + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::book::tests::level;
    use crate::types::price::Price;
    use rust_decimal_macros::dec;

    #[test]
    fn replace_is_wholesale_and_sequenced() {
        let symbol = PairSymbol::from("BTC-USD");
        let mut store = OrderBookStore::new();

        let first = store.replace(OrderBookSnapshot::from_levels(
            symbol.clone(),
            vec![level(dec!(100), dec!(1)), level(dec!(101), dec!(1))],
            vec![level(dec!(99), dec!(1))],
        ));
        assert_eq!(first.sequence, 1);

        let second = store.replace(OrderBookSnapshot::from_levels(
            symbol.clone(),
            vec![level(dec!(200), dec!(1))],
            vec![],
        ));
        assert_eq!(second.sequence, 2);

        let current = store.get(&symbol).unwrap();
        assert_eq!(current.asks.len(), 1);
        assert!(current.bids.is_empty());
        assert_eq!(current.best_ask(), Some(Price::new(dec!(200))));

        // The earlier snapshot is untouched.
        assert_eq!(first.asks.len(), 2);
    }

    #[test]
    fn updates_start_from_empty_for_unknown_symbol() {
        let symbol = PairSymbol::from("ETH-USD");
        let mut store = OrderBookStore::new();
        assert!(store.get(&symbol).is_none());
        assert!(store.get_or_empty(&symbol).is_empty());

        let book = store.apply_updates(&symbol, BookSide::Bids, vec![level(dec!(10), dec!(2))]);
        assert_eq!(book.best_bid(), Some(Price::new(dec!(10))));
        assert_eq!(book.sequence, 1);
    }

    #[test]
    fn updates_do_not_leak_into_held_snapshots() {
        let symbol = PairSymbol::from("BTC-USD");
        let mut store = OrderBookStore::new();
        let held = store.replace(OrderBookSnapshot::from_levels(symbol.clone(), vec![level(dec!(100), dec!(1))], vec![]));

        let updated = store.apply_updates(&symbol, BookSide::Asks, vec![level(dec!(100), dec!(0))]);
        assert!(updated.asks.is_empty());
        assert_eq!(held.asks.len(), 1);
    }
}
