use std::sync::Arc;
use parking_lot::RwLock;
use crate::account::balances::AccountState;
use crate::config::loader::AppConfig;
use crate::config::market::PairConfig;
use crate::error::{Error, Result};
use crate::interfaces::balance_provider::BalanceProvider;
use crate::observability::metrics::{
    BALANCE_UPDATES, BOOK_REFRESHES, ORDERS_COMPUTED, ORDERS_REJECTED, SIZING_LATENCY,
};
use crate::observability::tracing::{trace_book_refresh, trace_order_sizing};
use crate::orderbook::book::{BookLevel, OrderBookSnapshot};
use crate::orderbook::fill::{FillEstimate, FillTarget};
use crate::orderbook::store::OrderBookStore;
use crate::registry::pair_registry::PairRegistry;
use crate::sizing::intent::OrderIntent;
use crate::sizing::order::ComputedOrder;
use crate::sizing::sizer::OrderSizer;
use crate::types::balance::Balance;
use crate::types::ids::{PairSymbol, TokenId};
use crate::types::price::Price;
use crate::types::ratio::Ratio;
use crate::types::side::{BookSide, Side};

/// Owns the pair registry, the book store and account state.
///
/// Each store has its own lock. Operations that need more than one take them
/// in the order registry, books, accounts. Sizing holds all three read guards
/// so it sees one consistent state.
pub struct OrderComputeEngine {
    pairs: RwLock<PairRegistry>,
    books: RwLock<OrderBookStore>,
    accounts: RwLock<AccountState>,
    sizer: OrderSizer,
}

impl Default for OrderComputeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderComputeEngine {
    pub fn new() -> Self {
        OrderComputeEngine {
            pairs: RwLock::new(PairRegistry::new()),
            books: RwLock::new(OrderBookStore::new()),
            accounts: RwLock::new(AccountState::new()),
            sizer: OrderSizer::new(),
        }
    }

    /// Register every configured pair and activate `engine.active_pair`.
    /// Any invalid entry fails the whole construction.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut registry = PairRegistry::new();
        for pair in &config.pairs {
            registry.register_or_update(pair.clone())?;
        }
        if let Some(active) = config.engine.active_pair.as_deref() {
            registry.set_active(&PairSymbol::from(active))?;
        }

        tracing::info!(
            pairs = registry.len(),
            active = ?registry.active_symbol(),
            "Order compute engine initialized"
        );

        let engine = Self::new();
        *engine.pairs.write() = registry;
        Ok(engine)
    }

    // ===== Pair registry =====

    pub fn register_or_update_pair(&self, config: PairConfig) -> Result<()> {
        let symbol = config.symbol.clone();
        let replaced = self.pairs.write().register_or_update(config)?;
        tracing::info!(symbol = %symbol, replaced = replaced.is_some(), "Pair registered");
        Ok(())
    }

    /// Register and mark active under a single registry write.
    pub fn register_and_activate(&self, config: PairConfig) -> Result<()> {
        let symbol = config.symbol.clone();
        let replaced = self.pairs.write().register_and_activate(config)?;
        tracing::info!(symbol = %symbol, replaced = replaced.is_some(), "Pair registered and activated");
        Ok(())
    }

    pub fn change_leverage(&self, symbol: &PairSymbol, leverage: Ratio, max_notional: Balance) -> Result<PairConfig> {
        let mut pairs = self.pairs.write();
        let updated = pairs.change_leverage(symbol, leverage, max_notional)?.clone();
        tracing::info!(
            symbol = %symbol,
            leverage = %leverage,
            max_notional = %max_notional,
            "Leverage changed"
        );
        Ok(updated)
    }

    /// Leverage change on whichever pair is active when the write lock is taken.
    pub fn change_active_leverage(&self, leverage: Ratio, max_notional: Balance) -> Result<PairConfig> {
        let mut pairs = self.pairs.write();
        let symbol = pairs.active_symbol().cloned().ok_or(Error::NoActivePairSet)?;
        let updated = pairs.change_leverage(&symbol, leverage, max_notional)?.clone();
        tracing::info!(
            symbol = %symbol,
            leverage = %leverage,
            max_notional = %max_notional,
            "Leverage changed"
        );
        Ok(updated)
    }

    pub fn get_active_pair(&self) -> Result<PairConfig> {
        self.pairs.read().active().cloned()
    }

    pub fn set_active_pair(&self, symbol: &PairSymbol) -> Result<()> {
        self.pairs.write().set_active(symbol)?;
        tracing::info!(symbol = %symbol, "Active pair changed");
        Ok(())
    }

    pub fn pair_exists(&self, symbol: &str) -> bool {
        self.pairs.read().contains(symbol)
    }

    pub fn symbols(&self) -> Vec<PairSymbol> {
        self.pairs.read().symbols()
    }

    // ===== Order books =====

    /// Wholesale swap of the book for `symbol`. Untrusted ladders are
    /// normalized, and crossed books are stored as received.
    pub fn replace_book(&self, symbol: PairSymbol, asks: Vec<BookLevel>, bids: Vec<BookLevel>) -> Arc<OrderBookSnapshot> {
        let span = trace_book_refresh(&symbol);
        let _enter = span.enter();

        let snapshot = OrderBookSnapshot::from_levels(symbol, asks, bids);
        let stored = self.books.write().replace(snapshot);
        Self::record_refresh(&stored);
        stored
    }

    /// Replace the active pair's book. The registry read guard is held across
    /// the swap so the active pair cannot change underneath it.
    pub fn replace_active_book(&self, asks: Vec<BookLevel>, bids: Vec<BookLevel>) -> Result<Arc<OrderBookSnapshot>> {
        let pairs = self.pairs.read();
        let symbol = pairs.active()?.symbol.clone();

        let span = trace_book_refresh(&symbol);
        let _enter = span.enter();

        let snapshot = OrderBookSnapshot::from_levels(symbol, asks, bids);
        let stored = self.books.write().replace(snapshot);
        drop(pairs);

        Self::record_refresh(&stored);
        Ok(stored)
    }

    pub fn apply_book_updates(&self, symbol: &PairSymbol, side: BookSide, levels: Vec<BookLevel>) -> Arc<OrderBookSnapshot> {
        let span = trace_book_refresh(symbol);
        let _enter = span.enter();

        let stored = self.books.write().apply_updates(symbol, side, levels);
        Self::record_refresh(&stored);
        stored
    }

    pub fn apply_active_book_updates(&self, side: BookSide, levels: Vec<BookLevel>) -> Result<Arc<OrderBookSnapshot>> {
        let pairs = self.pairs.read();
        let symbol = pairs.active()?.symbol.clone();
        let stored = self.books.write().apply_updates(&symbol, side, levels);
        drop(pairs);

        Self::record_refresh(&stored);
        Ok(stored)
    }

    pub fn book(&self, symbol: &PairSymbol) -> Option<Arc<OrderBookSnapshot>> {
        self.books.read().get(symbol)
    }

    /// Book of the active pair, empty if none was loaded yet.
    pub fn active_book(&self) -> Result<Arc<OrderBookSnapshot>> {
        let pairs = self.pairs.read();
        let symbol = &pairs.active()?.symbol;
        Ok(self.books.read().get_or_empty(symbol))
    }

    /// Dry-run walk of the active book.
    pub fn estimate_fill(&self, side: Side, target: FillTarget) -> Result<FillEstimate> {
        self.active_book()?.estimate_fill(side, target)
    }

    pub fn group_active_book(&self, grouping: Price) -> Result<(Vec<BookLevel>, Vec<BookLevel>)> {
        self.active_book()?.group_prices(grouping)
    }

    fn record_refresh(book: &OrderBookSnapshot) {
        BOOK_REFRESHES.inc();
        if book.is_crossed() {
            tracing::warn!(
                symbol = %book.symbol,
                best_bid = ?book.best_bid(),
                best_ask = ?book.best_ask(),
                "Stored crossed book"
            );
        }
        tracing::debug!(
            symbol = %book.symbol,
            sequence = book.sequence,
            asks = book.asks.len(),
            bids = book.bids.len(),
            "Book refreshed"
        );
    }

    // ===== Account state =====

    pub fn update_balance(&self, token: TokenId, balance: Balance) -> Result<()> {
        let previous = self.accounts.write().update_balance(token.clone(), balance)?;
        BALANCE_UPDATES.inc();
        tracing::debug!(token = %token, previous = %previous, balance = %balance, "Balance updated");
        Ok(())
    }

    pub fn get_balance(&self, token: &TokenId) -> Balance {
        self.accounts.read().balance_of(token)
    }

    // ===== Sizing =====

    /// Size `intent` against the active pair.
    pub fn compute_open_order(&self, intent: &OrderIntent) -> Result<ComputedOrder> {
        let result = self.compute_with(intent, |pairs| pairs.active());
        Self::record_outcome(&result);
        result
    }

    /// Size `intent` against a specific registered pair, active or not.
    pub fn compute_order_for(&self, symbol: &PairSymbol, intent: &OrderIntent) -> Result<ComputedOrder> {
        let result = self.compute_with(intent, |pairs| pairs.get(symbol));
        Self::record_outcome(&result);
        result
    }

    fn compute_with<F>(&self, intent: &OrderIntent, select: F) -> Result<ComputedOrder>
    where
        F: for<'a> FnOnce(&'a PairRegistry) -> Result<&'a PairConfig>,
    {
        let pairs = self.pairs.read();
        let books = self.books.read();
        let accounts = self.accounts.read();

        let pair = select(&*pairs)?;
        let book = books.get_or_empty(&pair.symbol);

        let span = trace_order_sizing(&pair.symbol, intent.side());
        let _enter = span.enter();
        let timer = SIZING_LATENCY.start_timer();

        let result = self.sizer.compute(pair, &book, &*accounts, intent);
        timer.observe_duration();
        result
    }

    fn record_outcome(result: &Result<ComputedOrder>) {
        match result {
            Ok(order) => {
                ORDERS_COMPUTED.inc();
                tracing::debug!(
                    symbol = %order.symbol,
                    quantity = %order.quantity,
                    price = %order.price,
                    notional = %order.notional,
                    "Order computed"
                );
            }
            Err(err) => {
                ORDERS_REJECTED.with_label_values(&[err.kind()]).inc();
                tracing::warn!(kind = err.kind(), error = %err, "Order rejected");
            }
        }
    }
}
