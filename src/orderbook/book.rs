use std::cmp::Reverse;
use std::collections::BTreeMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::types::ids::PairSymbol;
use crate::types::price::Price;
use crate::types::quantity::Quantity;
use crate::types::side::BookSide;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Price,
    pub size: Quantity,
}

impl BookLevel {
    pub fn new(price: Price, size: Quantity) -> Self {
        BookLevel { price, size }
    }
}

/// Ask and bid ladders for one pair. Replaced wholesale on refresh; readers hold
/// it behind an `Arc` so a refresh never mutates a snapshot someone is reading.
#[derive(Clone, Debug)]
pub struct OrderBookSnapshot {
    pub symbol: PairSymbol,
    pub asks: BTreeMap<Price, Quantity>,             // Sorted ascending
    pub bids: BTreeMap<Reverse<Price>, Quantity>,    // Sorted descending
    pub sequence: u64,
    pub updated_at: DateTime<Utc>,
}

/// Serializable view of a snapshot, asks ascending and bids descending.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepthView {
    pub symbol: PairSymbol,
    pub sequence: u64,
    pub updated_at: DateTime<Utc>,
    pub asks: Vec<BookLevel>,
    pub bids: Vec<BookLevel>,
}

impl OrderBookSnapshot {
    pub fn empty(symbol: PairSymbol) -> Self {
        OrderBookSnapshot {
            symbol,
            asks: BTreeMap::new(),
            bids: BTreeMap::new(),
            sequence: 0,
            updated_at: Utc::now(),
        }
    }

    /// Build from untrusted ladders: unsorted input is ordered, the last level
    /// at a repeated price wins, and levels with a non-positive price or size
    /// are dropped.
    pub fn from_levels(symbol: PairSymbol, asks: Vec<BookLevel>, bids: Vec<BookLevel>) -> Self {
        let mut book = Self::empty(symbol);
        for level in asks {
            if book.accepts(&level) {
                book.asks.insert(level.price, level.size);
            }
        }
        for level in bids {
            if book.accepts(&level) {
                book.bids.insert(Reverse(level.price), level.size);
            }
        }
        book
    }

    fn accepts(&self, level: &BookLevel) -> bool {
        if level.price.is_positive() && level.size.is_positive() {
            return true;
        }
        tracing::debug!(
            symbol = %self.symbol,
            price = %level.price,
            size = %level.size,
            "Dropping malformed book level"
        );
        false
    }

    /// Incremental update of one side: size zero removes the level, anything
    /// else overwrites it. Negative sizes and non-positive prices are ignored.
    pub fn apply_updates(&mut self, side: BookSide, updates: Vec<BookLevel>) {
        for level in updates {
            if !level.price.is_positive() || level.size.is_negative() {
                tracing::debug!(
                    symbol = %self.symbol,
                    price = %level.price,
                    size = %level.size,
                    "Ignoring malformed level update"
                );
                continue;
            }
            match side {
                BookSide::Asks => {
                    if level.size.is_zero() {
                        self.asks.remove(&level.price);
                    } else {
                        self.asks.insert(level.price, level.size);
                    }
                }
                BookSide::Bids => {
                    if level.size.is_zero() {
                        self.bids.remove(&Reverse(level.price));
                    } else {
                        self.bids.insert(Reverse(level.price), level.size);
                    }
                }
            }
        }
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.keys().next().map(|Reverse(p)| *p)
    }

    pub fn best_price(&self, side: BookSide) -> Option<Price> {
        match side {
            BookSide::Asks => self.best_ask(),
            BookSide::Bids => self.best_bid(),
        }
    }

    pub fn spread(&self) -> Option<Price> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some(ask - bid),
            _ => None,
        }
    }

    pub fn is_crossed(&self) -> bool {
        matches!((self.best_ask(), self.best_bid()), (Some(ask), Some(bid)) if bid >= ask)
    }

    pub fn ensure_uncrossed(&self) -> Result<()> {
        match (self.best_ask(), self.best_bid()) {
            (Some(best_ask), Some(best_bid)) if best_bid >= best_ask => {
                Err(Error::CrossedBook { best_bid, best_ask })
            }
            _ => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.asks.is_empty() && self.bids.is_empty()
    }

    /// Levels of one side in walking order (asks ascending, bids descending).
    pub fn levels(&self, side: BookSide) -> Box<dyn Iterator<Item = BookLevel> + '_> {
        match side {
            BookSide::Asks => Box::new(self.asks.iter().map(|(p, q)| BookLevel::new(*p, *q))),
            BookSide::Bids => Box::new(self.bids.iter().map(|(Reverse(p), q)| BookLevel::new(*p, *q))),
        }
    }

    pub fn depth(&self) -> (Vec<BookLevel>, Vec<BookLevel>) {
        (self.levels(BookSide::Asks).collect(), self.levels(BookSide::Bids).collect())
    }

    pub fn view(&self) -> DepthView {
        let (asks, bids) = self.depth();
        DepthView {
            symbol: self.symbol.clone(),
            sequence: self.sequence,
            updated_at: self.updated_at,
            asks,
            bids,
        }
    }

    /// Bucket both sides by `floor(price / grouping) * grouping`, summing sizes.
    pub fn group_prices(&self, grouping: Price) -> Result<(Vec<BookLevel>, Vec<BookLevel>)> {
        let mut asks: BTreeMap<Price, Quantity> = BTreeMap::new();
        for level in self.levels(BookSide::Asks) {
            let bucket = asks.entry(level.price.floor_to(grouping)?).or_insert(Quantity::zero());
            *bucket = bucket.checked_add(level.size)?;
        }

        let mut bids: BTreeMap<Reverse<Price>, Quantity> = BTreeMap::new();
        for level in self.levels(BookSide::Bids) {
            let bucket = bids.entry(Reverse(level.price.floor_to(grouping)?)).or_insert(Quantity::zero());
            *bucket = bucket.checked_add(level.size)?;
        }

        Ok((
            asks.into_iter().map(|(p, q)| BookLevel::new(p, q)).collect(),
            bids.into_iter().map(|(Reverse(p), q)| BookLevel::new(p, q)).collect(),
        ))
    }
}
