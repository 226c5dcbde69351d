use std::collections::HashMap;
use crate::config::market::PairConfig;
use crate::error::{Error, Result};
use crate::types::balance::Balance;
use crate::types::ids::PairSymbol;
use crate::types::ratio::Ratio;

/// Configured pairs plus the one currently marked active.
#[derive(Debug, Default)]
pub struct PairRegistry {
    pairs: HashMap<PairSymbol, PairConfig>,
    active: Option<PairSymbol>,
}

impl PairRegistry {
    pub fn new() -> Self {
        PairRegistry {
            pairs: HashMap::new(),
            active: None,
        }
    }

    /// Insert or fully replace the entry keyed by `config.symbol`.
    /// Returns the replaced configuration, if any.
    pub fn register_or_update(&mut self, config: PairConfig) -> Result<Option<PairConfig>> {
        config.validate()?;
        Ok(self.pairs.insert(config.symbol.clone(), config))
    }

    /// Register and activate in one step.
    pub fn register_and_activate(&mut self, config: PairConfig) -> Result<Option<PairConfig>> {
        let symbol = config.symbol.clone();
        let replaced = self.register_or_update(config)?;
        self.active = Some(symbol);
        Ok(replaced)
    }

    /// Mutates only leverage and max notional.
    pub fn change_leverage(
        &mut self,
        symbol: &PairSymbol,
        leverage: Ratio,
        max_notional: Balance,
    ) -> Result<&PairConfig> {
        let pair = self.pairs.get_mut(symbol)
            .ok_or_else(|| Error::PairNotFound(symbol.clone()))?;

        PairConfig::validate_leverage(leverage, max_notional)?;

        pair.leverage = leverage;
        pair.max_notional = max_notional;
        Ok(pair)
    }

    pub fn get(&self, symbol: &PairSymbol) -> Result<&PairConfig> {
        self.pairs.get(symbol)
            .ok_or_else(|| Error::PairNotFound(symbol.clone()))
    }

    pub fn active(&self) -> Result<&PairConfig> {
        let symbol = self.active.as_ref().ok_or(Error::NoActivePairSet)?;
        self.get(symbol)
    }

    pub fn active_symbol(&self) -> Option<&PairSymbol> {
        self.active.as_ref()
    }

    pub fn set_active(&mut self, symbol: &PairSymbol) -> Result<()> {
        if !self.pairs.contains_key(symbol) {
            return Err(Error::PairNotFound(symbol.clone()));
        }
        self.active = Some(symbol.clone());
        Ok(())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.pairs.contains_key(symbol)
    }

    pub fn symbols(&self) -> Vec<PairSymbol> {
        let mut symbols: Vec<PairSymbol> = self.pairs.keys().cloned().collect();
        symbols.sort();
        symbols
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
