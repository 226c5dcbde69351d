use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};
use crate::types::ratio::Ratio;
use crate::types::side::Liquidity;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FeeSchedule {
    pub maker_fee_rate: Ratio,
    pub taker_fee_rate: Ratio,
}

impl FeeSchedule {
    pub fn rate_for(&self, liquidity: Liquidity) -> Ratio {
        match liquidity {
            Liquidity::Maker => self.maker_fee_rate,
            Liquidity::Taker => self.taker_fee_rate,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [("maker fee", self.maker_fee_rate), ("taker fee", self.taker_fee_rate)] {
            if !rate.is_rate() {
                return Err(Error::InvalidConfig(format!("{} must be in [0, 1), got {}", name, rate)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn picks_rate_by_liquidity() {
        let fees = FeeSchedule {
            maker_fee_rate: Ratio::new(dec!(0.0002)),
            taker_fee_rate: Ratio::new(dec!(0.0005)),
        };
        assert_eq!(fees.rate_for(Liquidity::Maker), Ratio::new(dec!(0.0002)));
        assert_eq!(fees.rate_for(Liquidity::Taker), Ratio::new(dec!(0.0005)));
    }

    #[test]
    fn rejects_rates_outside_unit_interval() {
        let fees = FeeSchedule {
            maker_fee_rate: Ratio::new(dec!(-0.0001)),
            taker_fee_rate: Ratio::new(dec!(0.0005)),
        };
        assert!(matches!(fees.validate(), Err(Error::InvalidConfig(_))));

        let fees = FeeSchedule {
            maker_fee_rate: Ratio::zero(),
            taker_fee_rate: Ratio::one(),
        };
        assert!(matches!(fees.validate(), Err(Error::InvalidConfig(_))));
    }
}
