use crate::types::numeric::define_decimal_type;
use rust_decimal::Decimal;

define_decimal_type!(
    /// Dimensionless multiplier: fee rates, margin ratio, leverage, balance fractions.
    Ratio
);

impl Ratio {
    pub const ONE: Ratio = Ratio(Decimal::ONE);

    pub fn one() -> Self {
        Self::ONE
    }

    /// `0 <= r < 1`, the valid range for a fee rate.
    pub fn is_rate(&self) -> bool {
        self.0 >= Decimal::ZERO && self.0 < Decimal::ONE
    }

    /// `0 < r <= 1`.
    pub fn is_fraction(&self) -> bool {
        self.0 > Decimal::ZERO && self.0 <= Decimal::ONE
    }

    pub fn complement(&self) -> Ratio {
        Ratio(Decimal::ONE - self.0)
    }
}
