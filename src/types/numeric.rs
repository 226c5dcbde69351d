use rust_decimal::{Decimal, RoundingStrategy};
use crate::error::{Error, Result};

/// Largest scale a `Decimal` can carry.
pub const MAX_PRECISION: u32 = 28;

/// Parse decimal-formatted text without going through binary floating point.
///
/// Plain notation is parsed exactly; scientific notation (`1e-3`) is accepted as
/// a fallback. Surrounding whitespace is ignored.
pub fn parse_decimal(field: &str, text: &str) -> Result<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(invalid_format(field, text));
    }

    Decimal::from_str_exact(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| invalid_format(field, text))
}

/// Like [`parse_decimal`], but empty text means "absent".
pub fn parse_optional_decimal(field: &str, text: Option<&str>) -> Result<Option<Decimal>> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_decimal(field, value).map(Some),
    }
}

/// Round toward zero. Quantities are never rounded up.
pub fn round_down(value: Decimal, precision: u32) -> Decimal {
    value.round_dp_with_strategy(precision.min(MAX_PRECISION), RoundingStrategy::ToZero)
}

pub fn checked_mul(operation: &'static str, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_mul(rhs).ok_or(Error::Overflow { operation })
}

pub fn checked_add(operation: &'static str, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_add(rhs).ok_or(Error::Overflow { operation })
}

pub fn checked_div(operation: &'static str, lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    if rhs.is_zero() {
        return Err(Error::DivisionByZero);
    }
    lhs.checked_div(rhs).ok_or(Error::Overflow { operation })
}

fn invalid_format(field: &str, text: &str) -> Error {
    Error::InvalidNumericFormat {
        field: field.to_string(),
        value: text.to_string(),
    }
}

/// Shared surface of the decimal newtypes. Each type adds the cross-type
/// arithmetic that makes sense for it in its own module.
macro_rules! define_decimal_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(rust_decimal::Decimal);

        impl $name {
            pub const ZERO: $name = $name(rust_decimal::Decimal::ZERO);

            pub fn new(value: rust_decimal::Decimal) -> Self {
                $name(value)
            }

            pub fn zero() -> Self {
                Self::ZERO
            }

            pub fn parse(field: &str, text: &str) -> $crate::error::Result<Self> {
                $crate::types::numeric::parse_decimal(field, text).map($name)
            }

            pub fn as_decimal(&self) -> rust_decimal::Decimal {
                self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            pub fn is_positive(&self) -> bool {
                self.0 > rust_decimal::Decimal::ZERO
            }

            pub fn is_negative(&self) -> bool {
                self.0 < rust_decimal::Decimal::ZERO
            }

            pub fn round_down(&self, precision: u32) -> Self {
                $name($crate::types::numeric::round_down(self.0, precision))
            }

            pub fn checked_add(self, other: Self) -> $crate::error::Result<Self> {
                $crate::types::numeric::checked_add(stringify!($name), self.0, other.0).map($name)
            }

            pub fn min(self, other: Self) -> Self {
                $name(self.0.min(other.0))
            }
        }

        impl From<rust_decimal::Decimal> for $name {
            fn from(value: rust_decimal::Decimal) -> Self {
                $name(value)
            }
        }

        impl std::ops::Sub for $name {
            type Output = $name;
            fn sub(self, other: $name) -> $name {
                $name(self.0 - other.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use define_decimal_type;
