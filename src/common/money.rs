use bigdecimal::BigDecimal;
use bigdecimal::*;
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
const SCALE: i64 = 10_000;

#[derive(Debug, Clone, Copy, Default)]
/// A struct representing monetary value in fractions of the smallest
/// currency unit.
///
/// # Why Use Money? It is a Value Object.
/// Using `Money` as a wrapper around `i64` provides type safety and prevents
/// confusion with other numeric values. By storing money as a scaled integer
/// we avoid the floating-point precision issues that plague monetary
/// calculations; parsing goes through `BigDecimal` so decimal text never
/// round-trips through an `f64`. The value is signed: netting deltas for
/// payments are negative.
///
/// The internal scale is 4 decimal places so that sub-cent residue from
/// uneven splits stays representable; display is at the currency's 2 decimal
/// places.
///
/// # Examples
/// ```
/// use splitledger::common::money::Money;
///
/// let amount = Money::new(12_500); // Represents 1.25 in currency
/// assert_eq!(amount.as_i64(), 12_500);
/// assert_eq!(amount.to_string(), "1.25");
/// assert_eq!(amount.to_string_4dp(), "1.2500");
/// ```
pub struct Money(i64);

impl Money {
    /// Minimum balance treated as a real outstanding debt (0.01 currency
    /// units). Net amounts at or below this are rounding noise.
    pub const EPSILON: Money = Money(100);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Half of this amount, rounded half-up to the nearest cent. The default
    /// share of an expense split two ways.
    pub fn half_to_cent(&self) -> Money {
        debug_assert!(self.0 >= 0, "totals are non-negative");
        Money((self.0 + 100) / 200 * 100)
    }

    /// Exact 4-decimal form, used by the ledger file so stored amounts
    /// round-trip losslessly.
    pub fn to_string_4dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.4}", bd)
    }

    /// Display form at the currency's 2 decimal places.
    pub fn to_string_2dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.2}", bd)
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;

        // Scale to 4 decimal places
        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_2dp())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Money {}

impl Ord for Money {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
