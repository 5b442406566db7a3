use serde::{Deserialize, Serialize};

/// Currency amount in minor units (paise). Integer arithmetic only so the
/// fixed-bid bound and hourly totals are exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(pub i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(100))
    }

    pub fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    pub fn paise(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// True when `self <= other * 1.5`, computed as `self * 2 <= other * 3`
    /// to stay in integers. Saturating: an amount near i64::MAX fails the
    /// bound instead of wrapping.
    pub fn within_1p5_of(self, other: Money) -> bool {
        self.0.saturating_mul(2) <= other.0.saturating_mul(3)
    }

    /// Total for an hourly engagement: rate * hours, clamped at i64::MAX
    /// rather than wrapping on caller-supplied extremes.
    pub fn times_hours(self, hours: u32) -> Money {
        Money(self.0.saturating_mul(hours as i64))
    }
}

impl std::ops::Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "₹{}.{:02}", self.0 / 100, (self.0 % 100).abs())
    }
}
