use std::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{Currency, EngineError, ResultEngine};

/// Signed money amount represented as integer **ticks**.
///
/// One minor unit (a cent, a paisa, a yen) is [`Money::TICKS_PER_MINOR`] ticks.
/// 720 720 is divisible by every group size from 1 to 16, so splitting an
/// expense evenly stays exact for those groups; larger groups leave at most a
/// one-tick remainder per participant, which the engine hands out
/// deterministically so ledgers always sum to zero.
///
/// Use this type for **all** monetary values in the engine to avoid
/// floating-point drift. Rounding to minor units only happens for display.
///
/// # Examples
///
/// ```rust
/// use engine::{Currency, Money};
///
/// let amount = Money::from_minor(12_34).unwrap();
/// assert_eq!(amount.round_to_minor(), 1234);
/// assert_eq!(amount.format(Currency::Eur), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects
/// more decimals than the currency has):
///
/// ```rust
/// use engine::{Currency, Money};
///
/// assert_eq!(Money::parse("10,5", Currency::Eur).unwrap().round_to_minor(), 1050);
/// assert!(Money::parse("12.345", Currency::Eur).is_err());
/// assert!(Money::parse("100.5", Currency::Jpy).is_err());
/// ```
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Ticks in one minor currency unit.
    pub const TICKS_PER_MINOR: i64 = 720_720;

    /// Half a minor unit: the noise threshold below which balances count as settled.
    pub const HALF_MINOR: Money = Money(Self::TICKS_PER_MINOR / 2);

    /// Creates an amount from raw ticks.
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    /// Returns the raw value in ticks.
    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.0
    }

    /// Creates an amount from integer minor units (cents).
    pub fn from_minor(minor: i64) -> ResultEngine<Self> {
        minor
            .checked_mul(Self::TICKS_PER_MINOR)
            .map(Self)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))
    }

    /// Converts a decimal amount in major units (e.g. `10.5` EUR).
    ///
    /// Rejects NaN and infinities. Sub-minor precision is kept down to one tick.
    pub fn from_major(value: f64, currency: Currency) -> ResultEngine<Self> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be a finite number, got {value}"
            )));
        }
        let ticks =
            (value * currency.minor_per_major() as f64 * Self::TICKS_PER_MINOR as f64).round();
        if ticks.abs() >= i64::MAX as f64 {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Ok(Self(ticks as i64))
    }

    /// Parses a decimal string in major units of `currency`.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - at most `currency.minor_units()` fractional digits
    /// - rejects empty/invalid strings
    pub fn parse(input: &str, currency: Currency) -> ResultEngine<Self> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let major_str = parts.next().ok_or_else(invalid)?;
        let frac_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if major_str.is_empty() || !major_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let major: i64 = major_str.parse().map_err(|_| overflow())?;

        let digits = usize::from(currency.minor_units());
        let frac: i64 = match frac_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                if frac.len() > digits {
                    return Err(EngineError::InvalidAmount("too many decimals".to_string()));
                }
                let value: i64 = frac.parse().map_err(|_| invalid())?;
                value * 10_i64.pow((digits - frac.len()) as u32)
            }
        };

        let total = major
            .checked_mul(currency.minor_per_major())
            .and_then(|v| v.checked_add(frac))
            .ok_or_else(overflow)?;

        Self::from_minor(if negative { -total } else { total })
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Splits the amount into `parts` equal shares.
    ///
    /// Returns the per-part share and the number of leftover ticks
    /// (`0 <= leftover < parts` for non-negative amounts).
    ///
    /// # Panics
    ///
    /// Panics if `parts` is zero.
    #[must_use]
    pub fn split(self, parts: usize) -> (Money, i64) {
        let parts = parts as i64;
        (Money(self.0 / parts), self.0 % parts)
    }

    /// Rounds to integer minor units, half away from zero.
    #[must_use]
    pub const fn round_to_minor(self) -> i64 {
        let whole = self.0 / Self::TICKS_PER_MINOR;
        let rest = self.0 % Self::TICKS_PER_MINOR;
        if rest.abs() * 2 >= Self::TICKS_PER_MINOR {
            whole + self.0.signum()
        } else {
            whole
        }
    }

    /// Approximate value in major units, for serialization to humans and clients.
    #[must_use]
    pub fn to_major(self, currency: Currency) -> f64 {
        self.0 as f64 / (Self::TICKS_PER_MINOR as f64 * currency.minor_per_major() as f64)
    }

    /// Formats the amount rounded to the currency's minor digits (e.g. `12.34`).
    #[must_use]
    pub fn format(self, currency: Currency) -> String {
        let minor = self.round_to_minor();
        let sign = if minor < 0 { "-" } else { "" };
        let abs = minor.unsigned_abs();
        let digits = usize::from(currency.minor_units());
        if digits == 0 {
            return format!("{sign}{abs}");
        }
        let per_major = currency.minor_per_major().unsigned_abs();
        format!(
            "{sign}{}.{:0digits$}",
            abs / per_major,
            abs % per_major
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(Currency::default()))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses using the default currency's decimal rules.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, Currency::default())
    }
}
