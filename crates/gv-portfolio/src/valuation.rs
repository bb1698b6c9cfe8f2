//! # Valuation Bands
//!
//! A loan's `valuation_band` is a price in points of par, either a point
//! value (`"100"`) or an inclusive range (`"98-100"`). The NAV contribution of
//! a loan is the band midpoint times [`PER_LOAN_NOTIONAL`].
//!
//! ## Fixed-Point Representation
//!
//! Band values are parsed into ten-thousandths of a point (`u64`), so up to
//! four fractional digits are exact. NAV is computed in `u128` and narrowed
//! to whole currency units; with the fixed notional of 1,000,000 every
//! accepted band yields an exact integer NAV. Floats never enter the
//! computation, which keeps `navEstimate` hashable.

use thiserror::Error;

/// Fixed notional applied to every loan, in currency units.
pub const PER_LOAN_NOTIONAL: u64 = 1_000_000;

/// Fixed-point scale for band values: four fractional digits.
const SCALE: u64 = 10_000;
const MAX_FRACTION_DIGITS: usize = 4;
const RANGE_SEPARATOR: char = '-';

/// Why a valuation band string was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValuationBandError {
    /// The band (or one side of a range) was empty.
    #[error("valuation band is empty")]
    Empty,

    /// A component was not a non-negative decimal number.
    #[error("{0:?} is not a non-negative decimal number")]
    NotNumeric(String),

    /// More fractional digits than the fixed-point scale carries.
    #[error("{0:?} has more than {MAX_FRACTION_DIGITS} fractional digits")]
    TooPrecise(String),

    /// More than one range separator.
    #[error("valuation band {0:?} has more than one range separator")]
    TooManySeparators(String),

    /// The low end of the range exceeds the high end.
    #[error("valuation range is inverted: low {low} > high {high}")]
    InvertedRange {
        /// Low side as written.
        low: String,
        /// High side as written.
        high: String,
    },

    /// The value does not fit the fixed-point representation.
    #[error("valuation {0:?} is out of range")]
    Overflow(String),
}

/// A parsed valuation band, in ten-thousandths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuationBand {
    /// A single price.
    Point(u64),
    /// An inclusive price range, `low <= high`.
    Range {
        /// Lower bound.
        low: u64,
        /// Upper bound.
        high: u64,
    },
}

impl ValuationBand {
    /// Parse a band string.
    pub fn parse(band: &str) -> Result<Self, ValuationBandError> {
        let band = band.trim();
        if band.is_empty() {
            return Err(ValuationBandError::Empty);
        }
        let mut parts = band.split(RANGE_SEPARATOR);
        let first = parts.next().unwrap_or_default();
        match (parts.next(), parts.next()) {
            (None, _) => Ok(Self::Point(parse_fixed(first)?)),
            (Some(second), None) => {
                let low = parse_fixed(first)?;
                let high = parse_fixed(second)?;
                if low > high {
                    return Err(ValuationBandError::InvertedRange {
                        low: first.trim().to_string(),
                        high: second.trim().to_string(),
                    });
                }
                Ok(Self::Range { low, high })
            }
            (Some(_), Some(_)) => Err(ValuationBandError::TooManySeparators(band.to_string())),
        }
    }

    /// NAV contribution in whole currency units: midpoint × `notional`.
    ///
    /// Returns `None` on overflow.
    pub fn nav_contribution(&self, notional: u64) -> Option<u64> {
        let (sum, divisor) = match *self {
            Self::Point(v) => (u128::from(v), u128::from(SCALE)),
            Self::Range { low, high } => (
                u128::from(low) + u128::from(high),
                u128::from(SCALE) * 2,
            ),
        };
        let nav = sum.checked_mul(u128::from(notional))? / divisor;
        u64::try_from(nav).ok()
    }
}

impl std::str::FromStr for ValuationBand {
    type Err = ValuationBandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Parse `"98"`, `"98.5"`, `"98.1234"` into ten-thousandths of a point.
fn parse_fixed(raw: &str) -> Result<u64, ValuationBandError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(ValuationBandError::Empty);
    }
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(ValuationBandError::NotNumeric(s.to_string()));
    }
    if s.ends_with('.') {
        return Err(ValuationBandError::NotNumeric(s.to_string()));
    }
    if frac_part.len() > MAX_FRACTION_DIGITS {
        return Err(ValuationBandError::TooPrecise(s.to_string()));
    }

    let overflow = || ValuationBandError::Overflow(s.to_string());
    let whole: u64 = int_part.parse().map_err(|_| overflow())?;
    let frac: u64 = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{frac_part:0<width$}", width = MAX_FRACTION_DIGITS);
        padded.parse().map_err(|_| overflow())?
    };
    whole
        .checked_mul(SCALE)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(overflow)
}
