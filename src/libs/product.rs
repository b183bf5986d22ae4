//! Product value object used by the statement-based DAO, and its exact price type.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Exact decimal amount with two fractional digits.
///
/// Stored as an integer number of minor units (cents) so no value is ever
/// rounded through floating point, in memory or in the `products.price` column.
///
/// The scale is fixed at [`Price::SCALE`]. Input with more fractional digits is
/// rejected with [`PriceParseError::TooPrecise`] rather than rounded, so a
/// parsed price always round-trips to the same text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    minor_units: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceParseError {
    #[error("price is empty")]
    Empty,
    #[error("invalid price '{0}'")]
    Invalid(String),
    #[error("price '{0}' has more than {max} fractional digits", max = Price::SCALE)]
    TooPrecise(String),
    #[error("price '{0}' is out of range")]
    OutOfRange(String),
}

impl Price {
    /// Number of fractional digits.
    pub const SCALE: u32 = 2;
    const FACTOR: i64 = 10i64.pow(Self::SCALE);

    pub fn from_minor_units(minor_units: i64) -> Self {
        Self { minor_units }
    }

    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }
}

impl FromStr for Price {
    type Err = PriceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PriceParseError::Empty);
        }

        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) if !fraction.is_empty() => (whole, fraction),
            Some(_) => return Err(PriceParseError::Invalid(s.to_string())),
            None => (digits, ""),
        };

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(fraction) {
            return Err(PriceParseError::Invalid(s.to_string()));
        }
        if fraction.len() > Self::SCALE as usize {
            return Err(PriceParseError::TooPrecise(s.to_string()));
        }

        let out_of_range = || PriceParseError::OutOfRange(s.to_string());
        let whole: i64 = whole.parse().map_err(|_| out_of_range())?;
        let fraction: i64 = format!("{:0<width$}", fraction, width = Self::SCALE as usize)
            .parse()
            .map_err(|_| PriceParseError::Invalid(s.to_string()))?;

        let minor_units = whole
            .checked_mul(Self::FACTOR)
            .and_then(|units| units.checked_add(fraction))
            .ok_or_else(out_of_range)?;

        Ok(Self::from_minor_units(if negative { -minor_units } else { minor_units }))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let abs = self.minor_units.unsigned_abs();
        let factor = Self::FACTOR as u64;
        write!(f, "{}{}.{:02}", sign, abs / factor, abs % factor)
    }
}

impl ToSql for Price {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.minor_units))
    }
}

impl FromSql for Price {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(Price::from_minor_units)
    }
}

/// A row of the `products` table.
///
/// Equality is by identifier: two products are equal only when both have been
/// persisted and carry the same id.
#[derive(Debug, Clone)]
pub struct Product {
    /// Assigned by the store on [`save`](crate::db::products::ProductDao::save).
    pub id: Option<i64>,
    pub name: String,
    pub producer: String,
    pub price: Price,
    pub expiration_date: NaiveDate,
    /// Written by the DAO at insert time; callers never set it.
    pub creation_time: Option<NaiveDateTime>,
}

impl Product {
    pub fn new(name: &str, producer: &str, price: Price, expiration_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            producer: producer.to_string(),
            price,
            expiration_date,
            creation_time: None,
        }
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.id.is_some() && self.id == other.id
    }
}
