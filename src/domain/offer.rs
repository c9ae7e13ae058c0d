use crate::domain::money::{Money, Percentage, round2};
use crate::error::{FareError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO calendar date (`YYYY-MM-DD`).
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    let well_formed = trimmed.len() == 10
        && trimmed
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
    if !well_formed {
        return Err(FareError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| FareError::InvalidDate(value.to_string()))
}

/// A time-windowed percentage discount on one station.
///
/// Everything except the activity flag is fixed at creation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct SpecialOffer {
    offer_id: u32,
    offer_name: String,
    station_name: String,
    discount: Percentage,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_active: bool,
}

impl SpecialOffer {
    /// Builds an active offer. The registry owns id assignment and input checks.
    pub(crate) fn new(
        offer_id: u32,
        offer_name: String,
        station_name: String,
        discount: Percentage,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            offer_id,
            offer_name,
            station_name,
            discount,
            start_date,
            end_date,
            is_active: true,
        }
    }

    pub fn offer_id(&self) -> u32 {
        self.offer_id
    }

    pub fn offer_name(&self) -> &str {
        &self.offer_name
    }

    pub fn station_name(&self) -> &str {
        &self.station_name
    }

    pub fn discount(&self) -> Percentage {
        self.discount
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    pub fn applies_to(&self, station: &str) -> bool {
        self.station_name.to_lowercase() == station.to_lowercase()
    }

    /// Active, and `date` falls inside the window (both ends inclusive).
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.is_active && self.start_date <= date && date <= self.end_date
    }

    pub fn has_expired(&self, today: NaiveDate) -> bool {
        today > self.end_date
    }

    /// Whole days left before the window closes, `None` once the end date is reached.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        (today < self.end_date).then(|| (self.end_date - today).num_days())
    }

    /// Price after discount, rounded to two places. Inactive offers leave it as is.
    pub fn apply_discount(&self, price: Money) -> Money {
        if !self.is_active {
            return price;
        }
        let discount = price.value() * self.discount.fraction();
        Money::new(round2(price.value() - discount))
    }

    /// Amount saved, rounded on its own. It can differ by half a cent from
    /// `price - apply_discount(price)`.
    pub fn discount_amount(&self, price: Money) -> Money {
        if !self.is_active {
            return Money::ZERO;
        }
        Money::new(round2(price.value() * self.discount.fraction()))
    }
}

/// An offer as it stands on a given day, for listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferStatus {
    pub offer: SpecialOffer,
    pub valid_today: bool,
    pub expired: bool,
    pub days_left: Option<i64>,
}

impl SpecialOffer {
    pub fn status_on(&self, today: NaiveDate) -> OfferStatus {
        OfferStatus {
            offer: self.clone(),
            valid_today: self.is_valid_on(today),
            expired: self.has_expired(today),
            days_left: self.days_until_expiry(today),
        }
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offer)?;
        match (self.expired, self.days_left) {
            (true, _) => f.write_str(" expired")?,
            (false, Some(days)) => write!(f, " {days} day(s) left")?,
            (false, None) => f.write_str(" ends today")?,
        }
        if self.valid_today {
            f.write_str(", valid today")?;
        }
        Ok(())
    }
}

impl fmt::Display for SpecialOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.is_active { "Active" } else { "Inactive" };
        write!(
            f,
            "Offer #{}: {} - {} off {} ({} to {}) [{}]",
            self.offer_id,
            self.offer_name,
            self.discount,
            self.station_name,
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT),
            status
        )
    }
}
