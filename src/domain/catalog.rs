use crate::domain::money::{Money, Price};
use crate::domain::ticket::TicketType;
use crate::error::{FareError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A sellable station with its fares and running sales totals.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Destination {
    /// Station name, matched case-insensitively.
    pub name: String,
    pub single_price: Price,
    pub return_price: Price,
    /// Tickets sold so far. Only `Catalog::record_sale` moves it, upwards.
    sales_count: u32,
    /// Money taken so far, after discounts. Never decreases.
    total_takings: Money,
}

impl Destination {
    pub fn new(name: impl Into<String>, single_price: Price, return_price: Price) -> Self {
        Self {
            name: name.into(),
            single_price,
            return_price,
            sales_count: 0,
            total_takings: Money::ZERO,
        }
    }

    pub fn sales_count(&self) -> u32 {
        self.sales_count
    }

    pub fn total_takings(&self) -> Money {
        self.total_takings
    }

    pub fn price_for(&self, ticket_type: TicketType) -> Price {
        match ticket_type {
            TicketType::Single => self.single_price,
            TicketType::Return => self.return_price,
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// The set of destinations sold by one machine, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive exact lookup. The first match wins if names repeat.
    pub fn find(&self, name: &str) -> Option<&Destination> {
        self.destinations.iter().find(|d| d.matches(name))
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Destination> {
        self.destinations.iter_mut().find(|d| d.matches(name))
    }

    /// Appends without checking for an existing name.
    /// Use `Admin::add_destination` for validated entry.
    pub fn add(&mut self, destination: Destination) {
        debug!(name = %destination.name, "destination added to catalog");
        self.destinations.push(destination);
    }

    pub fn update_prices(&mut self, name: &str, single: Decimal, ret: Decimal) -> Result<()> {
        let destination = self
            .find_mut(name)
            .ok_or_else(|| FareError::DestinationNotFound(name.to_string()))?;
        let single = Price::new(single)?;
        let ret = Price::new(ret)?;

        destination.single_price = single;
        destination.return_price = ret;
        info!(name = %destination.name, %single, %ret, "destination prices updated");
        Ok(())
    }

    /// Scales every fare by `factor`, storing each result rounded to two places.
    ///
    /// All new prices are computed before any is written, so a product that
    /// rounds to zero leaves the whole catalog untouched.
    pub fn adjust_all_prices(&mut self, factor: Decimal) -> Result<()> {
        if factor <= Decimal::ZERO {
            return Err(FareError::InvalidFactor(factor));
        }

        let adjusted = self
            .destinations
            .iter()
            .map(|d| -> Result<(Price, Price)> {
                Ok((d.single_price.scaled(factor)?, d.return_price.scaled(factor)?))
            })
            .collect::<Result<Vec<_>>>()?;

        for (destination, (single, ret)) in self.destinations.iter_mut().zip(adjusted) {
            debug!(
                name = %destination.name,
                old_single = %destination.single_price,
                new_single = %single,
                old_return = %destination.return_price,
                new_return = %ret,
                "fare adjusted"
            );
            destination.single_price = single;
            destination.return_price = ret;
        }
        info!(%factor, count = self.destinations.len(), "all prices adjusted");
        Ok(())
    }

    /// Counts one sale against `name`. Unknown names are ignored.
    pub fn record_sale(&mut self, name: &str, price: Money) {
        if let Some(destination) = self.find_mut(name) {
            destination.sales_count = destination.sales_count.saturating_add(1);
            destination.total_takings = destination.total_takings.saturating_add(price);
        }
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}
