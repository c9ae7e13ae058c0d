use crate::domain::catalog::Destination;
use crate::domain::machine::TicketMachine;
use crate::domain::money::{Money, Price, round2};
use crate::error::{FareError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

/// Aggregate view of a machine for the back office.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemSummary {
    pub origin: String,
    pub destination_count: usize,
    pub total_revenue: Money,
    pub average_single: Option<Money>,
    pub average_return: Option<Money>,
    /// Best-selling destination by takings, once anything has sold.
    pub top_destination: Option<(String, Money)>,
    pub current_balance: Money,
}

fn average_price(destinations: &[Destination], field: impl Fn(&Destination) -> Price) -> Option<Money> {
    if destinations.is_empty() {
        return None;
    }
    let sum = destinations
        .iter()
        .fold(Decimal::ZERO, |acc, d| acc.saturating_add(field(d).value()));
    Some(Money::new(round2(sum / Decimal::from(destinations.len()))))
}

/// Validated catalog mutations. Holds no state; admin gating is the caller's job.
pub struct Admin;

impl Admin {
    pub fn add_destination(
        machine: &mut TicketMachine,
        name: &str,
        single: Decimal,
        ret: Decimal,
    ) -> Result<()> {
        if name.trim().is_empty() {
            return Err(FareError::InvalidInput(
                "destination name cannot be empty".to_string(),
            ));
        }
        let single = Price::new(single)?;
        let ret = Price::new(ret)?;
        if machine.catalog().find(name).is_some() {
            return Err(FareError::DuplicateDestination(name.to_string()));
        }

        machine
            .catalog_mut()
            .add(Destination::new(name, single, ret));
        info!(name, %single, %ret, "destination added");
        Ok(())
    }

    pub fn update_destination(
        machine: &mut TicketMachine,
        name: &str,
        single: Decimal,
        ret: Decimal,
    ) -> Result<()> {
        machine.catalog_mut().update_prices(name, single, ret)
    }

    /// Multiplies every fare by `factor`, e.g. 1.1 for a 10% rise.
    pub fn adjust_all_prices(machine: &mut TicketMachine, factor: Decimal) -> Result<()> {
        machine.catalog_mut().adjust_all_prices(factor)
    }

    pub fn summary(machine: &TicketMachine) -> SystemSummary {
        let destinations = machine.catalog().destinations();
        let count = destinations.len();

        let total_revenue = destinations
            .iter()
            .fold(Money::ZERO, |acc, d| acc.saturating_add(d.total_takings()));
        let top_destination = destinations
            .iter()
            .fold(None, |best: Option<&Destination>, d| match best {
                Some(b) if b.total_takings() >= d.total_takings() => Some(b),
                _ => Some(d),
            })
            .filter(|d| !d.total_takings().is_zero())
            .map(|d| (d.name.clone(), d.total_takings()));

        SystemSummary {
            origin: machine.origin().to_string(),
            destination_count: count,
            total_revenue,
            average_single: average_price(destinations, |d| d.single_price),
            average_return: average_price(destinations, |d| d.return_price),
            top_destination,
            current_balance: machine.inserted_money(),
        }
    }
}
