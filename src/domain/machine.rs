use crate::domain::catalog::Catalog;
use crate::domain::money::{Money, within_cents};
use crate::domain::offer::SpecialOffer;
use crate::domain::ticket::{Ticket, TicketType};
use crate::error::{FareError, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

/// A completed sale: the ticket issued and the change handed back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Purchase {
    pub ticket: Ticket,
    pub change: Money,
}

/// A ticket priced after the best offer, with what was taken off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub ticket: Ticket,
    pub original_price: Money,
    pub discount: Money,
    pub offer_id: Option<u32>,
}

/// The fare resolver for one origin station.
///
/// Holds a single running cash balance for the whole machine; there is one
/// till, not one per customer.
#[derive(Debug, Clone)]
pub struct TicketMachine {
    origin: String,
    catalog: Catalog,
    inserted_money: Money,
}

impl TicketMachine {
    pub fn new(origin: impl Into<String>, catalog: Catalog) -> Self {
        Self {
            origin: origin.into(),
            catalog,
            inserted_money: Money::ZERO,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog {
        &mut self.catalog
    }

    pub fn inserted_money(&self) -> Money {
        self.inserted_money
    }

    /// Prices a ticket at the full fare for the requested type.
    pub fn search_ticket(&self, destination: &str, ticket_type: &str) -> Result<Ticket> {
        let found = self
            .catalog
            .find(destination)
            .ok_or_else(|| FareError::DestinationNotFound(destination.to_string()))?;
        let ticket_type: TicketType = ticket_type.parse()?;

        Ok(Ticket {
            origin: self.origin.clone(),
            destination: found.name.clone(),
            price: found.price_for(ticket_type).into(),
            ticket_type,
        })
    }

    /// Applies `offer`, if any, to a full-fare ticket.
    pub fn quote(&self, ticket: Ticket, offer: Option<&SpecialOffer>) -> Quote {
        let original_price = ticket.price;
        match offer {
            Some(offer) if offer.is_active() => Quote {
                ticket: ticket.repriced(offer.apply_discount(original_price)),
                original_price,
                discount: offer.discount_amount(original_price),
                offer_id: Some(offer.offer_id()),
            },
            _ => Quote {
                ticket,
                original_price,
                discount: Money::ZERO,
                offer_id: None,
            },
        }
    }

    /// Adds to the balance. Amounts must be positive whole cents, and a
    /// balance past `Decimal::MAX` is refused rather than wrapped.
    pub fn insert_money(&mut self, amount: Decimal) -> Result<Money> {
        if amount <= Decimal::ZERO || !within_cents(amount) {
            return Err(FareError::InvalidAmount(amount));
        }
        self.inserted_money = self
            .inserted_money
            .checked_add(Money::new(amount))
            .ok_or(FareError::InvalidAmount(amount))?;
        debug!(%amount, balance = %self.inserted_money, "money inserted");
        Ok(self.inserted_money)
    }

    /// Sells `ticket` against the current balance.
    ///
    /// On success the sale is recorded, the change is returned and the balance
    /// drops to zero. On failure the balance is kept so more money can be added.
    pub fn buy_ticket(&mut self, ticket: Ticket) -> Result<Purchase> {
        if self.inserted_money < ticket.price {
            return Err(FareError::InsufficientFunds {
                shortfall: (ticket.price - self.inserted_money).value(),
            });
        }

        self.catalog.record_sale(&ticket.destination, ticket.price);
        let change = self.inserted_money - ticket.price;
        self.inserted_money = Money::ZERO;
        info!(
            origin = %ticket.origin,
            destination = %ticket.destination,
            ticket_type = %ticket.ticket_type,
            price = %ticket.price,
            %change,
            "ticket sold"
        );
        Ok(Purchase { ticket, change })
    }

    /// Hands back the whole balance, abandoning any pending purchase.
    pub fn return_change(&mut self) -> Money {
        let change = std::mem::take(&mut self.inserted_money);
        if !change.is_zero() {
            info!(%change, "balance returned");
        }
        change
    }
}
