use crate::domain::machine::{Purchase, Quote};
use crate::domain::money::Money;
use crate::domain::ticket::TicketType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One completed sale, as kept in the sales ledger.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct SaleRecord {
    /// Position in the ledger, starting at 1. Assigned by the ledger.
    pub sequence: u64,
    pub origin: String,
    pub destination: String,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    /// Price paid, after any discount.
    pub price: Money,
    pub change: Money,
    /// Offer applied to the fare, if any.
    pub offer: Option<u32>,
    pub date: NaiveDate,
}

impl SaleRecord {
    /// A record not yet numbered by a ledger.
    pub fn from_purchase(purchase: &Purchase, quote: &Quote, date: NaiveDate) -> Self {
        Self {
            sequence: 0,
            origin: purchase.ticket.origin.clone(),
            destination: purchase.ticket.destination.clone(),
            ticket_type: purchase.ticket.ticket_type,
            price: purchase.ticket.price,
            change: purchase.change,
            offer: quote.offer_id,
            date,
        }
    }
}
