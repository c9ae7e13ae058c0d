use crate::domain::money::Money;
use crate::error::FareError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum TicketType {
    Single,
    Return,
}

impl FromStr for TicketType {
    type Err = FareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "return" => Ok(Self::Return),
            _ => Err(FareError::InvalidTicketType(s.to_string())),
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("Single"),
            Self::Return => f.write_str("Return"),
        }
    }
}

/// A priced ticket for one journey, issued per purchase attempt.
///
/// `price` is what the customer pays, so it already carries any offer discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub origin: String,
    pub destination: String,
    pub price: Money,
    pub ticket_type: TicketType,
}

impl Ticket {
    /// Same journey at a different price.
    pub fn repriced(&self, price: Money) -> Self {
        Self {
            price,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ticket_type_parsing_ignores_case() {
        assert_eq!("single".parse::<TicketType>().unwrap(), TicketType::Single);
        assert_eq!("RETURN".parse::<TicketType>().unwrap(), TicketType::Return);
        assert_eq!(" Single ".parse::<TicketType>().unwrap(), TicketType::Single);
    }

    #[test]
    fn test_ticket_type_rejects_unknown() {
        assert!(matches!(
            "weekly".parse::<TicketType>(),
            Err(FareError::InvalidTicketType(t)) if t == "weekly"
        ));
    }

    #[test]
    fn test_repriced_keeps_journey() {
        let ticket = Ticket {
            origin: "Oxford".to_string(),
            destination: "London".to_string(),
            price: Money::new(dec!(25.50)),
            ticket_type: TicketType::Single,
        };
        let cheaper = ticket.repriced(Money::new(dec!(20.40)));
        assert_eq!(cheaper.destination, "London");
        assert_eq!(cheaper.ticket_type, TicketType::Single);
        assert_eq!(cheaper.price, Money::new(dec!(20.40)));
    }
}
