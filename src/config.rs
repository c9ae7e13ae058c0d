//! Bootstrap data for a ticket office.
//!
//! Users, destinations and offers a machine starts with. Loaded from a JSON
//! file when one is given, otherwise [`MachineConfig::default`] applies.

use crate::error::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfig {
    /// Printed as the origin on every ticket.
    pub origin_station: String,
    #[serde(default)]
    pub users: Vec<UserSeed>,
    #[serde(default)]
    pub destinations: Vec<DestinationSeed>,
    #[serde(default)]
    pub offers: Vec<OfferSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeed {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationSeed {
    pub name: String,
    pub single_price: Decimal,
    pub return_price: Decimal,
}

/// Dates stay as text so they go through the same checks as runtime offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSeed {
    pub name: String,
    pub station: String,
    pub discount: Decimal,
    pub start_date: String,
    pub end_date: String,
}

impl MachineConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// A config with no users, destinations or offers.
    pub fn empty(origin_station: impl Into<String>) -> Self {
        Self {
            origin_station: origin_station.into(),
            users: Vec::new(),
            destinations: Vec::new(),
            offers: Vec::new(),
        }
    }
}

fn user(username: &str, password: &str, is_admin: bool) -> UserSeed {
    UserSeed {
        username: username.to_string(),
        password: password.to_string(),
        is_admin,
    }
}

fn destination(name: &str, single_price: Decimal, return_price: Decimal) -> DestinationSeed {
    DestinationSeed {
        name: name.to_string(),
        single_price,
        return_price,
    }
}

fn offer(name: &str, station: &str, discount: Decimal, start: &str, end: &str) -> OfferSeed {
    OfferSeed {
        name: name.to_string(),
        station: station.to_string(),
        discount,
        start_date: start.to_string(),
        end_date: end.to_string(),
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            origin_station: "Oxford Station".to_string(),
            users: vec![
                user("admin", "admin123", true),
                user("manager", "manager456", true),
                user("john", "john789", false),
                user("alice", "alice321", false),
            ],
            destinations: vec![
                destination("London", dec!(25.50), dec!(45.00)),
                destination("Manchester", dec!(32.00), dec!(58.00)),
                destination("Birmingham", dec!(28.50), dec!(52.00)),
                destination("Liverpool", dec!(35.00), dec!(63.00)),
                destination("Leeds", dec!(30.00), dec!(55.00)),
                destination("Edinburgh", dec!(45.00), dec!(85.00)),
                destination("Glasgow", dec!(42.00), dec!(78.00)),
                destination("Bristol", dec!(22.50), dec!(40.00)),
            ],
            offers: vec![
                offer("Christmas Sale", "London", dec!(20), "2025-12-01", "2025-12-31"),
                offer("New Year Special", "Manchester", dec!(15), "2025-12-20", "2026-01-15"),
            ],
        }
    }
}
