use crate::application::command::Command;
use crate::error::{FareError, Result};
use csv::StringRecord;
use rust_decimal::Decimal;
use std::io::Read;
use std::str::FromStr;

/// Reads office commands from a CSV script.
///
/// The first column names the action and the rest are its arguments in
/// order, so rows may have different lengths. A header row is expected.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    /// Creates a new `CommandReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily parses each row. A bad row yields an error and reading goes on.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader.into_records().map(|record| parse_record(&record?))
    }
}

struct Row<'a> {
    record: &'a StringRecord,
    line: u64,
}

impl<'a> Row<'a> {
    fn invalid(&self, reason: impl std::fmt::Display) -> FareError {
        FareError::InvalidInput(format!("line {}: {}", self.line, reason))
    }

    /// Text argument; a missing column reads as empty.
    fn text(&self, index: usize) -> String {
        self.record.get(index).unwrap_or_default().to_string()
    }

    fn optional(&self, index: usize) -> Option<String> {
        self.record
            .get(index)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn parsed<T: FromStr>(&self, index: usize, what: &str) -> Result<T> {
        let value = self
            .record
            .get(index)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| self.invalid(format!("missing {what}")))?;
        value
            .parse()
            .map_err(|_| self.invalid(format!("invalid {what} '{value}'")))
    }

    fn decimal(&self, index: usize, what: &str) -> Result<Decimal> {
        self.parsed(index, what)
    }

    fn flag(&self, index: usize) -> Result<bool> {
        match self.text(index).to_lowercase().as_str() {
            "" | "false" | "no" | "0" => Ok(false),
            "true" | "yes" | "1" => Ok(true),
            other => Err(self.invalid(format!("invalid flag '{other}'"))),
        }
    }
}

fn parse_record(record: &StringRecord) -> Result<Command> {
    let row = Row {
        record,
        line: record.position().map_or(0, |p| p.line()),
    };
    let action = row.text(0).to_lowercase();

    let command = match action.as_str() {
        "login" => Command::Login {
            username: row.text(1),
            password: row.text(2),
        },
        "logout" => Command::Logout,
        "add_user" => Command::AddUser {
            username: row.text(1),
            password: row.text(2),
            is_admin: row.flag(3)?,
        },
        "add_destination" => Command::AddDestination {
            name: row.text(1),
            single: row.decimal(2, "single price")?,
            ret: row.decimal(3, "return price")?,
        },
        "update_destination" => Command::UpdateDestination {
            name: row.text(1),
            single: row.decimal(2, "single price")?,
            ret: row.decimal(3, "return price")?,
        },
        "adjust_prices" => Command::AdjustPrices {
            factor: row.decimal(1, "factor")?,
        },
        "add_offer" => Command::AddOffer {
            name: row.text(1),
            station: row.text(2),
            discount: row.decimal(3, "discount")?,
            start_date: row.text(4),
            end_date: row.text(5),
        },
        "delete_offer" => Command::DeleteOffer {
            id: row.parsed(1, "offer id")?,
        },
        "activate_offer" => Command::ActivateOffer {
            id: row.parsed(1, "offer id")?,
        },
        "deactivate_offer" => Command::DeactivateOffer {
            id: row.parsed(1, "offer id")?,
        },
        "search_offers" => Command::SearchOffers { term: row.text(1) },
        "list_offers" => Command::ListOffers {
            active_only: match row.text(1).to_lowercase().as_str() {
                "" | "all" => false,
                "active" => true,
                other => return Err(row.invalid(format!("invalid offer filter '{other}'"))),
            },
        },
        "offers_for" => Command::OffersFor {
            station: row.text(1),
        },
        "users" => Command::Users,
        "destinations" => Command::Destinations,
        "insert" => Command::Insert {
            amount: row.decimal(1, "amount")?,
        },
        "buy" => Command::Buy {
            destination: row.text(1),
            ticket_type: row.text(2),
            date: row.optional(3),
        },
        "refund" => Command::Refund,
        "summary" => Command::Summary,
        _ => return Err(row.invalid(format!("unknown action '{action}'"))),
    };
    Ok(command)
}
