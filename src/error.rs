use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FareError>;

#[derive(Error, Debug)]
pub enum FareError {
    #[error("Destination '{0}' not found")]
    DestinationNotFound(String),
    #[error("Destination '{0}' already exists")]
    DuplicateDestination(String),
    #[error("Prices must be positive and in whole cents")]
    InvalidPrice,
    #[error("Factor must be positive and keep prices in range, got {0}")]
    InvalidFactor(Decimal),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Discount percentage must be in (0, 100], got {0}")]
    InvalidDiscount(Decimal),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Invalid date range {start} to {end}: dates must be YYYY-MM-DD and end on or after start")]
    InvalidDateRange { start: String, end: String },
    #[error("Offer #{0} not found")]
    OfferNotFound(u32),
    #[error("Invalid ticket type '{0}', expected Single or Return")]
    InvalidTicketType(String),
    #[error("Amount {0} rejected: inserted money must be positive whole cents within the till limit")]
    InvalidAmount(Decimal),
    #[error("Insufficient funds: {shortfall} more required")]
    InsufficientFunds { shortfall: Decimal },
    #[error("Another user is already logged in")]
    SessionBusy,
    #[error("User '{0}' not found")]
    UserNotFound(String),
    #[error("Incorrect password")]
    BadCredentials,
    #[error("No user is currently logged in")]
    NoActiveSession,
    #[error("User '{0}' already exists")]
    DuplicateUser(String),
    #[error("Admin privileges required")]
    AdminRequired,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
