//! Fares, offers, the till and the login session.
//!
//! Everything here is synchronous and free of I/O. The only outward seam is
//! the [`ports::SalesLedger`] trait.

pub mod catalog;
pub mod machine;
pub mod money;
pub mod offer;
pub mod ports;
pub mod registry;
pub mod sale;
pub mod session;
pub mod ticket;
