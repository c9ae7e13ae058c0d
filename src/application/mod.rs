//! Application layer tying the domain together.
//!
//! [`office::TicketOffice`] is the entry point: it gates admin commands on the
//! login session, resolves fares with the best offer and records sales in the
//! ledger. [`admin::Admin`] holds the validated catalog mutations.

pub mod admin;
pub mod command;
pub mod office;
