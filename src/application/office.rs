use crate::application::admin::{Admin, SystemSummary};
use crate::application::command::Command;
use crate::config::MachineConfig;
use crate::domain::catalog::{Catalog, Destination};
use crate::domain::machine::{Quote, TicketMachine};
use crate::domain::money::{Money, Price};
use crate::domain::offer::{OfferStatus, SpecialOffer, parse_date};
use crate::domain::ports::SalesLedgerBox;
use crate::domain::registry::OfferRegistry;
use crate::domain::sale::SaleRecord;
use crate::domain::session::{AuthSession, UserStatus};
use crate::error::{FareError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Everything a single machine mutates while serving commands.
#[derive(Debug, Clone)]
pub struct OfficeState {
    pub machine: TicketMachine,
    pub offers: OfferRegistry,
    pub session: AuthSession,
}

/// What a successfully processed command did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    LoggedIn { username: String, is_admin: bool },
    LoggedOut,
    UserAdded { username: String },
    DestinationAdded { name: String },
    DestinationUpdated { name: String },
    PricesAdjusted { factor: Decimal },
    OfferAdded(SpecialOffer),
    OfferDeleted(SpecialOffer),
    OfferActivated { id: u32 },
    OfferDeactivated { id: u32 },
    OffersFound(Vec<SpecialOffer>),
    OffersListed(Vec<OfferStatus>),
    Users(Vec<UserStatus>),
    Destinations(Vec<Destination>),
    MoneyInserted { balance: Money },
    TicketSold { quote: Quote, sale: SaleRecord },
    ChangeReturned(Money),
    Summary(SystemSummary),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedIn { username, is_admin } => {
                let role = if *is_admin { "admin" } else { "user" };
                write!(f, "Logged in {username} ({role})")
            }
            Self::LoggedOut => f.write_str("Logged out"),
            Self::UserAdded { username } => write!(f, "User '{username}' added"),
            Self::DestinationAdded { name } => write!(f, "Destination '{name}' added"),
            Self::DestinationUpdated { name } => write!(f, "Destination '{name}' updated"),
            Self::PricesAdjusted { factor } => write!(f, "All prices adjusted by factor {factor}"),
            Self::OfferAdded(offer) => write!(f, "Created {offer}"),
            Self::OfferDeleted(offer) => write!(f, "Deleted {offer}"),
            Self::OfferActivated { id } => write!(f, "Offer #{id} activated"),
            Self::OfferDeactivated { id } => write!(f, "Offer #{id} deactivated"),
            Self::OffersFound(offers) => {
                write!(f, "Found {} offer(s)", offers.len())?;
                for offer in offers {
                    write!(f, "; {offer}")?;
                }
                Ok(())
            }
            Self::OffersListed(offers) => {
                write!(f, "Listed {} offer(s)", offers.len())?;
                for offer in offers {
                    write!(f, "; {offer}")?;
                }
                Ok(())
            }
            Self::Users(users) => {
                write!(f, "{} user(s)", users.len())?;
                for user in users {
                    write!(f, "; {}", user.info())?;
                }
                Ok(())
            }
            Self::Destinations(destinations) => {
                write!(f, "{} destination(s)", destinations.len())?;
                for d in destinations {
                    write!(
                        f,
                        "; {}: single {}, return {}, {} sold, takings {}",
                        d.name,
                        d.single_price,
                        d.return_price,
                        d.sales_count(),
                        d.total_takings()
                    )?;
                }
                Ok(())
            }
            Self::MoneyInserted { balance } => write!(f, "Balance {balance}"),
            Self::TicketSold { quote, sale } => {
                write!(
                    f,
                    "Sale #{}: {} {} to {} for {}",
                    sale.sequence, sale.ticket_type, sale.origin, sale.destination, sale.price
                )?;
                if let Some(id) = quote.offer_id {
                    write!(f, " (offer #{id}, saved {})", quote.discount)?;
                }
                write!(f, ", change {}", sale.change)
            }
            Self::ChangeReturned(amount) => write!(f, "Returned {amount}"),
            Self::Summary(summary) => {
                write!(
                    f,
                    "Summary for {}: {} destinations, revenue {}, balance {}",
                    summary.origin,
                    summary.destination_count,
                    summary.total_revenue,
                    summary.current_balance
                )?;
                if let Some((name, takings)) = &summary.top_destination {
                    write!(f, ", top {name} ({takings})")?;
                }
                Ok(())
            }
        }
    }
}

/// Final state handed back when the office shuts down.
#[derive(Debug, Clone)]
pub struct Report {
    pub destinations: Vec<Destination>,
    pub sales: Vec<SaleRecord>,
}

/// Front door for customers and administrators.
///
/// One mutex guards the till, the offers and the login session together, so
/// a purchase or a login runs to completion before the next command starts.
/// Completed sales are appended to the ledger before the lock is released.
pub struct TicketOffice {
    state: Mutex<OfficeState>,
    ledger: SalesLedgerBox,
}

impl TicketOffice {
    pub fn new(state: OfficeState, ledger: SalesLedgerBox) -> Self {
        Self {
            state: Mutex::new(state),
            ledger,
        }
    }

    /// Builds an office from bootstrap data, validating every entry.
    pub fn bootstrap(config: &MachineConfig, ledger: SalesLedgerBox) -> Result<Self> {
        let mut session = AuthSession::new();
        for user in &config.users {
            session.add_user(&user.username, &user.password, user.is_admin)?;
        }

        let mut catalog = Catalog::new();
        for seed in &config.destinations {
            catalog.add(Destination::new(
                seed.name.as_str(),
                Price::new(seed.single_price)?,
                Price::new(seed.return_price)?,
            ));
        }

        let mut offers = OfferRegistry::new();
        for seed in &config.offers {
            offers.add_offer(
                &seed.name,
                &seed.station,
                seed.discount,
                &seed.start_date,
                &seed.end_date,
            )?;
        }

        info!(
            origin = %config.origin_station,
            users = config.users.len(),
            destinations = catalog.len(),
            offers = offers.all().len(),
            "ticket office ready"
        );
        Ok(Self::new(
            OfficeState {
                machine: TicketMachine::new(config.origin_station.as_str(), catalog),
                offers,
                session,
            },
            ledger,
        ))
    }

    /// Runs one command. `today` dates any purchase that does not name a date.
    pub async fn process(&self, command: Command, today: NaiveDate) -> Result<Outcome> {
        let mut state = self.state.lock().await;
        if command.requires_admin() && !state.session.is_admin_logged_in() {
            return Err(FareError::AdminRequired);
        }
        debug!(?command, "processing command");

        let OfficeState {
            machine,
            offers,
            session,
        } = &mut *state;

        match command {
            Command::Login { username, password } => {
                let user = session.login(&username, &password)?;
                Ok(Outcome::LoggedIn {
                    username: user.username().to_string(),
                    is_admin: user.is_admin(),
                })
            }
            Command::Logout => {
                session.logout()?;
                Ok(Outcome::LoggedOut)
            }
            Command::AddUser {
                username,
                password,
                is_admin,
            } => {
                session.add_user(&username, &password, is_admin)?;
                Ok(Outcome::UserAdded { username })
            }
            Command::AddDestination { name, single, ret } => {
                Admin::add_destination(machine, &name, single, ret)?;
                Ok(Outcome::DestinationAdded { name })
            }
            Command::UpdateDestination { name, single, ret } => {
                Admin::update_destination(machine, &name, single, ret)?;
                Ok(Outcome::DestinationUpdated { name })
            }
            Command::AdjustPrices { factor } => {
                Admin::adjust_all_prices(machine, factor)?;
                Ok(Outcome::PricesAdjusted { factor })
            }
            Command::AddOffer {
                name,
                station,
                discount,
                start_date,
                end_date,
            } => {
                let offer = offers.add_offer(&name, &station, discount, &start_date, &end_date)?;
                Ok(Outcome::OfferAdded(offer.clone()))
            }
            Command::DeleteOffer { id } => Ok(Outcome::OfferDeleted(offers.delete(id)?)),
            Command::ActivateOffer { id } => {
                offers.activate(id)?;
                Ok(Outcome::OfferActivated { id })
            }
            Command::DeactivateOffer { id } => {
                offers.deactivate(id)?;
                Ok(Outcome::OfferDeactivated { id })
            }
            Command::SearchOffers { term } => Ok(Outcome::OffersFound(
                offers.search(&term)?.into_iter().cloned().collect(),
            )),
            Command::ListOffers { active_only } => {
                Ok(Outcome::OffersListed(offers.listing(today, active_only)))
            }
            Command::OffersFor { station } => Ok(Outcome::OffersFound(
                offers
                    .search_by_station(&station)?
                    .into_iter()
                    .cloned()
                    .collect(),
            )),
            Command::Users => Ok(Outcome::Users(session.users())),
            Command::Destinations => Ok(Outcome::Destinations(
                machine.catalog().destinations().to_vec(),
            )),
            Command::Insert { amount } => Ok(Outcome::MoneyInserted {
                balance: machine.insert_money(amount)?,
            }),
            Command::Buy {
                destination,
                ticket_type,
                date,
            } => {
                let date = match date {
                    Some(date) => parse_date(&date)?,
                    None => today,
                };
                let ticket = machine.search_ticket(&destination, &ticket_type)?;
                let best = offers.best_offer(&ticket.destination, date);
                let quote = machine.quote(ticket, best);
                let purchase = machine.buy_ticket(quote.ticket.clone())?;
                let sale = self
                    .ledger
                    .append(SaleRecord::from_purchase(&purchase, &quote, date))
                    .await?;
                Ok(Outcome::TicketSold { quote, sale })
            }
            Command::Refund => Ok(Outcome::ChangeReturned(machine.return_change())),
            Command::Summary => Ok(Outcome::Summary(Admin::summary(machine))),
        }
    }

    pub async fn summary(&self) -> SystemSummary {
        Admin::summary(&self.state.lock().await.machine)
    }

    pub async fn balance(&self) -> Money {
        self.state.lock().await.machine.inserted_money()
    }

    /// Consumes the office and returns the final catalog and sales history.
    pub async fn into_report(self) -> Result<Report> {
        let sales = self.ledger.all_sales().await?;
        let state = self.state.into_inner();
        Ok(Report {
            destinations: state.machine.catalog().destinations().to_vec(),
            sales,
        })
    }
}
