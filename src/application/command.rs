use rust_decimal::Decimal;

/// One request against the ticket office.
///
/// Text fields are passed through untouched; the domain decides what is
/// blank, unknown or malformed.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Login {
        username: String,
        password: String,
    },
    Logout,
    AddUser {
        username: String,
        password: String,
        is_admin: bool,
    },
    AddDestination {
        name: String,
        single: Decimal,
        ret: Decimal,
    },
    UpdateDestination {
        name: String,
        single: Decimal,
        ret: Decimal,
    },
    AdjustPrices {
        factor: Decimal,
    },
    AddOffer {
        name: String,
        station: String,
        discount: Decimal,
        start_date: String,
        end_date: String,
    },
    DeleteOffer {
        id: u32,
    },
    ActivateOffer {
        id: u32,
    },
    DeactivateOffer {
        id: u32,
    },
    SearchOffers {
        term: String,
    },
    /// Every offer, or only active ones, with expiry as of today.
    ListOffers {
        active_only: bool,
    },
    OffersFor {
        station: String,
    },
    Users,
    Destinations,
    Insert {
        amount: Decimal,
    },
    /// Search, apply the best offer on `date` (or today), and buy.
    Buy {
        destination: String,
        ticket_type: String,
        date: Option<String>,
    },
    Refund,
    Summary,
}

impl Command {
    /// Commands that need an administrator to be logged in.
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Self::AddUser { .. }
                | Self::AddDestination { .. }
                | Self::UpdateDestination { .. }
                | Self::AdjustPrices { .. }
                | Self::AddOffer { .. }
                | Self::DeleteOffer { .. }
                | Self::ActivateOffer { .. }
                | Self::DeactivateOffer { .. }
                | Self::Users
                | Self::Destinations
                | Self::Summary
        )
    }
}
