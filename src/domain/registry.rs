use crate::domain::money::Percentage;
use crate::domain::offer::{OfferStatus, SpecialOffer, parse_date};
use crate::error::{FareError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

/// Owns every promotional offer, in creation order.
///
/// Ids start at 1 and only move forward, so a deleted offer's id is never handed out again.
#[derive(Debug, Clone)]
pub struct OfferRegistry {
    offers: Vec<SpecialOffer>,
    next_offer_id: u32,
}

impl Default for OfferRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OfferRegistry {
    pub fn new() -> Self {
        Self {
            offers: Vec::new(),
            next_offer_id: 1,
        }
    }

    /// Validates and stores a new active offer.
    ///
    /// Nothing is stored, and no id is consumed, unless every check passes.
    pub fn add_offer(
        &mut self,
        name: &str,
        station: &str,
        discount: Decimal,
        start_date: &str,
        end_date: &str,
    ) -> Result<&SpecialOffer> {
        if name.trim().is_empty() {
            return Err(FareError::InvalidInput("offer name cannot be empty".to_string()));
        }
        if station.trim().is_empty() {
            return Err(FareError::InvalidInput("station name cannot be empty".to_string()));
        }
        let discount = Percentage::new(discount)?;
        let invalid_range = || FareError::InvalidDateRange {
            start: start_date.to_string(),
            end: end_date.to_string(),
        };
        let (Ok(start), Ok(end)) = (parse_date(start_date), parse_date(end_date)) else {
            return Err(invalid_range());
        };
        if end < start {
            return Err(invalid_range());
        }

        let offer = SpecialOffer::new(
            self.next_offer_id,
            name.to_string(),
            station.to_string(),
            discount,
            start,
            end,
        );
        self.next_offer_id += 1;
        info!(id = offer.offer_id(), %offer, "special offer created");
        self.offers.push(offer);
        Ok(&self.offers[self.offers.len() - 1])
    }

    pub fn get(&self, offer_id: u32) -> Result<&SpecialOffer> {
        self.offers
            .iter()
            .find(|o| o.offer_id() == offer_id)
            .ok_or(FareError::OfferNotFound(offer_id))
    }

    fn get_mut(&mut self, offer_id: u32) -> Result<&mut SpecialOffer> {
        self.offers
            .iter_mut()
            .find(|o| o.offer_id() == offer_id)
            .ok_or(FareError::OfferNotFound(offer_id))
    }

    pub fn all(&self) -> &[SpecialOffer] {
        &self.offers
    }

    pub fn active(&self) -> Vec<&SpecialOffer> {
        self.offers.iter().filter(|o| o.is_active()).collect()
    }

    /// Every offer, or only the active ones, with expiry details as of `today`.
    pub fn listing(&self, today: NaiveDate, active_only: bool) -> Vec<OfferStatus> {
        let offers = if active_only {
            self.active()
        } else {
            self.offers.iter().collect()
        };
        offers.into_iter().map(|o| o.status_on(today)).collect()
    }

    /// Offers on `station` that are active and valid on `date`.
    pub fn find_applicable(&self, station: &str, date: NaiveDate) -> Vec<&SpecialOffer> {
        self.offers
            .iter()
            .filter(|o| o.applies_to(station) && o.is_valid_on(date))
            .collect()
    }

    /// The applicable offer with the largest discount. Among equal discounts
    /// the one created first wins.
    pub fn best_offer(&self, station: &str, date: NaiveDate) -> Option<&SpecialOffer> {
        self.find_applicable(station, date)
            .into_iter()
            .fold(None, |best: Option<&SpecialOffer>, offer| match best {
                Some(b) if b.discount() >= offer.discount() => Some(b),
                _ => Some(offer),
            })
    }

    pub fn delete(&mut self, offer_id: u32) -> Result<SpecialOffer> {
        let index = self
            .offers
            .iter()
            .position(|o| o.offer_id() == offer_id)
            .ok_or(FareError::OfferNotFound(offer_id))?;
        let removed = self.offers.remove(index);
        info!(id = offer_id, name = removed.offer_name(), "special offer deleted");
        Ok(removed)
    }

    pub fn activate(&mut self, offer_id: u32) -> Result<()> {
        let offer = self.get_mut(offer_id)?;
        offer.set_active(true);
        info!(id = offer_id, name = offer.offer_name(), "special offer activated");
        Ok(())
    }

    pub fn deactivate(&mut self, offer_id: u32) -> Result<()> {
        let offer = self.get_mut(offer_id)?;
        offer.set_active(false);
        info!(id = offer_id, name = offer.offer_name(), "special offer deactivated");
        Ok(())
    }

    /// Offers whose name or station contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Result<Vec<&SpecialOffer>> {
        if term.trim().is_empty() {
            return Err(FareError::InvalidInput("search term cannot be empty".to_string()));
        }
        let needle = term.to_lowercase();
        Ok(self
            .offers
            .iter()
            .filter(|o| {
                o.offer_name().to_lowercase().contains(&needle)
                    || o.station_name().to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub fn search_by_station(&self, station: &str) -> Result<Vec<&SpecialOffer>> {
        if station.trim().is_empty() {
            return Err(FareError::InvalidInput("station name cannot be empty".to_string()));
        }
        Ok(self.offers.iter().filter(|o| o.applies_to(station)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn registry() -> OfferRegistry {
        let mut registry = OfferRegistry::new();
        registry
            .add_offer("Christmas Sale", "London", dec!(20), "2025-12-01", "2025-12-31")
            .unwrap();
        registry
            .add_offer("New Year Special", "Manchester", dec!(15), "2025-12-20", "2026-01-15")
            .unwrap();
        registry
    }

    #[test]
    fn test_add_offer_assigns_sequential_ids() {
        let registry = registry();
        let ids: Vec<u32> = registry.all().iter().map(|o| o.offer_id()).collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(registry.all().iter().all(|o| o.is_active()));
    }

    #[test]
    fn test_add_offer_validation() {
        let mut registry = OfferRegistry::new();
        assert!(matches!(
            registry.add_offer(" ", "London", dec!(10), "2025-01-01", "2025-01-02"),
            Err(FareError::InvalidInput(_))
        ));
        assert!(matches!(
            registry.add_offer("Sale", "", dec!(10), "2025-01-01", "2025-01-02"),
            Err(FareError::InvalidInput(_))
        ));
        assert!(matches!(
            registry.add_offer("Sale", "London", dec!(0), "2025-01-01", "2025-01-02"),
            Err(FareError::InvalidDiscount(_))
        ));
        assert!(matches!(
            registry.add_offer("Sale", "London", dec!(101), "2025-01-01", "2025-01-02"),
            Err(FareError::InvalidDiscount(_))
        ));
        assert!(matches!(
            registry.add_offer("Sale", "London", dec!(10), "2025-1-1", "2025-01-02"),
            Err(FareError::InvalidDateRange { .. })
        ));
        assert!(matches!(
            registry.add_offer("Sale", "London", dec!(10), "2025-01-05", "2025-01-04"),
            Err(FareError::InvalidDateRange { .. })
        ));
        assert!(registry.all().is_empty());

        // Failed attempts do not consume ids.
        let offer = registry
            .add_offer("Sale", "London", dec!(100), "2025-01-05", "2025-01-05")
            .unwrap();
        assert_eq!(offer.offer_id(), 1);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut registry = registry();
        registry.delete(2).unwrap();
        let offer = registry
            .add_offer("Spring", "Leeds", dec!(5), "2026-03-01", "2026-03-31")
            .unwrap();
        assert_eq!(offer.offer_id(), 3);
    }

    #[test]
    fn test_find_applicable_window_edges() {
        let registry = registry();
        assert_eq!(registry.find_applicable("london", date("2025-12-01")).len(), 1);
        assert_eq!(registry.find_applicable("LONDON", date("2025-12-31")).len(), 1);
        assert!(registry.find_applicable("London", date("2025-11-30")).is_empty());
        assert!(registry.find_applicable("London", date("2026-01-01")).is_empty());
        assert!(registry.find_applicable("Leeds", date("2025-12-15")).is_empty());
    }

    #[test]
    fn test_find_applicable_skips_inactive() {
        let mut registry = registry();
        registry.deactivate(1).unwrap();
        assert!(registry.find_applicable("London", date("2025-12-10")).is_empty());
        registry.activate(1).unwrap();
        assert_eq!(registry.find_applicable("London", date("2025-12-10")).len(), 1);
    }

    #[test]
    fn test_best_offer_picks_largest_discount() {
        let mut registry = OfferRegistry::new();
        registry
            .add_offer("Ten", "Leeds", dec!(10), "2025-06-01", "2025-06-30")
            .unwrap();
        registry
            .add_offer("Twenty", "Leeds", dec!(20), "2025-06-01", "2025-06-30")
            .unwrap();
        let best = registry.best_offer("leeds", date("2025-06-15")).unwrap();
        assert_eq!(best.offer_name(), "Twenty");
    }

    #[test]
    fn test_best_offer_tie_goes_to_first_added() {
        let mut registry = OfferRegistry::new();
        registry
            .add_offer("First", "Leeds", dec!(15), "2025-06-01", "2025-06-30")
            .unwrap();
        registry
            .add_offer("Second", "Leeds", dec!(15.0), "2025-06-01", "2025-06-30")
            .unwrap();
        registry
            .add_offer("Smaller", "Leeds", dec!(5), "2025-06-01", "2025-06-30")
            .unwrap();
        let best = registry.best_offer("Leeds", date("2025-06-15")).unwrap();
        assert_eq!(best.offer_name(), "First");
    }

    #[test]
    fn test_best_offer_none_outside_window() {
        let registry = registry();
        assert!(registry.best_offer("London", date("2026-06-01")).is_none());
    }

    #[test]
    fn test_delete_unknown_offer() {
        let mut registry = registry();
        assert!(matches!(registry.delete(9), Err(FareError::OfferNotFound(9))));
        registry.delete(1).unwrap();
        assert!(matches!(registry.delete(1), Err(FareError::OfferNotFound(1))));
        assert_eq!(registry.all().len(), 1);
    }

    #[test]
    fn test_activation_is_idempotent() {
        let mut registry = registry();
        registry.activate(1).unwrap();
        registry.activate(1).unwrap();
        assert!(registry.get(1).unwrap().is_active());

        registry.deactivate(1).unwrap();
        registry.deactivate(1).unwrap();
        assert!(!registry.get(1).unwrap().is_active());
        assert_eq!(registry.active().len(), 1);

        assert!(matches!(registry.activate(7), Err(FareError::OfferNotFound(7))));
        assert!(matches!(registry.deactivate(7), Err(FareError::OfferNotFound(7))));
    }

    #[test]
    fn test_search_matches_name_or_station() {
        let registry = registry();
        let by_name: Vec<u32> = registry
            .search("special")
            .unwrap()
            .iter()
            .map(|o| o.offer_id())
            .collect();
        assert_eq!(by_name, vec![2]);

        let by_station = registry.search("LOND").unwrap();
        assert_eq!(by_station.len(), 1);
        assert_eq!(by_station[0].offer_id(), 1);

        let both: Vec<u32> = registry
            .search("e")
            .unwrap()
            .iter()
            .map(|o| o.offer_id())
            .collect();
        assert_eq!(both, vec![1, 2]);

        assert!(registry.search("Glasgow").unwrap().is_empty());
        assert!(matches!(registry.search("  "), Err(FareError::InvalidInput(_))));
    }

    #[test]
    fn test_search_by_station_is_exact() {
        let registry = registry();
        assert_eq!(registry.search_by_station("manchester").unwrap().len(), 1);
        assert!(registry.search_by_station("Manch").unwrap().is_empty());
        assert!(matches!(
            registry.search_by_station(""),
            Err(FareError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_listing_all_or_active() {
        let mut registry = registry();
        registry.deactivate(1).unwrap();
        let today = date("2026-01-10");

        let all = registry.listing(today, false);
        assert_eq!(all.len(), 2);
        assert!(all[0].expired);
        assert!(!all[0].offer.is_active());
        assert_eq!(all[1].days_left, Some(5));
        assert!(all[1].valid_today);

        let active = registry.listing(today, true);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].offer.offer_id(), 2);
    }
}
