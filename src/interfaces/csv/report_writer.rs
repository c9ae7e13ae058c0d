use crate::domain::catalog::Destination;
use crate::domain::offer::DATE_FORMAT;
use crate::domain::sale::SaleRecord;
use crate::error::Result;
use std::io::Write;

/// Writes the final per-destination fares and sales totals.
pub struct DestinationWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> DestinationWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_destinations(&mut self, destinations: &[Destination]) -> Result<()> {
        self.writer
            .write_record(["destination", "single", "return", "sales", "takings"])?;
        for destination in destinations {
            self.writer.write_record([
                destination.name.clone(),
                destination.single_price.to_string(),
                destination.return_price.to_string(),
                destination.sales_count().to_string(),
                destination.total_takings().to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes the sales ledger, one row per ticket sold.
pub struct SaleWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SaleWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_sales(&mut self, sales: &[SaleRecord]) -> Result<()> {
        self.writer.write_record([
            "sequence",
            "origin",
            "destination",
            "type",
            "price",
            "change",
            "offer",
            "date",
        ])?;
        for sale in sales {
            self.writer.write_record([
                sale.sequence.to_string(),
                sale.origin.clone(),
                sale.destination.clone(),
                sale.ticket_type.to_string(),
                sale.price.to_string(),
                sale.change.to_string(),
                sale.offer.map(|id| id.to_string()).unwrap_or_default(),
                sale.date.format(DATE_FORMAT).to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::Catalog;
    use crate::domain::money::{Money, Price};
    use crate::domain::ticket::TicketType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_destinations() {
        let mut catalog = Catalog::new();
        catalog.add(Destination::new(
            "London",
            Price::new(dec!(25.5)).unwrap(),
            Price::new(dec!(45)).unwrap(),
        ));
        catalog.record_sale("London", Money::new(dec!(25.5)));
        catalog.record_sale("London", Money::new(dec!(20.4)));

        let mut buffer = Vec::new();
        DestinationWriter::new(&mut buffer)
            .write_destinations(catalog.destinations())
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "destination,single,return,sales,takings\nLondon,25.50,45.00,2,45.90\n"
        );
    }

    #[test]
    fn test_write_sales() {
        let sale = SaleRecord {
            sequence: 1,
            origin: "Oxford Station".to_string(),
            destination: "London".to_string(),
            ticket_type: TicketType::Return,
            price: Money::new(dec!(36)),
            change: Money::new(dec!(9)),
            offer: Some(1),
            date: NaiveDate::from_ymd_opt(2025, 12, 10).unwrap(),
        };

        let mut buffer = Vec::new();
        SaleWriter::new(&mut buffer).write_sales(&[sale]).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert!(output.starts_with("sequence,origin,destination,type,price,change,offer,date\n"));
        assert!(output.contains("1,Oxford Station,London,Return,36.00,9.00,1,2025-12-10"));
    }
}
