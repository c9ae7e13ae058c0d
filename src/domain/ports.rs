use super::sale::SaleRecord;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SalesLedger: Send + Sync {
    /// Appends `sale`, numbering it, and returns the stored record.
    async fn append(&self, sale: SaleRecord) -> Result<SaleRecord>;
    async fn get(&self, sequence: u64) -> Result<Option<SaleRecord>>;
    async fn all_sales(&self) -> Result<Vec<SaleRecord>>;
}

pub type SalesLedgerBox = Box<dyn SalesLedger>;
pub type SalesLedgerFactory = Box<dyn Fn() -> SalesLedgerBox + Send + Sync>;
