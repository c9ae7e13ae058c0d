use crate::domain::ports::SalesLedger;
use crate::domain::sale::SaleRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory sales ledger.
///
/// Uses `Arc<RwLock<Vec<SaleRecord>>>` so clones share the same history.
/// Nothing survives the process.
#[derive(Default, Clone)]
pub struct InMemorySalesLedger {
    sales: Arc<RwLock<Vec<SaleRecord>>>,
}

impl InMemorySalesLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SalesLedger for InMemorySalesLedger {
    async fn append(&self, mut sale: SaleRecord) -> Result<SaleRecord> {
        let mut sales = self.sales.write().await;
        sale.sequence = sales.len() as u64 + 1;
        sales.push(sale.clone());
        Ok(sale)
    }

    async fn get(&self, sequence: u64) -> Result<Option<SaleRecord>> {
        let sales = self.sales.read().await;
        Ok(sales.iter().find(|s| s.sequence == sequence).cloned())
    }

    async fn all_sales(&self) -> Result<Vec<SaleRecord>> {
        let sales = self.sales.read().await;
        Ok(sales.clone())
    }
}
