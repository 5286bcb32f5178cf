//! Reports service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::reports::{
        errors::ReportsServiceError, records::SalesReport, repository::PgReportsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgReportsService {
    db: Db,
    repository: PgReportsRepository,
}

impl PgReportsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReportsRepository::new(),
        }
    }
}

#[async_trait]
impl ReportsService for PgReportsService {
    async fn generate_report(&self) -> Result<SalesReport, ReportsServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.repository.list_report_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(SalesReport::from(orders))
    }
}

#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Every order, by order number, with running totals.
    async fn generate_report(&self) -> Result<SalesReport, ReportsServiceError>;
}
