use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::hurricane_alert::{
    HurricaneAlert, HurricaneAlertListQuery, NewHurricaneAlert, UpdateHurricaneAlert,
};
use crate::domain::product::{NewProduct, Product, ProductListQuery};
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod hurricane_alert;
pub mod product;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Check out a connection; it returns to the pool when dropped.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over product records.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over product records.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
}

/// Read-only operations over hurricane alert records.
pub trait HurricaneAlertReader {
    fn get_hurricane_alert_by_id(&self, id: i32) -> RepositoryResult<Option<HurricaneAlert>>;
    fn list_hurricane_alerts(
        &self,
        query: HurricaneAlertListQuery,
    ) -> RepositoryResult<Vec<HurricaneAlert>>;
}

/// Write operations over hurricane alert records.
pub trait HurricaneAlertWriter {
    fn create_hurricane_alert(&self, new_alert: &NewHurricaneAlert)
    -> RepositoryResult<HurricaneAlert>;
    fn update_hurricane_alert(
        &self,
        alert_id: i32,
        updates: &UpdateHurricaneAlert,
    ) -> RepositoryResult<HurricaneAlert>;
    fn delete_hurricane_alert(&self, alert_id: i32) -> RepositoryResult<()>;
    fn deactivate_hurricane_alert(
        &self,
        alert_id: i32,
        updated_at: NaiveDateTime,
    ) -> RepositoryResult<HurricaneAlert>;
}
