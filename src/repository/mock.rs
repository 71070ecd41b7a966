use chrono::NaiveDateTime;
use mockall::mock;

use super::{HurricaneAlertReader, HurricaneAlertWriter, ProductReader, ProductWriter};
use crate::domain::{
    hurricane_alert::{
        HurricaneAlert, HurricaneAlertListQuery, NewHurricaneAlert, UpdateHurricaneAlert,
    },
    product::{NewProduct, Product, ProductListQuery},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    }
}

mock! {
    pub HurricaneAlertRepo {}

    impl HurricaneAlertReader for HurricaneAlertRepo {
        fn get_hurricane_alert_by_id(&self, id: i32) -> RepositoryResult<Option<HurricaneAlert>>;
        fn list_hurricane_alerts(&self, query: HurricaneAlertListQuery) -> RepositoryResult<Vec<HurricaneAlert>>;
    }

    impl HurricaneAlertWriter for HurricaneAlertRepo {
        fn create_hurricane_alert(&self, new_alert: &NewHurricaneAlert) -> RepositoryResult<HurricaneAlert>;
        fn update_hurricane_alert(&self, alert_id: i32, updates: &UpdateHurricaneAlert) -> RepositoryResult<HurricaneAlert>;
        fn delete_hurricane_alert(&self, alert_id: i32) -> RepositoryResult<()>;
        fn deactivate_hurricane_alert(&self, alert_id: i32, updated_at: NaiveDateTime) -> RepositoryResult<HurricaneAlert>;
    }
}
