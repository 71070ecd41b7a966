use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::{
    domain::hurricane_alert::{
        HurricaneAlert as DomainHurricaneAlert, HurricaneAlertListQuery, HurricaneAlertOrder,
        NewHurricaneAlert as DomainNewHurricaneAlert,
        UpdateHurricaneAlert as DomainUpdateHurricaneAlert,
    },
    models::hurricane_alert::{
        HurricaneAlert as DbHurricaneAlert, NewHurricaneAlert as DbNewHurricaneAlert,
        UpdateHurricaneAlert as DbUpdateHurricaneAlert,
    },
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, HurricaneAlertReader, HurricaneAlertWriter},
};

impl HurricaneAlertReader for DieselRepository {
    fn get_hurricane_alert_by_id(&self, id: i32) -> RepositoryResult<Option<DomainHurricaneAlert>> {
        use crate::schema::hurricane_alerts;

        let mut conn = self.conn()?;
        let alert = hurricane_alerts::table
            .find(id)
            .first::<DbHurricaneAlert>(&mut conn)
            .optional()?;

        Ok(alert.map(Into::into))
    }

    fn list_hurricane_alerts(
        &self,
        query: HurricaneAlertListQuery,
    ) -> RepositoryResult<Vec<DomainHurricaneAlert>> {
        use crate::schema::hurricane_alerts;

        let mut conn = self.conn()?;

        let mut items = hurricane_alerts::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(is_active) = query.is_active {
            items = items.filter(hurricane_alerts::is_active.eq(is_active));
        }

        items = match query.order {
            HurricaneAlertOrder::NewestFirst => items.order((
                hurricane_alerts::created_at.desc(),
                hurricane_alerts::id.desc(),
            )),
            HurricaneAlertOrder::MostSevereFirst => items.order((
                hurricane_alerts::severity.desc(),
                hurricane_alerts::category.desc(),
                hurricane_alerts::id.asc(),
            )),
        };

        let db_alerts = items.load::<DbHurricaneAlert>(&mut conn)?;

        Ok(db_alerts.into_iter().map(Into::into).collect())
    }
}

impl HurricaneAlertWriter for DieselRepository {
    fn create_hurricane_alert(
        &self,
        new_alert: &DomainNewHurricaneAlert,
    ) -> RepositoryResult<DomainHurricaneAlert> {
        use crate::schema::hurricane_alerts;

        let mut conn = self.conn()?;
        let db_new = DbNewHurricaneAlert::from(new_alert);

        let created = diesel::insert_into(hurricane_alerts::table)
            .values(&db_new)
            .get_result::<DbHurricaneAlert>(&mut conn)?;

        Ok(created.into())
    }

    fn update_hurricane_alert(
        &self,
        alert_id: i32,
        updates: &DomainUpdateHurricaneAlert,
    ) -> RepositoryResult<DomainHurricaneAlert> {
        use crate::schema::hurricane_alerts;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateHurricaneAlert::from(updates);

        let updated = diesel::update(hurricane_alerts::table.find(alert_id))
            .set(&db_updates)
            .get_result::<DbHurricaneAlert>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_hurricane_alert(&self, alert_id: i32) -> RepositoryResult<()> {
        use crate::schema::hurricane_alerts;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(hurricane_alerts::table.find(alert_id)).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    fn deactivate_hurricane_alert(
        &self,
        alert_id: i32,
        updated_at: NaiveDateTime,
    ) -> RepositoryResult<DomainHurricaneAlert> {
        use crate::schema::hurricane_alerts;

        let mut conn = self.conn()?;

        let updated = diesel::update(hurricane_alerts::table.find(alert_id))
            .set((
                hurricane_alerts::is_active.eq(false),
                hurricane_alerts::updated_at.eq(updated_at),
            ))
            .get_result::<DbHurricaneAlert>(&mut conn)?;

        Ok(updated.into())
    }
}
