//! `SeaORM` implementation of the `CafeService` trait.

use crate::db::Store;
use crate::domain::CafeId;
use crate::models::cafe::{Cafe, NewCafe};
use crate::services::cafe_service::{CafeError, CafeService};
use rand::Rng;
use tracing::{info, warn};

/// SeaORM-backed [`CafeService`].
pub struct SeaOrmCafeService {
    store: Store,
    api_key: String,
}

impl SeaOrmCafeService {
    /// `api_key` is the shared secret required by [`CafeService::report_closed`].
    #[must_use]
    pub fn new(store: Store, api_key: impl Into<String>) -> Self {
        Self {
            store,
            api_key: api_key.into(),
        }
    }
}

#[async_trait::async_trait]
impl CafeService for SeaOrmCafeService {
    async fn list_cafes(&self) -> Result<Vec<Cafe>, CafeError> {
        Ok(self.store.list_cafes().await?)
    }

    async fn get_cafe(&self, id: CafeId) -> Result<Cafe, CafeError> {
        self.store
            .get_cafe(id.value())
            .await?
            .ok_or(CafeError::NotFound(id))
    }

    async fn random_cafe(&self) -> Result<Cafe, CafeError> {
        let mut cafes = self.store.list_cafes().await?;
        if cafes.is_empty() {
            return Err(CafeError::EmptyCollection);
        }

        let index = rand::rng().random_range(0..cafes.len());
        Ok(cafes.swap_remove(index))
    }

    async fn search_by_location(&self, location: &str) -> Result<Vec<Cafe>, CafeError> {
        Ok(self.store.find_cafes_by_location(location).await?)
    }

    async fn add_cafe(&self, cafe: NewCafe) -> Result<Cafe, CafeError> {
        let cafe = self.store.insert_cafe(cafe).await?;
        metrics::counter!("cafes_added_total").increment(1);
        info!(cafe_id = %cafe.cafe_id(), name = %cafe.name, "Added cafe");
        Ok(cafe)
    }

    async fn update_price(
        &self,
        id: CafeId,
        new_price: Option<String>,
    ) -> Result<(), CafeError> {
        let updated = self
            .store
            .update_coffee_price(id.value(), new_price)
            .await?;

        if !updated {
            return Err(CafeError::NotFound(id));
        }

        info!(cafe_id = %id, "Updated coffee price");
        Ok(())
    }

    async fn report_closed(&self, id: CafeId, api_key: &str) -> Result<(), CafeError> {
        if api_key != self.api_key {
            warn!(cafe_id = %id, "Rejected report-closed with invalid API key");
            return Err(CafeError::Forbidden);
        }

        let cafe = self.get_cafe(id).await?;
        if !self.store.delete_cafe(id.value()).await? {
            return Err(CafeError::NotFound(id));
        }

        metrics::counter!("cafes_deleted_total").increment(1);
        info!(cafe_id = %id, name = %cafe.name, "Removed cafe reported as closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const KEY: &str = "TopSecretAPIKey";

    async fn service() -> SeaOrmCafeService {
        let store = Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory store");
        SeaOrmCafeService::new(store, KEY)
    }

    fn new_cafe(name: &str) -> NewCafe {
        NewCafe {
            name: name.to_string(),
            map_url: "https://maps.example.com/place".to_string(),
            img_url: "https://images.example.com/cafe.jpg".to_string(),
            location: "Peckham".to_string(),
            seats: "10-20".to_string(),
            ..NewCafe::default()
        }
    }

    #[tokio::test]
    async fn random_on_empty_table_is_an_error() {
        let service = service().await;
        assert!(matches!(
            service.random_cafe().await,
            Err(CafeError::EmptyCollection)
        ));
    }

    #[tokio::test]
    async fn random_eventually_returns_every_cafe() {
        let service = service().await;
        for name in ["A", "B", "C"] {
            service.add_cafe(new_cafe(name)).await.unwrap();
        }

        let mut seen = HashSet::new();
        for _ in 0..300 {
            let cafe = service.random_cafe().await.unwrap();
            seen.insert(cafe.name);
        }
        assert_eq!(seen.len(), 3);
    }

    #[tokio::test]
    async fn duplicate_add_fails_and_keeps_one_record() {
        let service = service().await;
        service.add_cafe(new_cafe("Twin")).await.unwrap();

        let err = service.add_cafe(new_cafe("Twin")).await.unwrap_err();
        assert!(matches!(err, CafeError::Duplicate(_)));
        assert_eq!(service.list_cafes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_price_on_missing_id_is_not_found() {
        let service = service().await;
        let err = service
            .update_price(CafeId::new(404), Some("£1".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, CafeError::NotFound(id) if id.value() == 404));
    }

    #[tokio::test]
    async fn report_closed_checks_key_before_id() {
        let service = service().await;
        let cafe = service.add_cafe(new_cafe("Closing Soon")).await.unwrap();

        let err = service
            .report_closed(CafeId::new(9999), "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, CafeError::Forbidden));

        let err = service
            .report_closed(cafe.cafe_id(), "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, CafeError::Forbidden));
        assert!(service.get_cafe(cafe.cafe_id()).await.is_ok());

        let err = service
            .report_closed(CafeId::new(9999), KEY)
            .await
            .unwrap_err();
        assert!(matches!(err, CafeError::NotFound(_)));

        service.report_closed(cafe.cafe_id(), KEY).await.unwrap();
        assert!(matches!(
            service.get_cafe(cafe.cafe_id()).await,
            Err(CafeError::NotFound(_))
        ));
    }
}
