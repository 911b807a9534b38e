use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::places::domain::{Place, PlaceInput};

#[async_trait]
pub trait PlaceRepository: Send + Sync {
    async fn insert(&self, input: &PlaceInput) -> Result<i32, ServiceError>;
    /// Returns how many rows matched `id`.
    async fn update(&self, id: i32, input: &PlaceInput) -> Result<u64, ServiceError>;
    async fn list(&self) -> Result<Vec<Place>, ServiceError>;
    /// Returns how many rows were removed.
    async fn delete(&self, id: i32) -> Result<u64, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmPlaceRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl PlaceRepository for SeaOrmPlaceRepository {
    async fn insert(&self, input: &PlaceInput) -> Result<i32, ServiceError> {
        Ok(models::place::create(&self.db, &input.name, &input.description, input.lat, input.lng).await?)
    }

    async fn update(&self, id: i32, input: &PlaceInput) -> Result<u64, ServiceError> {
        Ok(models::place::update(&self.db, id, &input.name, &input.description, input.lat, input.lng).await?)
    }

    async fn list(&self) -> Result<Vec<Place>, ServiceError> {
        Ok(models::place::list(&self.db).await?)
    }

    async fn delete(&self, id: i32) -> Result<u64, ServiceError> {
        Ok(models::place::delete(&self.db, id).await?)
    }
}

/// In-memory repository for tests and doc examples.
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockPlaceRepository {
        rows: Mutex<BTreeMap<i32, Place>>,
        next_id: Mutex<i32>,
        fail: bool,
    }

    impl MockPlaceRepository {
        /// Every call fails as if the database were unreachable.
        pub fn failing() -> Self {
            Self { fail: true, ..Self::default() }
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.fail {
                return Err(ServiceError::Db("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl PlaceRepository for MockPlaceRepository {
        async fn insert(&self, input: &PlaceInput) -> Result<i32, ServiceError> {
            self.check()?;
            let mut next = self.next_id.lock().unwrap_or_else(|e| e.into_inner());
            *next += 1;
            let id = *next;
            let place = Place { id, name: input.name.clone(), description: input.description.clone(), lat: input.lat, lng: input.lng };
            self.rows.lock().unwrap_or_else(|e| e.into_inner()).insert(id, place);
            Ok(id)
        }

        async fn update(&self, id: i32, input: &PlaceInput) -> Result<u64, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap_or_else(|e| e.into_inner());
            match rows.get_mut(&id) {
                Some(p) => {
                    p.name = input.name.clone();
                    p.description = input.description.clone();
                    p.lat = input.lat;
                    p.lng = input.lng;
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn list(&self) -> Result<Vec<Place>, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().unwrap_or_else(|e| e.into_inner()).values().cloned().collect())
        }

        async fn delete(&self, id: i32) -> Result<u64, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().unwrap_or_else(|e| e.into_inner()).remove(&id).map_or(0, |_| 1))
        }
    }
}
