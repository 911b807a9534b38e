use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::places::domain::{Place, PlaceInput};
use crate::places::repository::PlaceRepository;

/// Marker CRUD. Update and delete report whether a row matched instead of
/// failing on an unknown id; the HTTP layer decides what a miss means.
pub struct PlaceService<R: PlaceRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: PlaceRepository + ?Sized> PlaceService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Persist a new place and return its id.
    ///
    /// # Examples
    /// ```
    /// use service::places::{PlaceService, domain::PlaceInput, repository::mock::MockPlaceRepository};
    /// use std::sync::Arc;
    /// let svc = PlaceService::new(Arc::new(MockPlaceRepository::default()));
    /// let input = PlaceInput { name: "Pier".into(), description: "".into(), lat: 1.0, lng: 2.0 };
    /// let id = tokio_test::block_on(svc.add(input)).unwrap();
    /// assert_eq!(tokio_test::block_on(svc.list()).unwrap()[0].id, id);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add(&self, input: PlaceInput) -> Result<i32, ServiceError> {
        let id = self.repo.insert(&input).await?;
        info!(place_id = id, "place_added");
        Ok(id)
    }

    /// Overwrite name, description and coordinates of `id`. `Ok(false)` when no row matched.
    #[instrument(skip(self, input), fields(place_id = id))]
    pub async fn update(&self, id: i32, input: PlaceInput) -> Result<bool, ServiceError> {
        let matched = self.repo.update(id, &input).await? > 0;
        if matched {
            info!("place_updated");
        } else {
            debug!("update matched no place");
        }
        Ok(matched)
    }

    pub async fn list(&self) -> Result<Vec<Place>, ServiceError> {
        self.repo.list().await
    }

    /// Remove `id`. `Ok(false)` when it was already gone.
    #[instrument(skip(self), fields(place_id = id))]
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let removed = self.repo.delete(id).await? > 0;
        if removed {
            info!("place_deleted");
        } else {
            debug!("delete matched no place");
        }
        Ok(removed)
    }
}
