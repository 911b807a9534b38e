use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// A named map marker.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "places")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub lat: f64,
    #[sea_orm(column_type = "Double")]
    pub lng: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn fields(name: &str, description: &str, lat: f64, lng: f64) -> ActiveModel {
    ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        lat: Set(lat),
        lng: Set(lng),
    }
}

/// Insert a place and return the id assigned by the database.
pub async fn create(db: &DatabaseConnection, name: &str, description: &str, lat: f64, lng: f64) -> Result<i32, errors::ModelError> {
    let res = Entity::insert(fields(name, description, lat, lng))
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.last_insert_id)
}

/// Overwrite all four fields of `id`. Returns the number of rows matched (0 or 1).
pub async fn update(db: &DatabaseConnection, id: i32, name: &str, description: &str, lat: f64, lng: f64) -> Result<u64, errors::ModelError> {
    let res = Entity::update_many()
        .set(fields(name, description, lat, lng))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find().all(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}
