use sea_orm::{entity::prelude::*, ActiveValue::NotSet, DatabaseConnection, Set, SqlErr};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Registered account. The password column holds the submitted text as-is.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "login")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Single insert; a taken username surfaces as `ModelError::Conflict`.
pub async fn insert(db: &DatabaseConnection, name: &str, username: &str, password: &str) -> Result<(), errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        username: Set(username.to_string()),
        password: Set(password.to_string()),
    };
    match Entity::insert(am).exec(db).await {
        Ok(_) => Ok(()),
        Err(e) => match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Err(errors::ModelError::Conflict(detail)),
            _ => Err(errors::ModelError::Db(e.to_string())),
        },
    }
}

pub async fn find_by_credentials(db: &DatabaseConnection, username: &str, password: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Username.eq(username))
        .filter(Column::Password.eq(password))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
