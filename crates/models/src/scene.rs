use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::object_id::ObjectId;
use crate::validation::{check_name, check_reference, FieldErrors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "scenes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub device_id: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

const NAME_REQUIRED: &str = "Scene name is required";
const NAME_TOO_LONG: &str = "Scene name cannot exceed 100 characters";
const DEVICE_REQUIRED: &str = "Device ID is required";
const DEVICE_INVALID: &str = "Please enter a valid device ID";

#[derive(Clone, Debug, PartialEq)]
pub struct NewScene {
    pub name: String,
    pub device_id: String,
}

impl NewScene {
    pub fn validated(name: &str, device_id: &str) -> Result<Self, ModelError> {
        let mut errors = FieldErrors::default();
        let name = check_name(&mut errors, name, NAME_REQUIRED, NAME_TOO_LONG);
        let device_id = check_reference(&mut errors, device_id, DEVICE_REQUIRED, DEVICE_INVALID);
        errors.into_result()?;
        Ok(Self { name, device_id })
    }

    pub fn into_model(self) -> Model {
        let now: DateTimeWithTimeZone = Utc::now().into();
        Model { id: ObjectId::new().to_hex(), name: self.name, device_id: self.device_id, created_at: now, updated_at: now }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenePatch {
    pub name: Option<String>,
    pub device_id: Option<String>,
}

impl ScenePatch {
    pub fn validated(name: Option<&str>, device_id: Option<&str>) -> Result<Self, ModelError> {
        let mut errors = FieldErrors::default();
        let name = name.map(|n| check_name(&mut errors, n, NAME_REQUIRED, NAME_TOO_LONG));
        let device_id = device_id.map(|d| check_reference(&mut errors, d, DEVICE_REQUIRED, DEVICE_INVALID));
        errors.into_result()?;
        Ok(Self { name, device_id })
    }

    pub fn apply(self, model: &mut Model) {
        if let Some(name) = self.name {
            model.name = name;
        }
        if let Some(device_id) = self.device_id {
            model.device_id = device_id;
        }
        model.updated_at = Utc::now().into();
    }
}

pub async fn list_by_device(db: &DatabaseConnection, device_id: &ObjectId) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::DeviceId.eq(device_id.to_hex()))
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await?)
}

pub async fn find(db: &DatabaseConnection, id: &ObjectId) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id.to_hex()).one(db).await?)
}

pub async fn create(db: &DatabaseConnection, input: NewScene) -> Result<Model, ModelError> {
    let m = input.into_model();
    let am = ActiveModel {
        id: Set(m.id),
        name: Set(m.name),
        device_id: Set(m.device_id),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    };
    Ok(am.insert(db).await?)
}

pub async fn update(db: &DatabaseConnection, id: &ObjectId, patch: ScenePatch) -> Result<Option<Model>, ModelError> {
    let Some(found) = Entity::find_by_id(id.to_hex()).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    if let Some(name) = patch.name {
        am.name = Set(name);
    }
    if let Some(device_id) = patch.device_id {
        am.device_id = Set(device_id);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(Some(am.update(db).await?))
}

pub async fn delete(db: &DatabaseConnection, id: &ObjectId) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id.to_hex()).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Remove every scene attached to any of `device_ids`.
pub async fn delete_by_devices(db: &DatabaseConnection, device_ids: &[String]) -> Result<u64, ModelError> {
    if device_ids.is_empty() {
        return Ok(0);
    }
    let res = Entity::delete_many()
        .filter(Column::DeviceId.is_in(device_ids.iter().cloned()))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
