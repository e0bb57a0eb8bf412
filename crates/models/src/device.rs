use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::object_id::ObjectId;
use crate::validation::{check_name, is_valid_ipv4, FieldErrors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(unique)]
    pub ip: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Validated input for a new device.
#[derive(Clone, Debug, PartialEq)]
pub struct NewDevice {
    pub name: String,
    pub ip: String,
}

impl NewDevice {
    pub fn validated(name: &str, ip: &str) -> Result<Self, ModelError> {
        let mut errors = FieldErrors::default();
        let name = check_name(&mut errors, name, "Device name is required", "Device name cannot exceed 100 characters");
        let ip = check_ip(&mut errors, ip);
        errors.into_result()?;
        Ok(Self { name, ip })
    }

    /// Stamp a fresh id and timestamps.
    pub fn into_model(self) -> Model {
        let now: DateTimeWithTimeZone = Utc::now().into();
        Model { id: ObjectId::new().to_hex(), name: self.name, ip: self.ip, created_at: now, updated_at: now }
    }
}

/// Partial update; `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub ip: Option<String>,
}

impl DevicePatch {
    pub fn validated(name: Option<&str>, ip: Option<&str>) -> Result<Self, ModelError> {
        let mut errors = FieldErrors::default();
        let name = name.map(|n| check_name(&mut errors, n, "Device name is required", "Device name cannot exceed 100 characters"));
        let ip = ip.map(|v| check_ip(&mut errors, v));
        errors.into_result()?;
        Ok(Self { name, ip })
    }

    pub fn apply(self, model: &mut Model) {
        if let Some(name) = self.name {
            model.name = name;
        }
        if let Some(ip) = self.ip {
            model.ip = ip;
        }
        model.updated_at = Utc::now().into();
    }
}

fn check_ip(errors: &mut FieldErrors, value: &str) -> String {
    let ip = value.trim();
    if ip.is_empty() {
        errors.push("IP address is required");
    } else if !is_valid_ipv4(ip) {
        errors.push("Please enter a valid IP address");
    }
    ip.to_string()
}

pub async fn list_newest_first(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await?)
}

pub async fn find(db: &DatabaseConnection, id: &ObjectId) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id.to_hex()).one(db).await?)
}

pub async fn create(db: &DatabaseConnection, input: NewDevice) -> Result<Model, ModelError> {
    let m = input.into_model();
    let am = ActiveModel {
        id: Set(m.id),
        name: Set(m.name),
        ip: Set(m.ip),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    };
    Ok(am.insert(db).await?)
}

pub async fn update(db: &DatabaseConnection, id: &ObjectId, patch: DevicePatch) -> Result<Option<Model>, ModelError> {
    let Some(found) = Entity::find_by_id(id.to_hex()).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    if let Some(name) = patch.name {
        am.name = Set(name);
    }
    if let Some(ip) = patch.ip {
        am.ip = Set(ip);
    }
    am.updated_at = Set(Utc::now().into());
    Ok(Some(am.update(db).await?))
}

/// Returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: &ObjectId) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id.to_hex()).exec(db).await?;
    Ok(res.rows_affected > 0)
}

pub async fn all_ids(db: &DatabaseConnection) -> Result<Vec<String>, ModelError> {
    Ok(Entity::find()
        .select_only()
        .column(Column::Id)
        .into_tuple::<String>()
        .all(db)
        .await?)
}

pub async fn delete_all(db: &DatabaseConnection) -> Result<u64, ModelError> {
    Ok(Entity::delete_many().exec(db).await?.rows_affected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_device_is_trimmed() {
        let d = NewDevice::validated("  Living room  ", " 192.168.0.7 ").unwrap();
        assert_eq!(d.name, "Living room");
        assert_eq!(d.ip, "192.168.0.7");
    }

    #[test]
    fn new_device_reports_all_field_errors() {
        let err = NewDevice::validated("", "300.1.1.1").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Device name is required, Please enter a valid IP address");

        let err = NewDevice::validated(&"n".repeat(101), "").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Device name cannot exceed 100 characters, IP address is required");
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut model = NewDevice::validated("a", "1.1.1.1").unwrap().into_model();
        let before = model.clone();
        DevicePatch::validated(None, Some("2.2.2.2")).unwrap().apply(&mut model);
        assert_eq!(model.name, before.name);
        assert_eq!(model.ip, "2.2.2.2");
        assert_eq!(model.created_at, before.created_at);
        assert_eq!(model.id, before.id);
    }

    #[test]
    fn patch_validates_supplied_fields() {
        assert!(DevicePatch::validated(Some("   "), None).is_err());
        assert!(DevicePatch::validated(None, Some("1.2.3")).is_err());
        assert_eq!(DevicePatch::validated(None, None).unwrap(), DevicePatch::default());
    }
}
