//! Device Entity
//!
//! Individual pieces of equipment tracked by serial number.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "device")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub device_id:          i32,
    pub device_name:        String,
    #[sea_orm(unique)]
    pub serial_number:      String,
    pub device_type_id:     i32,
    pub device_status_id:   i32,
    pub location_id:        i32,
    pub created_by_user_id: i32,
    pub created_at:         chrono::DateTime<chrono::Utc>,
    pub updated_at:         chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::device_type::Entity",
        from = "Column::DeviceTypeId",
        to = "super::device_type::Column::DeviceTypeId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DeviceType,
    #[sea_orm(
        belongs_to = "super::device_status::Entity",
        from = "Column::DeviceStatusId",
        to = "super::device_status::Column::DeviceStatusId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    DeviceStatus,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::LocationId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Location,
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::CreatedByUserId",
        to = "super::app_user::Column::AppUserId",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    CreatedBy,
}

impl Related<super::device_type::Entity> for Entity {
    fn to() -> RelationDef { Relation::DeviceType.def() }
}

impl Related<super::device_status::Entity> for Entity {
    fn to() -> RelationDef { Relation::DeviceStatus.def() }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef { Relation::Location.def() }
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef { Relation::CreatedBy.def() }
}

impl ActiveModelBehavior for ActiveModel {}
