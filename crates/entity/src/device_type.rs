//! Device Type Entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "device_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub device_type_id:   i32,
    #[sea_orm(unique)]
    pub device_type_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::device::Entity")]
    Device,
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef { Relation::Device.def() }
}

impl ActiveModelBehavior for ActiveModel {}
